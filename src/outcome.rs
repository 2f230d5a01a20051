//! Pipeline outcome contract and the application verify seam.
//!
//! An authentication attempt terminates in exactly one [`Outcome`]: the
//! pipeline's success/fail/error tri-state. The application supplies a
//! [`Verify`] implementation whose [`Decision`] the dispatcher translates
//! into that terminal signal, keeping the contract statically checkable
//! instead of relying on a side-effecting callback object.

// self
use crate::{_prelude::*, profile::CanonicalProfile};

/// Boxed future returned by [`Verify::verify`].
pub type VerifyFuture<'a, U> = Pin<Box<dyn Future<Output = Decision<U>> + 'a + Send>>;

/// Terminal pipeline signal for one authentication attempt.
#[derive(Debug)]
pub enum Outcome<U> {
	/// Credential accepted; the application resolved a user.
	Success {
		/// Application user produced by the verify callback.
		user: U,
		/// Additional information supplied by the application.
		info: Option<VerifyInfo>,
	},
	/// Credential rejected; the request itself was well-formed enough to
	/// decide on, so this is not a system fault.
	Fail {
		/// Additional information describing the rejection.
		info: Option<VerifyInfo>,
	},
	/// Attempt aborted by a system, provider, or application fault.
	Error(Error),
}
impl<U> Outcome<U> {
	/// Rejection outcome carrying a human-readable message.
	pub fn fail_with_message(message: impl Into<String>) -> Self {
		Self::Fail { info: Some(VerifyInfo::message(message)) }
	}
}

/// Free-form information attached to success/fail signals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyInfo {
	/// Human-readable message for the hosting pipeline.
	pub message: Option<String>,
}
impl VerifyInfo {
	/// Info carrying a message.
	pub fn message(message: impl Into<String>) -> Self {
		Self { message: Some(message.into()) }
	}
}

/// Completion reported by the application verify callback.
#[derive(Debug)]
pub enum Decision<U> {
	/// The application mapped the profile to one of its users.
	Authenticated {
		/// Resolved application user.
		user: U,
		/// Additional information passed through to the success signal.
		info: Option<VerifyInfo>,
	},
	/// The application declined the credential.
	Rejected {
		/// Additional information passed through to the fail signal.
		info: Option<VerifyInfo>,
	},
	/// The application failed while deciding.
	Errored(Box<dyn std::error::Error + Send + Sync>),
}
impl<U> Decision<U> {
	/// Acceptance without additional info.
	pub fn authenticated(user: U) -> Self {
		Self::Authenticated { user, info: None }
	}

	/// Rejection without additional info.
	pub fn rejected() -> Self {
		Self::Rejected { info: None }
	}

	/// Rejection carrying a message for the pipeline.
	pub fn rejected_with_message(message: impl Into<String>) -> Self {
		Self::Rejected { info: Some(VerifyInfo::message(message)) }
	}

	/// Failure while deciding.
	pub fn errored(source: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Errored(Box::new(source))
	}
}

/// Per-attempt context handed to the application verify callback.
///
/// The profile is owned by the context and consumed exactly once; the
/// inbound request is borrowed only when the strategy configuration enables
/// `pass_request_to_verify`.
pub struct VerifyContext<'a, R> {
	/// Inbound request, present when configured.
	pub request: Option<&'a R>,
	/// Access token the attempt was authenticated with.
	pub access_token: &'a AccessToken,
	/// Refresh token accompanying the access token, if any.
	pub refresh_token: Option<&'a RefreshToken>,
	/// Canonical profile resolved from the provider.
	pub profile: CanonicalProfile,
}
impl<R> Debug for VerifyContext<'_, R> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("VerifyContext")
			.field("request_present", &self.request.is_some())
			.field("refresh_token_present", &self.refresh_token.is_some())
			.field("profile", &self.profile)
			.finish()
	}
}

/// Application-supplied decision seam mapping a canonical profile to a user.
///
/// Implementors are required to be `Send + Sync`. Plain functions returning
/// [`VerifyFuture`] implement the trait automatically, which keeps simple
/// hosts free of boilerplate structs.
pub trait Verify<R, U>: Send + Sync {
	/// Decides whether the authenticated credential maps to a user.
	fn verify<'a>(&'a self, ctx: VerifyContext<'a, R>) -> VerifyFuture<'a, U>;
}
impl<R, U, F> Verify<R, U> for F
where
	F: for<'a> Fn(VerifyContext<'a, R>) -> VerifyFuture<'a, U> + Send + Sync,
{
	fn verify<'a>(&'a self, ctx: VerifyContext<'a, R>) -> VerifyFuture<'a, U> {
		self(ctx)
	}
}
