//! Attempt orchestration: extract credentials, resolve the profile, and
//! translate the application decision into one terminal pipeline signal.

// self
use crate::{
	_prelude::*,
	http::ProfileHttpClient,
	obs::{self, AttemptOutcome, AttemptSpan},
	outcome::{Decision, Outcome, Verify, VerifyContext},
	profile::CanonicalProfile,
	provider::TokenStrategy,
	request::CredentialSource,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestProfileClient;

#[cfg(feature = "reqwest")]
/// Authenticator specialized for the crate's default reqwest transport.
pub type ReqwestAuthenticator<R, U> = Authenticator<R, U, ReqwestProfileClient>;

/// Coordinates one authentication attempt per inbound request.
///
/// The authenticator owns the strategy, the HTTP client, and the application
/// verify callback so the per-request flow stays pure orchestration: no
/// state survives an attempt, and the only object shared across requests is
/// the strategy's read-only configuration. There is no retry logic; a
/// transport or parse failure terminates the attempt as an error outcome
/// and any retry policy belongs to the hosting pipeline.
pub struct Authenticator<R, U, C>
where
	C: ?Sized + ProfileHttpClient,
{
	/// Strategy implementing the provider-specific capability hooks.
	pub strategy: Arc<dyn TokenStrategy>,
	/// HTTP client used for profile fetches.
	pub http_client: Arc<C>,
	/// Application decision callback.
	pub verify: Arc<dyn Verify<R, U>>,
}
impl<R, U, C> Authenticator<R, U, C>
where
	C: ?Sized + ProfileHttpClient,
{
	/// Creates an authenticator that reuses the caller-provided transport.
	pub fn with_http_client(
		strategy: Arc<dyn TokenStrategy>,
		http_client: impl Into<Arc<C>>,
		verify: Arc<dyn Verify<R, U>>,
	) -> Self {
		Self { strategy, http_client: http_client.into(), verify }
	}
}
#[cfg(feature = "reqwest")]
impl<R, U> Authenticator<R, U, ReqwestProfileClient> {
	/// Creates a new authenticator with the default reqwest transport.
	pub fn new(strategy: Arc<dyn TokenStrategy>, verify: Arc<dyn Verify<R, U>>) -> Self {
		Self::with_http_client(strategy, ReqwestProfileClient::default(), verify)
	}
}
impl<R, U, C> Authenticator<R, U, C>
where
	R: CredentialSource,
	C: ?Sized + ProfileHttpClient,
{
	/// Runs one authentication attempt and returns exactly one outcome.
	///
	/// Extraction failures short-circuit to the fail signal before any
	/// network activity; resolution failures short-circuit to the error
	/// signal before the verify callback runs.
	pub async fn authenticate(&self, request: &R) -> Outcome<U> {
		let strategy_name = self.strategy.name();
		let span = AttemptSpan::new(strategy_name, "authenticate");

		obs::record_attempt_outcome(strategy_name, AttemptOutcome::Attempt);

		let outcome = span.instrument(self.run(request)).await;

		obs::record_attempt_outcome(
			strategy_name,
			match &outcome {
				Outcome::Success { .. } => AttemptOutcome::Success,
				Outcome::Fail { .. } => AttemptOutcome::Fail,
				Outcome::Error(_) => AttemptOutcome::Error,
			},
		);

		outcome
	}

	async fn run(&self, request: &R) -> Outcome<U> {
		let pair = match self.strategy.extract_credentials(request) {
			Ok(pair) => pair,
			Err(missing) => return Outcome::fail_with_message(missing.to_string()),
		};
		let profile = match self.resolve_profile(&pair.access_token).await {
			Ok(profile) => profile,
			Err(err) => return Outcome::Error(err),
		};
		let ctx = VerifyContext {
			request: self.strategy.config().pass_request_to_verify.then_some(request),
			access_token: &pair.access_token,
			refresh_token: pair.refresh_token.as_ref(),
			profile,
		};

		match self.verify.verify(ctx).await {
			Decision::Authenticated { user, info } => Outcome::Success { user, info },
			Decision::Rejected { info } => Outcome::Fail { info },
			Decision::Errored(source) => Outcome::Error(Error::Verify(source)),
		}
	}

	/// Exchanges an access token for a canonical profile.
	///
	/// Every call performs a fresh round trip; nothing is cached and
	/// concurrent identical requests are not deduplicated.
	pub async fn resolve_profile(&self, access_token: &AccessToken) -> Result<CanonicalProfile> {
		let request = self.strategy.profile_request(access_token);

		match self.http_client.fetch(&request).await {
			Ok(body) => self.strategy.parse_profile(&body),
			Err(failure) => Err(self.strategy.classify_fetch_error(failure)),
		}
	}
}
impl<R, U, C> Clone for Authenticator<R, U, C>
where
	C: ?Sized + ProfileHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			strategy: self.strategy.clone(),
			http_client: self.http_client.clone(),
			verify: self.verify.clone(),
		}
	}
}
impl<R, U, C> Debug for Authenticator<R, U, C>
where
	C: ?Sized + ProfileHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authenticator").field("strategy", &self.strategy.name()).finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;
	use crate::{
		error::ProviderError,
		http::{ProfileFetchError, ProfileFetchFuture, ProfileRequest},
		outcome::{VerifyFuture, VerifyInfo},
		provider::FoursquareStrategy,
		request::FormRequest,
	};

	const PROFILE_BODY: &str = r#"{"response": {"user": {
		"id": "1234",
		"firstName": "Eugene",
		"lastName": "Obrezkov",
		"photo": "https://example.com/p.jpg",
		"contact": {"email": "ghaiklor@gmail.com"}
	}}}"#;

	enum StubResponse {
		Body(&'static str),
		Payload { status: u16, body: &'static str },
	}

	struct RecordingTransport {
		response: StubResponse,
		calls: AtomicUsize,
	}
	impl RecordingTransport {
		fn new(response: StubResponse) -> Self {
			Self { response, calls: AtomicUsize::new(0) }
		}
	}
	impl ProfileHttpClient for RecordingTransport {
		fn fetch<'a>(&'a self, _request: &'a ProfileRequest) -> ProfileFetchFuture<'a> {
			Box::pin(async move {
				self.calls.fetch_add(1, Ordering::Relaxed);

				match &self.response {
					StubResponse::Body(body) => Ok((*body).to_owned()),
					StubResponse::Payload { status, body } =>
						Err(ProfileFetchError::Payload { status: *status, body: (*body).to_owned() }),
				}
			})
		}
	}

	fn strategy(pass_request_to_verify: bool) -> Arc<dyn TokenStrategy> {
		let config = FoursquareStrategy::config("client-id", "client-secret")
			.pass_request_to_verify(pass_request_to_verify)
			.build()
			.expect("Test config should validate.");

		Arc::new(FoursquareStrategy::new(config))
	}

	fn authenticator(
		pass_request_to_verify: bool,
		response: StubResponse,
		verify: Arc<dyn Verify<FormRequest, String>>,
	) -> (Authenticator<FormRequest, String, RecordingTransport>, Arc<RecordingTransport>) {
		let transport = Arc::new(RecordingTransport::new(response));
		let authenticator = Authenticator::with_http_client(
			strategy(pass_request_to_verify),
			transport.clone(),
			verify,
		);

		(authenticator, transport)
	}

	fn describe(ctx: VerifyContext<'_, FormRequest>) -> VerifyFuture<'_, String> {
		Box::pin(async move {
			let user = format!(
				"{}|{}|request:{}|refresh:{}",
				ctx.profile.id,
				ctx.access_token.secret(),
				ctx.request.is_some(),
				ctx.refresh_token.is_some(),
			);

			Decision::Authenticated { user, info: Some(VerifyInfo::message("welcome")) }
		})
	}

	fn reject(_ctx: VerifyContext<'_, FormRequest>) -> VerifyFuture<'_, String> {
		Box::pin(async move { Decision::rejected_with_message("rejected") })
	}

	fn explode(_ctx: VerifyContext<'_, FormRequest>) -> VerifyFuture<'_, String> {
		Box::pin(async move { Decision::errored(std::io::Error::other("verify broke")) })
	}

	#[tokio::test]
	async fn missing_token_fails_without_network() {
		let (authenticator, transport) =
			authenticator(false, StubResponse::Body(PROFILE_BODY), Arc::new(describe));
		let outcome = authenticator.authenticate(&FormRequest::new()).await;

		assert!(matches!(
			outcome,
			Outcome::Fail { info: Some(ref info) }
				if info.message.as_deref() == Some("You should provide access_token."),
		));
		assert_eq!(transport.calls.load(Ordering::Relaxed), 0);
	}

	#[tokio::test]
	async fn success_decision_carries_user_and_info() {
		let (authenticator, transport) =
			authenticator(false, StubResponse::Body(PROFILE_BODY), Arc::new(describe));
		let request = FormRequest::new()
			.with_body_param("access_token", "token-123")
			.with_body_param("refresh_token", "refresh-456");
		let outcome = authenticator.authenticate(&request).await;

		assert!(matches!(
			outcome,
			Outcome::Success { ref user, info: Some(ref info) }
				if user == "1234|token-123|request:false|refresh:true"
					&& info.message.as_deref() == Some("welcome"),
		));
		assert_eq!(transport.calls.load(Ordering::Relaxed), 1);
	}

	#[tokio::test]
	async fn pass_request_to_verify_exposes_the_request() {
		let (authenticator, _transport) =
			authenticator(true, StubResponse::Body(PROFILE_BODY), Arc::new(describe));
		let request = FormRequest::new().with_body_param("access_token", "token-123");
		let outcome = authenticator.authenticate(&request).await;

		assert!(matches!(
			outcome,
			Outcome::Success { ref user, .. }
				if user == "1234|token-123|request:true|refresh:false",
		));
	}

	#[tokio::test]
	async fn rejection_decision_becomes_fail() {
		let (authenticator, _transport) =
			authenticator(false, StubResponse::Body(PROFILE_BODY), Arc::new(reject));
		let request = FormRequest::new().with_body_param("access_token", "token-123");
		let outcome = authenticator.authenticate(&request).await;

		assert!(matches!(
			outcome,
			Outcome::Fail { info: Some(ref info) } if info.message.as_deref() == Some("rejected"),
		));
	}

	#[tokio::test]
	async fn verify_failure_becomes_error() {
		let (authenticator, _transport) =
			authenticator(false, StubResponse::Body(PROFILE_BODY), Arc::new(explode));
		let request = FormRequest::new().with_body_param("access_token", "token-123");
		let outcome = authenticator.authenticate(&request).await;

		assert!(matches!(outcome, Outcome::Error(Error::Verify(_))));
	}

	#[tokio::test]
	async fn provider_error_skips_the_verify_callback() {
		fn unreachable_verify(
			_ctx: VerifyContext<'_, FormRequest>,
		) -> VerifyFuture<'_, String> {
			Box::pin(async move { panic!("Verify callback must not run after a provider error.") })
		}

		let (authenticator, _transport) = authenticator(
			false,
			StubResponse::Payload {
				status: 403,
				body: r#"{"meta": {"code": 403, "errorDetail": "invalid token"}}"#,
			},
			Arc::new(unreachable_verify),
		);
		let request = FormRequest::new().with_query_param("access_token", "token-123");
		let outcome = authenticator.authenticate(&request).await;

		assert!(matches!(
			outcome,
			Outcome::Error(Error::Provider(ProviderError { code: 403, ref detail }))
				if detail == "invalid token",
		));
	}
}
