//! Strategy hooks implemented once per identity provider.
//!
//! [`TokenStrategy`] carries the per-provider capability set: locate bearer
//! credentials in the request, build the authenticated profile request,
//! classify raw fetch failures, and map the provider schema onto the
//! canonical profile. The dispatcher stays provider-agnostic by working
//! against the trait object.

// self
use crate::{
	_prelude::*,
	auth::TokenPair,
	http::{ProfileFetchError, ProfileRequest},
	profile::CanonicalProfile,
	provider::config::StrategyConfig,
	request::CredentialSource,
};

/// Client-input failure raised when no access token is present.
///
/// This is a "fail" outcome, never an "error": the caller must resubmit
/// with a token, and nothing on the system side went wrong.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("You should provide {field}.")]
pub struct MissingCredential {
	/// Request field name the strategy looked for.
	pub field: String,
}

/// Per-provider strategy hook consumed by the dispatcher.
///
/// Implementors are required to be `Send + Sync`. The default
/// [`extract_credentials`](TokenStrategy::extract_credentials) and
/// [`profile_request`](TokenStrategy::profile_request) implementations cover
/// the common field-lookup and URL-construction rules; override them only
/// when a provider deviates.
pub trait TokenStrategy: Send + Sync {
	/// Stable strategy name registered with the hosting pipeline.
	fn name(&self) -> &'static str;

	/// Provider tag stamped onto canonical profiles.
	fn provider(&self) -> &'static str;

	/// Read-only configuration resolved at construction time.
	fn config(&self) -> &StrategyConfig;

	/// Locates bearer credentials in the inbound request.
	///
	/// Body parameters take precedence over query parameters for both
	/// configured field names; the order is a fixed rule, not configurable.
	/// Blank values count as absent.
	fn extract_credentials(
		&self,
		request: &dyn CredentialSource,
	) -> Result<TokenPair, MissingCredential> {
		let config = self.config();
		let access_token = lookup_param(request, &config.access_token_field);
		let refresh_token = lookup_param(request, &config.refresh_token_field);

		match access_token {
			Some(value) => Ok(TokenPair::new(value, refresh_token)),
			None => Err(MissingCredential { field: config.access_token_field.clone() }),
		}
	}

	/// Builds the authenticated profile request for an access token.
	fn profile_request(&self, access_token: &AccessToken) -> ProfileRequest {
		let config = self.config();

		ProfileRequest {
			url: config.versioned_profile_url(),
			access_token: access_token.clone(),
			placement: config.token_placement.clone(),
		}
	}

	/// Maps a raw fetch failure into the verifier error taxonomy.
	fn classify_fetch_error(&self, failure: ProfileFetchError) -> Error;

	/// Parses a provider success body into the canonical profile.
	fn parse_profile(&self, body: &str) -> Result<CanonicalProfile>;
}

fn lookup_param(request: &dyn CredentialSource, field: &str) -> Option<String> {
	request
		.body_param(field)
		.filter(|value| !value.is_empty())
		.or_else(|| request.query_param(field).filter(|value| !value.is_empty()))
}

pub(crate) const BODY_PREVIEW_LIMIT: usize = 256;

/// Truncates provider payload text kept inside error values.
pub(crate) fn truncate_preview(body: String) -> String {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body;
	}

	let mut buf = String::new();

	for (idx, ch) in body.chars().enumerate() {
		if idx >= BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}
		buf.push(ch);
	}

	buf
}
