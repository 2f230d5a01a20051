//! Foursquare token-verification strategy.
//!
//! Authenticates requests carrying a Foursquare-issued OAuth 2.0 access
//! token by fetching the `users/self` profile and normalizing it into the
//! canonical shape. Foursquare presents the bearer token as the
//! `oauth_token` query parameter rather than an `Authorization` header, and
//! reports failures as `{"meta": {"code", "errorDetail"}}` payloads.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	error::{FetchError, ProfileError, ProviderError},
	http::{ProfileFetchError, TokenPlacement},
	profile::{CanonicalProfile, ProfileField, ProfileName},
	provider::{
		config::{StrategyConfig, StrategyConfigBuilder},
		strategy::{TokenStrategy, truncate_preview},
	},
};

/// Well-known Foursquare authorization endpoint.
pub const AUTHORIZATION_URL: &str = "https://foursquare.com/oauth2/authenticate";
/// Well-known Foursquare token endpoint.
pub const TOKEN_URL: &str = "https://foursquare.com/oauth2/access_token";
/// Well-known Foursquare profile endpoint.
pub const PROFILE_URL: &str = "https://api.foursquare.com/v2/users/self";
/// Query parameter name Foursquare expects the bearer token under.
pub const OAUTH_TOKEN_PARAM: &str = "oauth_token";

const NAME: &str = "foursquare-token";
const PROVIDER: &str = "foursquare";

/// Token-verification strategy for Foursquare.
#[derive(Clone, Debug)]
pub struct FoursquareStrategy {
	config: StrategyConfig,
}
impl FoursquareStrategy {
	/// Creates a config builder seeded with Foursquare's well-known
	/// endpoints and `oauth_token` query placement.
	pub fn config(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> StrategyConfigBuilder {
		StrategyConfig::builder(client_id, client_secret)
			.default_authorization_url(AUTHORIZATION_URL)
			.default_token_url(TOKEN_URL)
			.default_profile_url(PROFILE_URL)
			.token_placement(TokenPlacement::query(OAUTH_TOKEN_PARAM))
	}

	/// Wraps a validated configuration.
	pub fn new(config: StrategyConfig) -> Self {
		Self { config }
	}
}
impl TokenStrategy for FoursquareStrategy {
	fn name(&self) -> &'static str {
		NAME
	}

	fn provider(&self) -> &'static str {
		PROVIDER
	}

	fn config(&self) -> &StrategyConfig {
		&self.config
	}

	fn classify_fetch_error(&self, failure: ProfileFetchError) -> Error {
		match failure {
			ProfileFetchError::Payload { status, body } => match parse_meta(&body) {
				Some(meta) =>
					ProviderError { code: meta.code, detail: meta.error_detail }.into(),
				None => FetchError::UnrecognizedPayload {
					status,
					body_preview: truncate_preview(body),
				}
				.into(),
			},
			ProfileFetchError::Transport(source) => FetchError::Network { source }.into(),
		}
	}

	fn parse_profile(&self, body: &str) -> Result<CanonicalProfile> {
		let mut deserializer = serde_json::Deserializer::from_str(body);
		let mut parsed: Value = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| ProfileError::Json { source })?;
		let envelope: ProfileEnvelope = serde_path_to_error::deserialize(&parsed)
			.map_err(|source| ProfileError::Shape { source })?;
		let user = envelope.response.user;

		// Provider-sourced user id takes precedence over any top-level id
		// the payload already carried.
		if let Value::Object(map) = &mut parsed {
			map.insert("id".into(), Value::String(user.id.clone()));
		}

		let given_name = user.first_name.unwrap_or_default();
		let family_name = user.last_name.unwrap_or_default();
		let display_name = format!("{given_name} {family_name}");

		Ok(CanonicalProfile {
			provider: PROVIDER,
			id: user.id,
			display_name,
			name: ProfileName { given_name, family_name },
			emails: vec![ProfileField::new(user.contact.email.unwrap_or_default())],
			photos: vec![ProfileField::new(user.photo.unwrap_or_default())],
			raw: body.to_owned(),
			parsed,
		})
	}
}

#[derive(Deserialize)]
struct ProfileEnvelope {
	response: ProfileResponse,
}
#[derive(Deserialize)]
struct ProfileResponse {
	user: ProviderUser,
}
#[derive(Deserialize)]
struct ProviderUser {
	id: String,
	#[serde(default, rename = "firstName")]
	first_name: Option<String>,
	#[serde(default, rename = "lastName")]
	last_name: Option<String>,
	#[serde(default)]
	photo: Option<String>,
	contact: ProviderContact,
}
#[derive(Deserialize)]
struct ProviderContact {
	#[serde(default)]
	email: Option<String>,
}

#[derive(Deserialize)]
struct MetaEnvelope {
	meta: MetaBody,
}
#[derive(Deserialize)]
struct MetaBody {
	code: i64,
	#[serde(rename = "errorDetail")]
	error_detail: String,
}

fn parse_meta(body: &str) -> Option<MetaBody> {
	serde_json::from_str::<MetaEnvelope>(body).ok().map(|envelope| envelope.meta)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{http::ProfileRequest, request::FormRequest};

	const PROFILE_BODY: &str = r#"{
		"meta": {"code": 200},
		"response": {
			"user": {
				"id": "1234",
				"firstName": "Eugene",
				"lastName": "Obrezkov",
				"photo": "https://playfoursquare.s3.amazonaws.com/userpix_thumbs/1234.jpg",
				"gender": "male",
				"contact": {
					"phone": "1234567890",
					"email": "ghaiklor@gmail.com"
				}
			}
		}
	}"#;

	fn strategy() -> FoursquareStrategy {
		let config = FoursquareStrategy::config("client-id", "client-secret")
			.build()
			.expect("Foursquare defaults should validate.");

		FoursquareStrategy::new(config)
	}

	#[test]
	fn seeded_config_uses_well_known_endpoints() {
		let strategy = strategy();
		let config = strategy.config();

		assert_eq!(strategy.name(), "foursquare-token");
		assert_eq!(config.authorization_url.as_str(), AUTHORIZATION_URL);
		assert_eq!(config.token_url.as_str(), TOKEN_URL);
		assert_eq!(config.profile_url.as_str(), PROFILE_URL);
		assert_eq!(config.token_placement, TokenPlacement::query("oauth_token"));
	}

	#[test]
	fn profile_request_appends_version_then_token() {
		let versioned = FoursquareStrategy::new(
			FoursquareStrategy::config("client-id", "client-secret")
				.api_version("20140308")
				.build()
				.expect("Versioned config should validate."),
		);
		let request: ProfileRequest =
			versioned.profile_request(&AccessToken::new("token-123".into()));

		assert!(request.url.as_str().ends_with("?v=20140308"));
		assert_eq!(
			request.authenticated_url().query(),
			Some("v=20140308&oauth_token=token-123"),
		);

		let unversioned = strategy().profile_request(&AccessToken::new("token-123".into()));

		assert_eq!(unversioned.url.query(), None);
	}

	#[test]
	fn parse_profile_normalizes_the_fixture() {
		let profile =
			strategy().parse_profile(PROFILE_BODY).expect("Fixture body should parse.");

		assert_eq!(profile.provider, "foursquare");
		assert_eq!(profile.id, "1234");
		assert_eq!(profile.display_name, "Eugene Obrezkov");
		assert_eq!(profile.name.given_name, "Eugene");
		assert_eq!(profile.name.family_name, "Obrezkov");
		assert_eq!(profile.emails, vec![ProfileField::new("ghaiklor@gmail.com")]);
		assert_eq!(
			profile.photos,
			vec![ProfileField::new(
				"https://playfoursquare.s3.amazonaws.com/userpix_thumbs/1234.jpg"
			)],
		);
		assert_eq!(profile.raw, PROFILE_BODY);
		assert_eq!(profile.parsed["response"]["user"]["gender"], "male");
	}

	#[test]
	fn parse_profile_overwrites_top_level_id() {
		let body = r#"{
			"id": "stale-top-level",
			"response": {"user": {"id": "1234", "contact": {}}}
		}"#;
		let profile = strategy().parse_profile(body).expect("Body should parse.");

		assert_eq!(profile.parsed["id"], "1234");
	}

	#[test]
	fn parse_profile_defaults_missing_name_parts() {
		let body = r#"{"response": {"user": {"id": "1234", "contact": {}}}}"#;
		let profile = strategy().parse_profile(body).expect("Minimal body should parse.");

		assert_eq!(profile.display_name, " ");
		assert_eq!(profile.name, ProfileName::default());
		assert_eq!(profile.emails, vec![ProfileField::new("")]);

		let body = r#"{"response": {"user": {"id": "1234", "firstName": "Eugene", "contact": {}}}}"#;
		let profile = strategy().parse_profile(body).expect("Partial body should parse.");

		assert_eq!(profile.display_name, "Eugene ");
	}

	#[test]
	fn parse_profile_surfaces_malformed_bodies() {
		let err = strategy()
			.parse_profile("not json at all")
			.expect_err("Invalid JSON must not produce a profile.");

		assert!(matches!(err, Error::Profile(ProfileError::Json { .. })));

		let err = strategy()
			.parse_profile(r#"{"response": {}}"#)
			.expect_err("A body without a user must not produce a profile.");

		assert!(matches!(err, Error::Profile(ProfileError::Shape { .. })));
	}

	#[test]
	fn classify_extracts_structured_meta_detail() {
		let failure = ProfileFetchError::Payload {
			status: 403,
			body: r#"{"meta": {"code": 403, "errorDetail": "invalid token"}}"#.into(),
		};
		let err = strategy().classify_fetch_error(failure);

		assert!(matches!(
			err,
			Error::Provider(ProviderError { code: 403, ref detail }) if detail == "invalid token",
		));
	}

	#[test]
	fn classify_falls_back_on_unparseable_payloads() {
		let failure =
			ProfileFetchError::Payload { status: 502, body: "<html>bad gateway</html>".into() };
		let err = strategy().classify_fetch_error(failure);

		assert!(matches!(
			err,
			Error::Fetch(FetchError::UnrecognizedPayload { status: 502, ref body_preview })
				if body_preview == "<html>bad gateway</html>",
		));
	}

	#[test]
	fn classify_keeps_transport_failures_as_context() {
		let source = std::io::Error::other("connection reset");
		let err = strategy().classify_fetch_error(ProfileFetchError::Transport(Box::new(source)));

		assert!(matches!(err, Error::Fetch(FetchError::Network { .. })));
		assert_eq!(err.to_string(), "Failed to fetch user profile.");
	}

	#[test]
	fn extraction_prefers_body_over_query() {
		let request = FormRequest::new()
			.with_body_param("access_token", "body-token")
			.with_query_param("access_token", "query-token")
			.with_query_param("refresh_token", "query-refresh");
		let pair = strategy()
			.extract_credentials(&request)
			.expect("Request carrying a token should extract.");

		assert_eq!(pair.access_token.secret(), "body-token");
		assert_eq!(
			pair.refresh_token.as_ref().map(|token| token.secret().as_str()),
			Some("query-refresh"),
		);
	}

	#[test]
	fn extraction_fails_with_field_name_for_absent_or_blank_tokens() {
		let missing = strategy()
			.extract_credentials(&FormRequest::new())
			.expect_err("Empty request must not extract.");

		assert_eq!(missing.to_string(), "You should provide access_token.");

		let blank = FormRequest::new().with_body_param("access_token", "");

		assert!(strategy().extract_credentials(&blank).is_err());
	}
}
