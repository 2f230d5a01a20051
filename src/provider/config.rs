//! Immutable strategy configuration resolved at construction time.

// crates.io
use oauth2::{AuthUrl, EndpointNotSet, EndpointSet, TokenUrl, basic::BasicClient};
// self
use crate::{_prelude::*, error::ConfigError, http::TokenPlacement};

/// Configured `oauth2` client type assembled from strategy endpoints.
pub type ConfiguredOAuthClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Immutable configuration shared by every attempt a strategy serves.
///
/// Constructed once through [`StrategyConfigBuilder`] and read-only for the
/// strategy's lifetime; request-scoped operations receive it explicitly so
/// the core stays free of hidden cross-request state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategyConfig {
	/// OAuth 2.0 client identifier forwarded to the provider.
	pub client_id: ClientId,
	/// OAuth 2.0 client secret proving ownership of the identifier.
	pub client_secret: ClientSecret,
	/// Provider authorization endpoint, forwarded to the OAuth2 client
	/// collaborator assembled by [`StrategyConfig::oauth_client`].
	pub authorization_url: Url,
	/// Provider token endpoint, forwarded alongside the authorization URL.
	pub token_url: Url,
	/// Provider profile endpoint fetched on every attempt.
	pub profile_url: Url,
	/// Optional provider API version appended to profile fetches as `v=`.
	pub api_version: Option<String>,
	/// Request field name the access token is read from.
	pub access_token_field: String,
	/// Request field name the refresh token is read from.
	pub refresh_token_field: String,
	/// Passes the inbound request to the verify callback when set.
	pub pass_request_to_verify: bool,
	/// How the bearer token is presented on profile requests.
	pub token_placement: TokenPlacement,
}
impl StrategyConfig {
	/// Creates a new builder seeded with the provided client credentials.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> StrategyConfigBuilder {
		StrategyConfigBuilder::new(client_id, client_secret)
	}

	/// Returns the profile endpoint with the API version applied.
	pub fn versioned_profile_url(&self) -> Url {
		let mut url = self.profile_url.clone();

		if let Some(version) = &self.api_version {
			url.query_pairs_mut().append_pair("v", version);
		}

		url
	}

	/// Assembles the OAuth2 client collaborator for code/token exchanges.
	///
	/// The verifier itself never runs the handshake; hosts that do can reuse
	/// the same credentials and endpoints this strategy was configured with.
	pub fn oauth_client(&self) -> Result<ConfiguredOAuthClient, ConfigError> {
		let auth_url = AuthUrl::new(self.authorization_url.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "authorization", source })?;
		let token_url = TokenUrl::new(self.token_url.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "token", source })?;

		Ok(BasicClient::new(self.client_id.clone())
			.set_client_secret(self.client_secret.clone())
			.set_auth_uri(auth_url)
			.set_token_uri(token_url))
	}
}

/// Builder for [`StrategyConfig`] values.
///
/// Provider modules seed well-known endpoint defaults with the `default_*`
/// methods; explicit `*_url` overrides always win. Validation happens once
/// in [`StrategyConfigBuilder::build`].
#[derive(Debug)]
pub struct StrategyConfigBuilder {
	client_id: String,
	client_secret: String,
	authorization_url: Option<Url>,
	token_url: Option<Url>,
	profile_url: Option<Url>,
	default_authorization_url: Option<&'static str>,
	default_token_url: Option<&'static str>,
	default_profile_url: Option<&'static str>,
	api_version: Option<String>,
	access_token_field: String,
	refresh_token_field: String,
	pass_request_to_verify: bool,
	token_placement: TokenPlacement,
}
impl StrategyConfigBuilder {
	/// Creates a new builder seeded with the provided client credentials.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			authorization_url: None,
			token_url: None,
			profile_url: None,
			default_authorization_url: None,
			default_token_url: None,
			default_profile_url: None,
			api_version: None,
			access_token_field: "access_token".into(),
			refresh_token_field: "refresh_token".into(),
			pass_request_to_verify: false,
			token_placement: TokenPlacement::BearerHeader,
		}
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_url(mut self, url: Url) -> Self {
		self.authorization_url = Some(url);

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: Url) -> Self {
		self.token_url = Some(url);

		self
	}

	/// Overrides the profile endpoint.
	pub fn profile_url(mut self, url: Url) -> Self {
		self.profile_url = Some(url);

		self
	}

	/// Seeds the provider's well-known authorization endpoint.
	pub fn default_authorization_url(mut self, url: &'static str) -> Self {
		self.default_authorization_url = Some(url);

		self
	}

	/// Seeds the provider's well-known token endpoint.
	pub fn default_token_url(mut self, url: &'static str) -> Self {
		self.default_token_url = Some(url);

		self
	}

	/// Seeds the provider's well-known profile endpoint.
	pub fn default_profile_url(mut self, url: &'static str) -> Self {
		self.default_profile_url = Some(url);

		self
	}

	/// Sets the provider API version appended to profile fetches.
	pub fn api_version(mut self, version: impl Into<String>) -> Self {
		self.api_version = Some(version.into());

		self
	}

	/// Overrides the request field name the access token is read from.
	pub fn access_token_field(mut self, field: impl Into<String>) -> Self {
		self.access_token_field = field.into();

		self
	}

	/// Overrides the request field name the refresh token is read from.
	pub fn refresh_token_field(mut self, field: impl Into<String>) -> Self {
		self.refresh_token_field = field.into();

		self
	}

	/// Passes the inbound request to the verify callback.
	pub fn pass_request_to_verify(mut self, pass: bool) -> Self {
		self.pass_request_to_verify = pass;

		self
	}

	/// Overrides how the bearer token is presented on profile requests.
	pub fn token_placement(mut self, placement: TokenPlacement) -> Self {
		self.token_placement = placement;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<StrategyConfig, ConfigError> {
		if self.client_id.is_empty() {
			return Err(ConfigError::MissingClientId);
		}
		if self.client_secret.is_empty() {
			return Err(ConfigError::MissingClientSecret);
		}
		if self.access_token_field.is_empty() {
			return Err(ConfigError::EmptyCredentialField { field: "access token" });
		}
		if self.refresh_token_field.is_empty() {
			return Err(ConfigError::EmptyCredentialField { field: "refresh token" });
		}

		let authorization_url = resolve_endpoint(
			"authorization",
			self.authorization_url,
			self.default_authorization_url,
		)?;
		let token_url = resolve_endpoint("token", self.token_url, self.default_token_url)?;
		let profile_url = resolve_endpoint("profile", self.profile_url, self.default_profile_url)?;

		Ok(StrategyConfig {
			client_id: ClientId::new(self.client_id),
			client_secret: ClientSecret::new(self.client_secret),
			authorization_url,
			token_url,
			profile_url,
			api_version: self.api_version,
			access_token_field: self.access_token_field,
			refresh_token_field: self.refresh_token_field,
			pass_request_to_verify: self.pass_request_to_verify,
			token_placement: self.token_placement,
		})
	}
}

fn resolve_endpoint(
	endpoint: &'static str,
	overridden: Option<Url>,
	fallback: Option<&'static str>,
) -> Result<Url, ConfigError> {
	if let Some(url) = overridden {
		return Ok(url);
	}

	let raw = fallback.ok_or(ConfigError::MissingEndpoint { endpoint })?;

	Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint { endpoint, source })
}
