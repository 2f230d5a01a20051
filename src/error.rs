//! Verifier-level error types shared across strategies, transports, and the dispatcher.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical verifier error exposed by public APIs.
///
/// Every variant maps onto the "error" channel of the pipeline outcome
/// contract; client-input problems (a missing access token) never appear
/// here because they terminate as a "fail" outcome instead.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provider rejected the profile request with a structured error body.
	#[error(transparent)]
	Provider(#[from] ProviderError),
	/// Profile fetch failed without a recognizable provider payload.
	#[error(transparent)]
	Fetch(#[from] FetchError),
	/// Provider returned a success body that could not be interpreted.
	#[error(transparent)]
	Profile(#[from] ProfileError),
	/// Application verify callback reported a failure while deciding.
	#[error("Verify callback failed.")]
	Verify(#[source] BoxError),
}

/// Configuration and validation failures raised at construction time.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client identifier must be present for request signing.
	#[error("Client identifier must not be empty.")]
	MissingClientId,
	/// Client secret must be present for request signing.
	#[error("Client secret must not be empty.")]
	MissingClientSecret,
	/// Credential field names must be non-empty lookup keys.
	#[error("The {field} lookup field name must not be empty.")]
	EmptyCredentialField {
		/// Which lookup field failed validation.
		field: &'static str,
	},
	/// Strategy endpoint was neither overridden nor defaulted.
	#[error("The {endpoint} endpoint URL is missing.")]
	MissingEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
	},
	/// Strategy endpoint URL could not be parsed.
	#[error("The {endpoint} endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
}

/// Structured error decoded from a provider `meta` payload.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Provider rejected the profile request: {detail} (code {code}).")]
pub struct ProviderError {
	/// Provider-supplied numeric error code.
	pub code: i64,
	/// Provider-supplied human-readable error detail.
	pub detail: String,
}

/// Profile-fetch failures without structured provider detail.
#[derive(Debug, ThisError)]
pub enum FetchError {
	/// Underlying transport reported a network failure.
	#[error("Failed to fetch user profile.")]
	Network {
		/// Transport-specific failure retained as context.
		#[source]
		source: BoxError,
	},
	/// Provider answered with a non-success status whose payload carried no
	/// recognizable error detail.
	#[error("Failed to fetch user profile: HTTP {status}.")]
	UnrecognizedPayload {
		/// HTTP status code returned by the provider.
		status: u16,
		/// Truncated payload text kept for diagnostics.
		body_preview: String,
	},
}
impl FetchError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}

/// Failures interpreting a provider success body.
#[derive(Debug, ThisError)]
pub enum ProfileError {
	/// Body is not valid JSON.
	#[error("Profile response body is not valid JSON.")]
	Json {
		/// Structured parsing failure including the failing path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Body parsed as JSON but does not match the expected schema.
	#[error("Profile response body does not match the expected schema.")]
	Shape {
		/// Structured deserialization failure including the failing path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
