//! Transport primitives for authenticated profile fetches.
//!
//! The module exposes [`ProfileHttpClient`] alongside [`ProfileRequest`] and
//! [`TokenPlacement`] so downstream crates can integrate custom HTTP clients.
//! A transport performs exactly one authenticated GET per call and reports
//! the two raw failure channels the strategies classify: a provider payload
//! (non-success status plus body) or a transport fault with no payload.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

/// Boxed future returned by [`ProfileHttpClient::fetch`].
pub type ProfileFetchFuture<'a> =
	Pin<Box<dyn Future<Output = Result<String, ProfileFetchError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing profile fetches.
///
/// The trait is the verifier's only dependency on an HTTP stack. Callers
/// provide an implementation (typically behind `Arc<T>`) and the dispatcher
/// issues one `fetch` per authentication attempt. Implementations must be
/// `Send + Sync + 'static` so they can be shared across dispatchers, and the
/// returned futures must be `Send` for the lifetime of the in-flight call.
///
/// Timeouts and cancellation are the transport's responsibility; the
/// verifier never retries and waits indefinitely on a transport that never
/// completes.
pub trait ProfileHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Executes an authenticated GET for the prepared profile request.
	///
	/// A success (2xx) response resolves to the verbatim body text. Any
	/// non-success status resolves to [`ProfileFetchError::Payload`] carrying
	/// the raw body so strategies can mine it for structured error detail.
	fn fetch<'a>(&'a self, request: &'a ProfileRequest) -> ProfileFetchFuture<'a>;
}

/// Raw profile-fetch failure reported by a transport before classification.
#[derive(Debug, ThisError)]
pub enum ProfileFetchError {
	/// Provider answered with a non-success status and a raw payload.
	#[error("Provider responded with HTTP {status}.")]
	Payload {
		/// HTTP status code returned by the provider.
		status: u16,
		/// Verbatim response body; may or may not be structured JSON.
		body: String,
	},
	/// The transport failed before a provider payload was available.
	#[error("Transport failed before a provider response was available.")]
	Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// How a strategy presents the bearer token on the profile request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPlacement {
	/// Appended to the request URL under the given query parameter name.
	QueryParameter(String),
	/// Sent as an `Authorization: Bearer` request header.
	BearerHeader,
}
impl TokenPlacement {
	/// Query-parameter placement under `name`.
	pub fn query(name: impl Into<String>) -> Self {
		Self::QueryParameter(name.into())
	}
}

/// Prepared profile request handed to the transport.
///
/// The URL already carries any API-version query parameter; the bearer token
/// is attached by the transport according to [`TokenPlacement`].
#[derive(Clone, Debug)]
pub struct ProfileRequest {
	/// Profile endpoint to fetch.
	pub url: Url,
	/// Bearer access token proving the client's grant.
	pub access_token: AccessToken,
	/// Token presentation mode for this provider.
	pub placement: TokenPlacement,
}
impl ProfileRequest {
	/// Returns the request URL with the token applied for query placements.
	pub fn authenticated_url(&self) -> Url {
		let mut url = self.url.clone();

		if let TokenPlacement::QueryParameter(name) = &self.placement {
			url.query_pairs_mut().append_pair(name, self.access_token.secret());
		}

		url
	}

	/// Returns the `Authorization` header value for header placements.
	pub fn bearer_header(&self) -> Option<String> {
		matches!(self.placement, TokenPlacement::BearerHeader)
			.then(|| format!("Bearer {}", self.access_token.secret()))
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. Profile fetches follow the client's configured redirect policy;
/// configure the [`ReqwestClient`] before wrapping when a provider requires
/// something custom.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestProfileClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestProfileClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestProfileClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestProfileClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProfileHttpClient for ReqwestProfileClient {
	fn fetch<'a>(&'a self, request: &'a ProfileRequest) -> ProfileFetchFuture<'a> {
		Box::pin(async move {
			let mut builder = self.0.get(request.authenticated_url());

			if let Some(header) = request.bearer_header() {
				builder = builder.header(reqwest::header::AUTHORIZATION, header);
			}

			let response = builder
				.send()
				.await
				.map_err(|err| ProfileFetchError::Transport(Box::new(err)))?;
			let status = response.status();
			let body = response
				.text()
				.await
				.map_err(|err| ProfileFetchError::Transport(Box::new(err)))?;

			if status.is_success() {
				Ok(body)
			} else {
				Err(ProfileFetchError::Payload { status: status.as_u16(), body })
			}
		})
	}
}
