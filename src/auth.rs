//! Bearer credential models extracted from inbound requests.

// self
use crate::_prelude::*;

/// Bearer credential pair located in a single inbound request.
///
/// Produced fresh per request and consumed exactly once by the profile
/// resolver; never persisted or shared across in-flight attempts. The
/// refresh token is opaque data handed through to the verify callback.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenPair {
	/// Access token presented by the client.
	pub access_token: AccessToken,
	/// Optional refresh token accompanying the access token.
	pub refresh_token: Option<RefreshToken>,
}
impl TokenPair {
	/// Wraps raw credential strings extracted from a request.
	pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
		Self {
			access_token: AccessToken::new(access_token.into()),
			refresh_token: refresh_token.map(RefreshToken::new),
		}
	}
}
