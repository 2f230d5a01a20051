//! Rust's turnkey OAuth 2.0 token verifier - authenticate issued access tokens against provider
//! profile endpoints, normalize identities, and emit pipeline-ready outcomes in one crate built
//! for production.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod outcome;
pub mod profile;
pub mod provider;
pub mod request;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		flows::Authenticator,
		http::ReqwestProfileClient,
		outcome::Verify,
		provider::{FoursquareStrategy, StrategyConfigBuilder, TokenStrategy},
		request::FormRequest,
	};

	/// Authenticator type alias used by reqwest-backed integration tests.
	pub type ReqwestTestAuthenticator<U> = Authenticator<FormRequest, U, ReqwestProfileClient>;

	/// Builds a Foursquare config builder seeded with throwaway client credentials.
	pub fn test_foursquare_config() -> StrategyConfigBuilder {
		FoursquareStrategy::config("client-id", "client-secret")
	}

	/// Constructs an [`Authenticator`] backed by the default reqwest transport.
	pub fn build_reqwest_test_authenticator<U>(
		strategy: Arc<dyn TokenStrategy>,
		verify: Arc<dyn Verify<FormRequest, U>>,
	) -> ReqwestTestAuthenticator<U> {
		Authenticator::new(strategy, verify)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use oauth2::{AccessToken, ClientId, ClientSecret, RefreshToken};
	#[cfg(feature = "reqwest")] pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
