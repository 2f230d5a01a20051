//! Inbound request boundary consulted during credential extraction.

// self
use crate::_prelude::*;

/// Object-safe view over an inbound request's parsed parameters.
///
/// Strategies read named fields from the request body and query string only;
/// cookies, headers, and session state are never consulted. Hosting
/// pipelines implement this trait for their own request type, returning
/// owned values so no framework lifetime leaks into the verifier.
pub trait CredentialSource {
	/// Returns the body parameter stored under `name`, if any.
	fn body_param(&self, name: &str) -> Option<String>;

	/// Returns the query parameter stored under `name`, if any.
	fn query_param(&self, name: &str) -> Option<String>;
}

/// Map-backed [`CredentialSource`] for tests and simple framework adapters.
#[derive(Clone, Debug, Default)]
pub struct FormRequest {
	body: HashMap<String, String>,
	query: HashMap<String, String>,
}
impl FormRequest {
	/// Creates an empty request carrying no parameters.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a body parameter.
	pub fn with_body_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.body.insert(name.into(), value.into());

		self
	}

	/// Adds a query parameter.
	pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.insert(name.into(), value.into());

		self
	}
}
impl CredentialSource for FormRequest {
	fn body_param(&self, name: &str) -> Option<String> {
		self.body.get(name).cloned()
	}

	fn query_param(&self, name: &str) -> Option<String> {
		self.query.get(name).cloned()
	}
}
