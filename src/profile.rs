//! Canonical profile shape normalized from provider payloads.

// crates.io
use serde_json::Value;
// self
use crate::_prelude::*;

/// Single-value entry inside the canonical email/photo lists.
///
/// Providers covered by this crate return one scalar per field, but the
/// canonical shape keeps a list so multi-value providers fit without a
/// contract change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileField {
	/// Field value as returned by the provider.
	pub value: String,
}
impl ProfileField {
	/// Wraps a single provider scalar.
	pub fn new(value: impl Into<String>) -> Self {
		Self { value: value.into() }
	}
}

/// Split name parts carried by the canonical profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileName {
	/// Given ("first") name; empty string when the provider omitted it.
	pub given_name: String,
	/// Family ("last") name; empty string when the provider omitted it.
	pub family_name: String,
}

/// Provider-agnostic user profile consumed by the application verify callback.
///
/// Created once per successful profile fetch, owned solely by the attempt
/// that produced it, and never cached or mutated afterwards.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProfile {
	/// Stable provider tag (e.g. `"foursquare"`).
	pub provider: &'static str,
	/// Provider-scoped user identifier.
	pub id: String,
	/// Two-part display name assembled from the split name parts.
	pub display_name: String,
	/// Split name parts.
	pub name: ProfileName,
	/// Email entries; strategies in this crate populate exactly one.
	pub emails: Vec<ProfileField>,
	/// Photo entries; strategies in this crate populate exactly one.
	pub photos: Vec<ProfileField>,
	/// Verbatim provider response body.
	pub raw: String,
	/// Parsed provider JSON, with the top-level `id` rewritten to the
	/// provider-sourced user identifier.
	pub parsed: Value,
}
