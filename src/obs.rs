//! Optional observability helpers for authentication attempts.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `token_verifier.attempt` with the `strategy`
//!   and `stage` (call site) fields.
//! - Enable `metrics` to increment the `token_verifier_attempt_total` counter for every
//!   attempt/success/fail/error, labeled by `strategy` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each authentication attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttemptOutcome {
	/// Entry to the dispatcher.
	Attempt,
	/// Attempt terminated in the success signal.
	Success,
	/// Attempt terminated in the fail signal.
	Fail,
	/// Attempt terminated in the error signal.
	Error,
}
impl AttemptOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AttemptOutcome::Attempt => "attempt",
			AttemptOutcome::Success => "success",
			AttemptOutcome::Fail => "fail",
			AttemptOutcome::Error => "error",
		}
	}
}
impl Display for AttemptOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
