// self
use crate::obs::AttemptOutcome;

/// Records an attempt outcome via the global metrics recorder (when enabled).
pub fn record_attempt_outcome(strategy: &'static str, outcome: AttemptOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"token_verifier_attempt_total",
			"strategy" => strategy,
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (strategy, outcome);
	}
}
