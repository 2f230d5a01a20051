// self
use crate::_prelude::*;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedAttempt<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedAttempt<F> = F;

/// A span builder used by the attempt dispatcher.
#[derive(Clone, Debug)]
pub struct AttemptSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl AttemptSpan {
	/// Creates a new span tagged with the provided strategy + stage.
	pub fn new(strategy: &'static str, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("token_verifier.attempt", strategy, stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (strategy, stage);

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> AttemptSpanGuard {
		#[cfg(feature = "tracing")]
		{
			AttemptSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			AttemptSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedAttempt<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`AttemptSpan::entered`].
pub struct AttemptSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for AttemptSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("AttemptSpanGuard(..)")
	}
}
