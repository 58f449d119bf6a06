// self
use crate::{
	_prelude::*,
	obs::{Operation, Outcome, record_outcome},
};

/// One observed call of a service operation.
///
/// Opening it records the attempt; [`in_scope`](Self::in_scope) and
/// [`instrument`](Self::instrument) run the operation body inside the `token_warden.op` span and
/// record how it ended. Token-validity rejections are expected traffic and log at `debug`;
/// infrastructure failures log at `warn`. Token material never reaches the log line.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	op: Operation,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Opens a span for `op` at call site `stage` and records the attempt.
	pub fn start(op: Operation, stage: &'static str) -> Self {
		record_outcome(op, Outcome::Attempt);

		#[cfg(feature = "tracing")]
		let span = tracing::info_span!("token_warden.op", op = op.as_str(), stage);
		#[cfg(not(feature = "tracing"))]
		let _ = stage;

		Self {
			op,
			#[cfg(feature = "tracing")]
			span,
		}
	}

	/// Runs a synchronous operation body inside the span.
	pub fn in_scope<T>(self, body: impl FnOnce() -> Result<T>) -> Result<T> {
		#[cfg(feature = "tracing")]
		let result = self.span.in_scope(body);
		#[cfg(not(feature = "tracing"))]
		let result = body();

		self.finish(&result);

		result
	}

	/// Awaits an async operation body inside the span without holding a guard across `.await`.
	pub async fn instrument<T, Fut>(self, fut: Fut) -> Result<T>
	where
		Fut: Future<Output = Result<T>>,
	{
		#[cfg(feature = "tracing")]
		let result = {
			use tracing::Instrument;

			fut.instrument(self.span.clone()).await
		};
		#[cfg(not(feature = "tracing"))]
		let result = fut.await;

		self.finish(&result);

		result
	}

	fn finish<T>(&self, result: &Result<T>) {
		match result {
			Ok(_) => record_outcome(self.op, Outcome::Success),
			Err(e) => {
				record_outcome(self.op, Outcome::Failure);
				self.log_failure(e);
			},
		}
	}

	fn log_failure(&self, error: &Error) {
		#[cfg(feature = "tracing")]
		{
			let _entered = self.span.enter();

			if error.is_retryable() {
				tracing::warn!(kind = error.kind(), error = %error, "operation failed");
			} else {
				tracing::debug!(kind = error.kind(), "operation rejected");
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = error;
		}
	}
}
