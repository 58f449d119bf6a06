//! Background housekeeping for revocation stores.

// crates.io
use tokio::{task::JoinHandle, time::MissedTickBehavior};
// self
use crate::{
	_prelude::*,
	clock::Clock,
	obs::{Operation, OperationSpan},
	store::RevocationStore,
};

/// Spawns a task that prunes `store` every `period` using `clock` for the cutoff.
///
/// Failed passes are logged and retried on the next tick. Abort the returned handle to stop
/// the task. Must be called from within a Tokio runtime.
pub fn spawn_prune_task(
	store: Arc<dyn RevocationStore>,
	clock: Arc<dyn Clock>,
	period: std::time::Duration,
) -> JoinHandle<()> {
	tokio::spawn(async move {
		let mut ticker = tokio::time::interval(period);

		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

		loop {
			ticker.tick().await;

			let pass = store.prune(clock.now());
			let _ = OperationSpan::start(Operation::Prune, "prune_task")
				.instrument(async move { pass.await.map_err(Error::from) })
				.await;
		}
	})
}
