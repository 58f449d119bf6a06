//! Thread-safe in-memory [`RevocationStore`] implementation for single-process deployments and
//! tests.

// self
use crate::{
	_prelude::*,
	auth::RevocationId,
	store::{self, RevocationEntry, RevocationStore, StoreFuture},
};

type EntryMap = Arc<RwLock<HashMap<RevocationId, RevocationEntry>>>;

/// Storage backend that keeps revocations in-process.
///
/// Entries do not survive a restart; revoked tokens become valid again until they expire.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(EntryMap);
impl MemoryStore {
	/// Returns a copy of the entry recorded for `id`, if any.
	pub fn get(&self, id: &RevocationId) -> Option<RevocationEntry> {
		self.0.read().get(id).cloned()
	}

	/// Number of entries currently held.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when nothing is recorded.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn add_now(map: EntryMap, entry: RevocationEntry) {
		store::upsert(&mut map.write(), entry);
	}

	fn prune_now(map: EntryMap, now: OffsetDateTime) -> usize {
		store::retain_live(&mut map.write(), now)
	}
}
impl RevocationStore for MemoryStore {
	fn add(&self, entry: RevocationEntry) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			Self::add_now(map, entry);

			Ok(())
		})
	}

	fn is_revoked<'a>(&'a self, id: &'a RevocationId) -> StoreFuture<'a, bool> {
		let map = self.0.clone();

		Box::pin(async move { Ok(map.read().contains_key(id)) })
	}

	fn prune(&self, now: OffsetDateTime) -> StoreFuture<'_, usize> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::prune_now(map, now)) })
	}
}
