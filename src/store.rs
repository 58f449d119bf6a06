//! Revocation storage contract and built-in store implementations.
//!
//! The contract is deliberately narrow: record a revocation, ask whether an identifier is
//! revoked, and prune entries whose tokens would have expired anyway. Lookups that fail must
//! surface as [`StoreError`] so the service can fail closed instead of treating an
//! unreachable backend as "not revoked".

pub mod file;
pub mod memory;
pub mod prune;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use prune::spawn_prune_task;

// self
use crate::{_prelude::*, auth::RevocationId};

/// Boxed future returned by [`RevocationStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by revocation stores.
///
/// Implementations must make [`add`](Self::add) an atomic upsert keyed by identifier and
/// must give read-your-writes consistency to [`is_revoked`](Self::is_revoked) within a
/// single store instance.
pub trait RevocationStore
where
	Self: Send + Sync,
{
	/// Records a revocation; re-adding an identifier updates its expiry and reason.
	fn add(&self, entry: RevocationEntry) -> StoreFuture<'_, ()>;

	/// Returns whether the identifier is currently revoked.
	fn is_revoked<'a>(&'a self, id: &'a RevocationId) -> StoreFuture<'a, bool>;

	/// Deletes entries whose `expires_at` is strictly before `now`, returning how many went.
	fn prune(&self, now: OffsetDateTime) -> StoreFuture<'_, usize>;
}

/// Persisted revocation record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
	/// Hash of the revoked token.
	pub id: RevocationId,
	/// Instant the token was first revoked.
	#[serde(with = "time::serde::timestamp")]
	pub revoked_at: OffsetDateTime,
	/// Expiry of the underlying token; the entry is prunable afterwards.
	#[serde(with = "time::serde::timestamp")]
	pub expires_at: OffsetDateTime,
	/// Optional free-text reason (e.g. `logout`).
	pub reason: Option<String>,
}
impl RevocationEntry {
	/// Creates an entry without a reason.
	pub fn new(id: RevocationId, revoked_at: OffsetDateTime, expires_at: OffsetDateTime) -> Self {
		Self { id, revoked_at, expires_at, reason: None }
	}

	/// Attaches a reason.
	pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
		self.reason = Some(reason.into());

		self
	}

	/// Returns `true` once the entry may be deleted.
	pub fn is_prunable_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at < now
	}

	/// Folds a repeated revocation into this entry.
	///
	/// The original `revoked_at` is kept; expiry is replaced and the reason is replaced when
	/// the newer entry carries one.
	pub fn absorb(&mut self, newer: RevocationEntry) {
		self.expires_at = newer.expires_at;

		if newer.reason.is_some() {
			self.reason = newer.reason;
		}
	}
}

/// Error type produced by [`RevocationStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend did not answer within the configured bound.
	#[error("Backend did not respond within {millis} ms.")]
	Timeout {
		/// Bound that elapsed, in milliseconds.
		millis: u64,
	},
}

/// Upserts `entry` into an identifier-keyed map.
pub(crate) fn upsert(map: &mut HashMap<RevocationId, RevocationEntry>, entry: RevocationEntry) {
	match map.get_mut(&entry.id) {
		Some(existing) => existing.absorb(entry),
		None => {
			map.insert(entry.id.clone(), entry);
		},
	}
}

/// Drops prunable entries from an identifier-keyed map.
pub(crate) fn retain_live(
	map: &mut HashMap<RevocationId, RevocationEntry>,
	now: OffsetDateTime,
) -> usize {
	let before = map.len();

	map.retain(|_, entry| !entry.is_prunable_at(now));

	before - map.len()
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn store_error_converts_into_service_error_with_source() {
		let store_error = StoreError::Backend { message: "database unreachable".into() };
		let error: Error = store_error.clone().into();

		assert!(matches!(error, Error::Storage(_)));
		assert!(error.to_string().contains("database unreachable"));

		let source = StdError::source(&error)
			.expect("Service error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn absorb_keeps_first_revocation_instant() {
		let id = RevocationId::for_token("token");
		let mut entry = RevocationEntry::new(
			id.clone(),
			macros::datetime!(2025-01-01 00:00 UTC),
			macros::datetime!(2025-01-01 00:30 UTC),
		)
		.with_reason("logout");

		entry.absorb(RevocationEntry::new(
			id.clone(),
			macros::datetime!(2025-01-01 00:10 UTC),
			macros::datetime!(2025-01-08 00:00 UTC),
		));

		assert_eq!(entry.revoked_at, macros::datetime!(2025-01-01 00:00 UTC));
		assert_eq!(entry.expires_at, macros::datetime!(2025-01-08 00:00 UTC));
		assert_eq!(entry.reason.as_deref(), Some("logout"));

		entry.absorb(
			RevocationEntry::new(id, entry.revoked_at, entry.expires_at).with_reason("compromised"),
		);

		assert_eq!(entry.reason.as_deref(), Some("compromised"));
	}

	#[test]
	fn prunable_only_strictly_after_expiry() {
		let expires = macros::datetime!(2025-01-01 00:30 UTC);
		let entry = RevocationEntry::new(
			RevocationId::for_token("token"),
			macros::datetime!(2025-01-01 00:00 UTC),
			expires,
		);

		assert!(!entry.is_prunable_at(expires));
		assert!(entry.is_prunable_at(expires + Duration::seconds(1)));
	}

	#[test]
	fn entry_serializes_with_unix_timestamps() {
		let entry = RevocationEntry::new(
			RevocationId::for_token("token"),
			OffsetDateTime::UNIX_EPOCH,
			OffsetDateTime::UNIX_EPOCH + Duration::minutes(30),
		);
		let value = serde_json::to_value(&entry).expect("Entry should serialize to JSON.");

		assert_eq!(value["revoked_at"], 0);
		assert_eq!(value["expires_at"], 1800);
		assert!(value["reason"].is_null());
	}
}
