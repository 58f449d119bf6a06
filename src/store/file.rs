//! File-backed [`RevocationStore`] that survives restarts without an external database.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::RevocationId,
	store::{self, RevocationEntry, RevocationStore, StoreError, StoreFuture},
};

/// Persists revocations to a JSON file after each mutation.
///
/// Reads are served from memory; every `add` or non-empty `prune` rewrites the snapshot
/// through a temporary file and an atomic rename. The in-memory view only changes once that
/// write has succeeded.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<HashMap<RevocationId, RevocationEntry>>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Location of the snapshot file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<HashMap<RevocationId, RevocationEntry>, StoreError> {
		if !path.exists() {
			return Ok(HashMap::new());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		if bytes.is_empty() {
			return Ok(HashMap::new());
		}

		let entries: Vec<RevocationEntry> =
			serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
				message: format!("Failed to parse {}: {e}", path.display()),
			})?;

		Ok(entries.into_iter().map(|entry| (entry.id.clone(), entry)).collect())
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(
		&self,
		contents: &HashMap<RevocationId, RevocationEntry>,
	) -> Result<(), StoreError> {
		let mut snapshot: Vec<_> = contents.values().collect();

		// Stable ordering keeps snapshots diffable.
		snapshot.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

		let serialized =
			serde_json::to_vec_pretty(&snapshot).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize store snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl RevocationStore for FileStore {
	fn add(&self, entry: RevocationEntry) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();
			let mut next = guard.clone();

			store::upsert(&mut next, entry);
			self.persist_locked(&next)?;

			*guard = next;

			Ok(())
		})
	}

	fn is_revoked<'a>(&'a self, id: &'a RevocationId) -> StoreFuture<'a, bool> {
		Box::pin(async move { Ok(self.inner.read().contains_key(id)) })
	}

	fn prune(&self, now: OffsetDateTime) -> StoreFuture<'_, usize> {
		Box::pin(async move {
			let mut guard = self.inner.write();
			let mut next = guard.clone();
			let removed = store::retain_live(&mut next, now);

			if removed > 0 {
				self.persist_locked(&next)?;

				*guard = next;
			}

			Ok(removed)
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;

	fn temp_path(label: &str) -> PathBuf {
		let unique = format!(
			"token_warden_file_store_{label}_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	fn entry(token: &str, expires_in: Duration) -> RevocationEntry {
		RevocationEntry::new(
			RevocationId::for_token(token),
			OffsetDateTime::UNIX_EPOCH,
			OffsetDateTime::UNIX_EPOCH + expires_in,
		)
	}

	#[test]
	fn revocations_survive_reopen() {
		let path = temp_path("reopen");
		let store = FileStore::open(&path).expect("Failed to open file store snapshot.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");
		let id = RevocationId::for_token("refresh-token");

		rt.block_on(store.add(entry("refresh-token", Duration::days(7)).with_reason("logout")))
			.expect("Failed to record revocation in file store.");
		drop(store);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");

		assert!(
			rt.block_on(reopened.is_revoked(&id))
				.expect("Lookup against reopened file store should succeed.")
		);
		assert!(
			!rt.block_on(reopened.is_revoked(&RevocationId::for_token("other-token")))
				.expect("Lookup against reopened file store should succeed.")
		);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn prune_is_persisted() {
		let path = temp_path("prune");
		let store = FileStore::open(&path).expect("Failed to open file store snapshot.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		rt.block_on(store.add(entry("short-lived", Duration::minutes(30))))
			.expect("Failed to record short-lived revocation.");
		rt.block_on(store.add(entry("long-lived", Duration::days(7))))
			.expect("Failed to record long-lived revocation.");

		let removed = rt
			.block_on(store.prune(OffsetDateTime::UNIX_EPOCH + Duration::hours(1)))
			.expect("Prune should succeed.");

		assert_eq!(removed, 1);
		drop(store);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store snapshot.");

		assert!(
			!rt.block_on(reopened.is_revoked(&RevocationId::for_token("short-lived")))
				.expect("Lookup should succeed.")
		);
		assert!(
			rt.block_on(reopened.is_revoked(&RevocationId::for_token("long-lived")))
				.expect("Lookup should succeed.")
		);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn failed_writes_leave_memory_untouched() {
		let dir = temp_path("unwritable").with_extension("d");
		let store =
			FileStore::open(dir.join("revocations.json")).expect("Failed to open file store snapshot.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		rt.block_on(store.add(entry("expired", Duration::minutes(30))))
			.expect("Failed to record revocation before removing the directory.");
		fs::remove_dir_all(&dir).unwrap_or_else(|e| {
			panic!("Failed to remove temporary store directory {}: {e}", dir.display())
		});

		let err = rt
			.block_on(store.add(entry("fresh", Duration::days(7))))
			.expect_err("Adding without a writable directory should fail.");

		assert!(matches!(err, StoreError::Backend { .. }));
		assert!(
			!rt.block_on(store.is_revoked(&RevocationId::for_token("fresh")))
				.expect("Lookup should succeed.")
		);

		rt.block_on(store.prune(OffsetDateTime::UNIX_EPOCH + Duration::hours(1)))
			.expect_err("Pruning without a writable directory should fail.");

		assert!(
			rt.block_on(store.is_revoked(&RevocationId::for_token("expired")))
				.expect("Lookup should succeed.")
		);
	}

	#[test]
	fn corrupt_snapshot_is_reported() {
		let path = temp_path("corrupt");

		fs::write(&path, b"{not json").expect("Failed to write corrupt snapshot fixture.");

		let err = FileStore::open(&path).expect_err("Corrupt snapshot should fail to load.");

		assert!(matches!(err, StoreError::Serialization { .. }));

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}
}
