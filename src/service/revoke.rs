// self
use crate::{
	_prelude::*,
	auth::{RevocationId, TokenKind, token::claims},
	obs::Operation,
	service::{self, TokenService},
	store::RevocationEntry,
};

impl TokenService {
	/// Revokes `token` of either kind, recording an optional `reason`.
	///
	/// The entry expires with the token so it can be pruned afterwards. A token that does not
	/// decode under either key is still recorded, kept for the longest lifetime any genuine
	/// token can have. Revoking the same token again succeeds and keeps the first revocation
	/// instant.
	pub async fn revoke(&self, token: &str, reason: Option<String>) -> Result<()> {
		service::observed(Operation::Revoke, "revoke", self.revoke_unobserved(token, reason)).await
	}

	/// Verifies `access_token` and revokes it with reason `logout`.
	pub async fn logout(&self, access_token: &str) -> Result<()> {
		service::observed(Operation::Logout, "logout", self.logout_unobserved(access_token)).await
	}

	/// Deletes revocation entries whose tokens have expired; returns how many were removed.
	pub async fn prune(&self) -> Result<usize> {
		service::observed(Operation::Prune, "prune", async move {
			self.store.prune(self.now()).await.map_err(Error::from)
		})
		.await
	}

	async fn logout_unobserved(&self, access_token: &str) -> Result<()> {
		self.verify_unobserved(access_token, TokenKind::Access).await?;
		self.revoke_unobserved(access_token, Some("logout".into())).await
	}

	async fn revoke_unobserved(&self, token: &str, reason: Option<String>) -> Result<()> {
		let now = claims::truncate_to_seconds(self.now());
		let expires_at = match self.codec.inspect(token) {
			Some(decoded) => decoded.expires_at,
			None => now.saturating_add(self.codec.ttl(TokenKind::Refresh)),
		};
		let entry = RevocationEntry {
			id: RevocationId::for_token(token),
			revoked_at: now,
			expires_at,
			reason,
		};

		Ok(self.store.add(entry).await?)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::build_test_service, auth::Subject};

	fn alice() -> Subject {
		Subject::new("alice@example.com").expect("Subject fixture should be valid.")
	}

	#[tokio::test]
	async fn entry_expires_with_the_token() {
		let (service, store, _) = build_test_service(OffsetDateTime::UNIX_EPOCH);
		let pair = service.issue_pair(&alice()).expect("Issuing a pair should succeed.");

		service
			.revoke(pair.access_token.expose(), Some("compromised".into()))
			.await
			.expect("Revoking an access token should succeed.");

		let entry = store
			.get(&pair.access_token.revocation_id())
			.expect("Revoked access token should be recorded.");

		assert_eq!(entry.expires_at.unix_timestamp(), 1800);
		assert_eq!(entry.revoked_at, OffsetDateTime::UNIX_EPOCH);
		assert_eq!(entry.reason.as_deref(), Some("compromised"));
	}

	#[tokio::test]
	async fn unparseable_tokens_are_held_for_the_refresh_lifetime() {
		let (service, store, _) = build_test_service(OffsetDateTime::UNIX_EPOCH);

		service.revoke("garbage", None).await.expect("Revoking garbage should still succeed.");

		let entry = store
			.get(&RevocationId::for_token("garbage"))
			.expect("Unparseable token should still be recorded.");

		assert_eq!(entry.expires_at.unix_timestamp(), 7 * 86_400);
	}

	#[tokio::test]
	async fn logout_revokes_the_access_token_only() {
		let (service, store, _) = build_test_service(OffsetDateTime::UNIX_EPOCH);
		let pair = service.issue_pair(&alice()).expect("Issuing a pair should succeed.");

		service.logout(pair.access_token.expose()).await.expect("Logout should succeed.");

		let entry = store
			.get(&pair.access_token.revocation_id())
			.expect("Logged-out access token should be recorded.");

		assert_eq!(entry.reason.as_deref(), Some("logout"));
		assert!(matches!(
			service.verify(pair.access_token.expose(), TokenKind::Access).await,
			Err(Error::Revoked)
		));
		assert!(matches!(service.logout(pair.access_token.expose()).await, Err(Error::Revoked)));

		service
			.refresh(pair.refresh_token.expose())
			.await
			.expect("Refresh token should remain usable after logout.");
	}

	#[tokio::test]
	async fn prune_uses_the_service_clock() {
		let (service, store, clock) = build_test_service(OffsetDateTime::UNIX_EPOCH);
		let pair = service.issue_pair(&alice()).expect("Issuing a pair should succeed.");

		service.revoke(pair.access_token.expose(), None).await.expect("Revoke should succeed.");
		service.revoke(pair.refresh_token.expose(), None).await.expect("Revoke should succeed.");

		assert_eq!(service.prune().await.expect("Prune should succeed."), 0);

		clock.advance(Duration::hours(1));

		assert_eq!(service.prune().await.expect("Prune should succeed."), 1);
		assert_eq!(store.len(), 1);
		assert!(store.get(&pair.refresh_token.revocation_id()).is_some());
	}
}
