// self
use crate::{
	_prelude::*,
	auth::{Claims, RevocationId, TokenKind, VerifiedToken},
	obs::Operation,
	service::{self, TokenService},
	store::StoreError,
};

impl TokenService {
	/// Verifies `token` as a live, unrevoked token of the `expected` kind.
	///
	/// Decoding failures are reported before the store is consulted. A store that errors or
	/// exceeds the configured timeout yields [`Error::RevocationCheckFailed`]; the token is
	/// never treated as valid in that case.
	pub async fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims> {
		service::observed(Operation::Verify, "verify", self.verify_unobserved(token, expected))
			.await
	}

	/// Verifies an access token and returns the introspection view `{subject, expires_at}`.
	pub async fn introspect(&self, token: &str) -> Result<VerifiedToken> {
		let claims = service::observed(
			Operation::Verify,
			"introspect",
			self.verify_unobserved(token, TokenKind::Access),
		)
		.await?;

		Ok(VerifiedToken { subject: claims.subject, expires_at: claims.expires_at })
	}

	pub(super) async fn verify_unobserved(&self, token: &str, expected: TokenKind) -> Result<Claims> {
		let claims = self.codec.decode(token, expected, self.now())?;

		if self.is_revoked(&RevocationId::for_token(token)).await? {
			return Err(Error::Revoked);
		}

		Ok(claims)
	}

	async fn is_revoked(&self, id: &RevocationId) -> Result<bool> {
		let lookup = self.store.is_revoked(id);
		let answer = match self.revocation_timeout {
			Some(limit) => tokio::time::timeout(limit, lookup).await.unwrap_or_else(|_| {
				let millis = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);

				Err(StoreError::Timeout { millis })
			}),
			None => lookup.await,
		};

		answer.map_err(|source| Error::RevocationCheckFailed { source })
	}
}
