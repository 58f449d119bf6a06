// self
use crate::{
	_prelude::*,
	auth::{AccessGrant, TokenKind, TokenType},
	obs::Operation,
	service::{self, TokenService},
};

impl TokenService {
	/// Exchanges a valid refresh token for a new access token.
	///
	/// The refresh token itself is neither rotated nor revoked, so it can be exchanged
	/// repeatedly until it expires or is revoked explicitly.
	pub async fn refresh(&self, refresh_token: &str) -> Result<AccessGrant> {
		service::observed(Operation::Refresh, "refresh", self.exchange(refresh_token)).await
	}

	async fn exchange(&self, refresh_token: &str) -> Result<AccessGrant> {
		let claims = self.verify_unobserved(refresh_token, TokenKind::Refresh).await?;
		let access_token = self.codec.encode(&claims.subject, TokenKind::Access, self.now())?;

		Ok(AccessGrant { access_token, token_type: TokenType::Bearer })
	}
}
