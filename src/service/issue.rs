// self
use crate::{
	_prelude::*,
	auth::{Subject, TokenKind, TokenPair, TokenType},
	obs::{Operation, OperationSpan},
	service::TokenService,
};

impl TokenService {
	/// Mints an access + refresh pair for `subject`, both issued at the same instant.
	pub fn issue_pair(&self, subject: &Subject) -> Result<TokenPair> {
		OperationSpan::start(Operation::Issue, "issue_pair").in_scope(|| self.mint_pair(subject))
	}

	pub(super) fn mint_pair(&self, subject: &Subject) -> Result<TokenPair> {
		let now = self.now();

		Ok(TokenPair {
			access_token: self.codec.encode(subject, TokenKind::Access, now)?,
			refresh_token: self.codec.encode(subject, TokenKind::Refresh, now)?,
			token_type: TokenType::Bearer,
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::build_test_service;

	#[test]
	fn pair_shares_subject_and_issue_instant() {
		let (service, _, _) = build_test_service(OffsetDateTime::UNIX_EPOCH);
		let subject = Subject::new("alice@example.com").expect("Subject fixture should be valid.");
		let pair = service.issue_pair(&subject).expect("Issuing a pair should succeed.");
		let access = service
			.codec()
			.inspect(pair.access_token.expose())
			.expect("Access token should carry genuine claims.");
		let refresh = service
			.codec()
			.inspect(pair.refresh_token.expose())
			.expect("Refresh token should carry genuine claims.");

		assert_eq!(pair.token_type, TokenType::Bearer);
		assert_eq!(access.kind, TokenKind::Access);
		assert_eq!(refresh.kind, TokenKind::Refresh);
		assert_eq!(access.subject, subject);
		assert_eq!(refresh.subject, subject);
		assert_eq!(access.issued_at, refresh.issued_at);
		assert_eq!(access.expires_at.unix_timestamp(), 1800);
		assert_eq!(refresh.expires_at.unix_timestamp(), 7 * 86_400);
		assert_ne!(pair.access_token, pair.refresh_token);
	}
}
