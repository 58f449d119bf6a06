// self
use crate::{
	_prelude::*,
	auth::{Subject, TokenPair},
	error::ConfigError,
	obs::Operation,
	service::{self, TokenService},
};

impl TokenService {
	/// Checks `username`/`password` against the credential gateway and issues a pair.
	///
	/// A rejected check yields [`Error::InvalidCredentials`]; a gateway that cannot answer
	/// yields [`Error::CredentialCheckFailed`]. Usernames that are not valid subjects are
	/// rejected without contacting the gateway.
	pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
		service::observed(Operation::Login, "login", self.authenticate(username, password)).await
	}

	async fn authenticate(&self, username: &str, password: &str) -> Result<TokenPair> {
		let gateway = self.credentials.as_ref().ok_or(ConfigError::MissingCredentialGateway)?;
		let subject = Subject::new(username).map_err(|_| Error::InvalidCredentials)?;

		match gateway.verify_credentials(subject.as_str(), password).await {
			Ok(true) => self.mint_pair(&subject),
			Ok(false) => Err(Error::InvalidCredentials),
			Err(source) => Err(Error::CredentialCheckFailed { source }),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::build_test_service,
		auth::TokenKind,
		credentials::{CredentialError, CredentialFuture, CredentialGateway, StaticCredentialGateway},
	};

	struct UnreachableGateway;
	impl CredentialGateway for UnreachableGateway {
		fn verify_credentials<'a>(&'a self, _: &'a str, _: &'a str) -> CredentialFuture<'a> {
			Box::pin(async { Err(CredentialError::Transport { message: "connection refused".into() }) })
		}
	}

	#[tokio::test]
	async fn accepted_credentials_issue_a_pair() {
		let (service, _, _) = build_test_service(OffsetDateTime::UNIX_EPOCH);
		let service = service.with_credential_gateway(Arc::new(StaticCredentialGateway::new([(
			"alice@example.com",
			"hunter2",
		)])));
		let pair =
			service.login("alice@example.com", "hunter2").await.expect("Login should succeed.");
		let claims = service
			.verify(pair.access_token.expose(), TokenKind::Access)
			.await
			.expect("Issued access token should verify.");

		assert_eq!(claims.subject.as_str(), "alice@example.com");
		assert!(matches!(
			service.login("alice@example.com", "wrong").await,
			Err(Error::InvalidCredentials)
		));
		assert!(matches!(service.login("alice example", "hunter2").await, Err(Error::InvalidCredentials)));
	}

	#[tokio::test]
	async fn gateway_failures_are_distinct_from_rejections() {
		let (service, _, _) = build_test_service(OffsetDateTime::UNIX_EPOCH);
		let err = service
			.clone()
			.with_credential_gateway(Arc::new(UnreachableGateway))
			.login("alice@example.com", "hunter2")
			.await
			.expect_err("Unreachable gateway should fail the login.");

		assert!(matches!(err, Error::CredentialCheckFailed { .. }));
		assert!(err.is_retryable());

		let err = service
			.login("alice@example.com", "hunter2")
			.await
			.expect_err("Login without a gateway should fail.");

		assert!(matches!(err, Error::Config(ConfigError::MissingCredentialGateway)));
	}
}
