//! HTTP credential gateway built on reqwest.

// crates.io
use reqwest::{StatusCode, redirect::Policy};
// self
use crate::{
	_prelude::*,
	credentials::{CredentialError, CredentialFuture, CredentialGateway},
	error::ConfigError,
};

#[derive(Serialize)]
struct CredentialRequest<'a> {
	username: &'a str,
	password: &'a str,
}

/// Posts `{username, password}` JSON to an identity provider endpoint.
///
/// Any 2xx status accepts the credentials and `401`/`403` reject them; every other status is
/// reported as [`CredentialError::UnexpectedStatus`]. Redirects are never followed.
#[derive(Clone, Debug)]
pub struct ReqwestCredentialGateway {
	client: ReqwestClient,
	endpoint: Url,
}
impl ReqwestCredentialGateway {
	/// Default request timeout applied by [`ReqwestCredentialGateway::new`].
	pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

	/// Builds a gateway with a dedicated client that does not follow redirects.
	pub fn new(endpoint: Url) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.redirect(Policy::none())
			.timeout(Self::DEFAULT_TIMEOUT)
			.build()
			.map_err(|e| ConfigError::HttpClientBuild { message: e.to_string() })?;

		Ok(Self::with_client(client, endpoint))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient, endpoint: Url) -> Self {
		Self { client, endpoint }
	}

	/// Identity provider endpoint receiving credential checks.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}
}
impl CredentialGateway for ReqwestCredentialGateway {
	fn verify_credentials<'a>(&'a self, subject: &'a str, secret: &'a str) -> CredentialFuture<'a> {
		Box::pin(async move {
			let response = self
				.client
				.post(self.endpoint.clone())
				.json(&CredentialRequest { username: subject, password: secret })
				.send()
				.await
				.map_err(transport_error)?;
			let status = response.status();

			if status.is_success() {
				Ok(true)
			} else if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
				Ok(false)
			} else {
				Err(CredentialError::UnexpectedStatus { status: status.as_u16() })
			}
		})
	}
}

// Strip the URL so the error never carries query-string material.
fn transport_error(e: ReqwestError) -> CredentialError {
	CredentialError::Transport { message: e.without_url().to_string() }
}
