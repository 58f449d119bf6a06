//! Identity-provider contract consulted once per login.
//!
//! The service trusts the boolean answer of a [`CredentialGateway`]; it never sees password
//! hashes or user records. Transport problems must be reported as [`CredentialError`] so they
//! stay distinguishable from a genuine "wrong password".

#[cfg(feature = "reqwest")] pub mod http;
#[cfg(feature = "reqwest")] pub use http::ReqwestCredentialGateway;

// self
use crate::_prelude::*;

/// Boxed future returned by [`CredentialGateway`] checks.
pub type CredentialFuture<'a> =
	Pin<Box<dyn Future<Output = Result<bool, CredentialError>> + 'a + Send>>;

/// Answers whether a subject/secret pair is valid.
pub trait CredentialGateway
where
	Self: Send + Sync,
{
	/// Returns `Ok(true)` for valid credentials and `Ok(false)` for rejected ones.
	fn verify_credentials<'a>(&'a self, subject: &'a str, secret: &'a str) -> CredentialFuture<'a>;
}

/// Failure raised when the identity provider cannot give an answer.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CredentialError {
	/// Network or protocol failure before a status was received.
	#[error("Identity provider transport failed: {message}.")]
	Transport {
		/// Human-readable transport failure.
		message: String,
	},
	/// Identity provider answered with a status that is neither success nor rejection.
	#[error("Identity provider returned unexpected status {status}.")]
	UnexpectedStatus {
		/// HTTP status code received.
		status: u16,
	},
}

/// Gateway backed by a fixed in-memory table of accepted credentials.
///
/// Intended for tests and local development; secrets are compared as plain strings.
#[derive(Clone, Default)]
pub struct StaticCredentialGateway(HashMap<String, String>);
impl StaticCredentialGateway {
	/// Builds a gateway accepting exactly the provided subject/secret pairs.
	pub fn new<I, S, P>(accepted: I) -> Self
	where
		I: IntoIterator<Item = (S, P)>,
		S: Into<String>,
		P: Into<String>,
	{
		Self(accepted.into_iter().map(|(s, p)| (s.into(), p.into())).collect())
	}
}
impl Debug for StaticCredentialGateway {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StaticCredentialGateway").field("subjects", &self.0.len()).finish()
	}
}
impl CredentialGateway for StaticCredentialGateway {
	fn verify_credentials<'a>(&'a self, subject: &'a str, secret: &'a str) -> CredentialFuture<'a> {
		Box::pin(async move { Ok(self.0.get(subject).is_some_and(|expected| expected == secret)) })
	}
}
