//! Token lifecycle facade tying the codec, revocation store, clock, and credential gateway
//! together.
//!
//! Each operation lives in its own submodule: issuance, verification (plus introspection),
//! refresh, revocation (plus logout and pruning), and login. Every operation runs inside an
//! [`OperationSpan`] and records attempt/success/failure outcomes.

mod issue;
mod login;
mod refresh;
mod revoke;
mod verify;

// self
use crate::{
	_prelude::*,
	clock::{Clock, SystemClock},
	codec::TokenCodec,
	config::{TokenConfig, TokenSettings},
	credentials::CredentialGateway,
	obs::{Operation, OperationSpan},
	store::{self, RevocationStore},
};

/// Stateless token service; share it behind an [`Arc`] or clone it freely.
///
/// The revocation store is the only shared mutable resource. All methods take `&self`.
#[derive(Clone)]
pub struct TokenService {
	codec: TokenCodec,
	store: Arc<dyn RevocationStore>,
	clock: Arc<dyn Clock>,
	credentials: Option<Arc<dyn CredentialGateway>>,
	revocation_timeout: Option<std::time::Duration>,
}
impl TokenService {
	/// Creates a service from a validated configuration using the system clock.
	pub fn new(config: TokenConfig, store: Arc<dyn RevocationStore>) -> Self {
		Self {
			codec: TokenCodec::new(&config),
			store,
			clock: Arc::new(SystemClock),
			credentials: None,
			revocation_timeout: None,
		}
	}

	/// Validates raw settings and creates a service from them.
	pub fn from_settings(settings: TokenSettings, store: Arc<dyn RevocationStore>) -> Result<Self> {
		let config = TokenConfig::try_from(settings)?;

		Ok(Self::new(config, store))
	}

	/// Reads settings from the process environment and creates a service from them.
	pub fn from_env(store: Arc<dyn RevocationStore>) -> Result<Self> {
		Self::from_settings(TokenSettings::from_env()?, store)
	}

	/// Replaces the time source.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Attaches the identity provider consulted by [`TokenService::login`].
	pub fn with_credential_gateway(mut self, gateway: Arc<dyn CredentialGateway>) -> Self {
		self.credentials = Some(gateway);

		self
	}

	/// Bounds every revocation lookup; a lookup exceeding `limit` fails verification.
	///
	/// Requires a Tokio runtime with the time driver enabled.
	pub fn with_revocation_timeout(mut self, limit: std::time::Duration) -> Self {
		self.revocation_timeout = Some(limit);

		self
	}

	/// Codec used for signing and decoding.
	pub fn codec(&self) -> &TokenCodec {
		&self.codec
	}

	/// Current instant according to the configured clock.
	pub fn now(&self) -> OffsetDateTime {
		self.clock.now()
	}

	/// Spawns a background task pruning this service's store every `period`.
	pub fn spawn_prune_task(&self, period: std::time::Duration) -> tokio::task::JoinHandle<()> {
		store::spawn_prune_task(self.store.clone(), self.clock.clone(), period)
	}
}
impl Debug for TokenService {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenService")
			.field("codec", &self.codec)
			.field("credential_gateway", &self.credentials.is_some())
			.field("revocation_timeout", &self.revocation_timeout)
			.finish_non_exhaustive()
	}
}

async fn observed<T, Fut>(op: Operation, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	OperationSpan::start(op, stage).instrument(fut).await
}
