//! Bearer token lifecycle engine: split-key JWT issuance, refresh exchange, and fail-closed
//! revocation backed by pluggable stores.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod clock;
pub mod codec;
pub mod config;
pub mod credentials;
pub mod error;
pub mod obs;
pub mod service;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and fixtures shared by unit and integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{
		clock::{Clock, ManualClock},
		config::{SigningAlgorithm, TokenConfig},
		service::TokenService,
		store::{MemoryStore, RevocationStore},
	};

	/// Access secret used by test fixtures (32+ bytes, not a placeholder).
	pub const TEST_ACCESS_SECRET: &str = "access-signing-secret-for-tests-0123456789";
	/// Refresh secret used by test fixtures (32+ bytes, distinct from the access secret).
	pub const TEST_REFRESH_SECRET: &str = "refresh-signing-secret-for-tests-9876543210";

	/// Builds a configuration with a 30 minute access TTL and a 7 day refresh TTL.
	pub fn test_config() -> TokenConfig {
		TokenConfig::builder()
			.access_secret(TEST_ACCESS_SECRET)
			.refresh_secret(TEST_REFRESH_SECRET)
			.algorithm(SigningAlgorithm::Hs256)
			.access_ttl(Duration::minutes(30))
			.refresh_ttl(Duration::days(7))
			.build()
			.expect("Test token configuration should be valid.")
	}

	/// Constructs a [`TokenService`] backed by an in-memory store and a manual clock pinned to
	/// the provided instant.
	pub fn build_test_service(
		now: OffsetDateTime,
	) -> (TokenService, Arc<MemoryStore>, Arc<ManualClock>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn RevocationStore> = store_backend.clone();
		let clock = Arc::new(ManualClock::new(now));
		let service_clock: Arc<dyn Clock> = clock.clone();
		let service = TokenService::new(test_config(), store).with_clock(service_clock);

		(service, store_backend, clock)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	#[cfg(feature = "reqwest")]
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use jsonwebtoken;
#[cfg(feature = "reqwest")] pub use reqwest;
#[cfg(feature = "reqwest")] pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
