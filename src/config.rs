//! Token configuration: signing secrets, algorithm, and lifetimes.
//!
//! A [`TokenConfig`] is constructed once at startup, either through
//! [`TokenConfig::builder`] or from raw [`TokenSettings`], and handed explicitly to
//! the codec and service constructors. Construction validates everything up front so
//! a missing or placeholder secret is a startup failure, never a runtime default.

/// Builder API and validation rules.
pub mod builder;
/// Raw settings sourced from the environment or structured documents.
pub mod settings;

pub use builder::*;
pub use settings::*;

// crates.io
use jsonwebtoken::Algorithm;
// self
use crate::{_prelude::*, auth::TokenKind, error::ConfigError};

/// HMAC signing algorithms accepted for split-key token signing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SigningAlgorithm {
	/// HMAC with SHA-256.
	#[default]
	#[serde(rename = "HS256")]
	Hs256,
	/// HMAC with SHA-384.
	#[serde(rename = "HS384")]
	Hs384,
	/// HMAC with SHA-512.
	#[serde(rename = "HS512")]
	Hs512,
}
impl SigningAlgorithm {
	/// Returns the JOSE algorithm identifier.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Hs256 => "HS256",
			Self::Hs384 => "HS384",
			Self::Hs512 => "HS512",
		}
	}

	pub(crate) const fn to_jwt(self) -> Algorithm {
		match self {
			Self::Hs256 => Algorithm::HS256,
			Self::Hs384 => Algorithm::HS384,
			Self::Hs512 => Algorithm::HS512,
		}
	}
}
impl Display for SigningAlgorithm {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for SigningAlgorithm {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_uppercase().as_str() {
			"HS256" => Ok(Self::Hs256),
			"HS384" => Ok(Self::Hs384),
			"HS512" => Ok(Self::Hs512),
			_ => Err(ConfigError::UnsupportedAlgorithm { algorithm: s.to_owned() }),
		}
	}
}

/// Redacted signing secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(String);
impl SigningSecret {
	pub(crate) fn new(value: String) -> Self {
		Self(value)
	}

	/// Returns the raw key bytes. Callers must avoid logging them.
	pub fn expose(&self) -> &[u8] {
		self.0.as_bytes()
	}
}
impl Debug for SigningSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SigningSecret").field(&"<redacted>").finish()
	}
}

/// Validated token configuration.
#[derive(Clone, Debug)]
pub struct TokenConfig {
	access_secret: SigningSecret,
	refresh_secret: SigningSecret,
	algorithm: SigningAlgorithm,
	access_ttl: Duration,
	refresh_ttl: Duration,
	leeway: Duration,
}
impl TokenConfig {
	/// Creates a new builder seeded with the default algorithm and lifetimes.
	pub fn builder() -> TokenConfigBuilder {
		TokenConfigBuilder::new()
	}

	/// Signing secret for the provided kind.
	pub fn secret(&self, kind: TokenKind) -> &SigningSecret {
		match kind {
			TokenKind::Access => &self.access_secret,
			TokenKind::Refresh => &self.refresh_secret,
		}
	}

	/// Lifetime of tokens of the provided kind.
	pub fn ttl(&self, kind: TokenKind) -> Duration {
		match kind {
			TokenKind::Access => self.access_ttl,
			TokenKind::Refresh => self.refresh_ttl,
		}
	}

	/// Configured signing algorithm.
	pub fn algorithm(&self) -> SigningAlgorithm {
		self.algorithm
	}

	/// Clock-skew tolerance applied to expiry checks (zero unless configured).
	pub fn leeway(&self) -> Duration {
		self.leeway
	}
}
