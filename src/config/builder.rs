// self
use crate::{
	_prelude::*,
	config::{SigningAlgorithm, SigningSecret, TokenConfig},
	error::ConfigError,
};

/// Minimum HMAC secret length in bytes (256 bits).
pub const MIN_SECRET_LEN: usize = 32;
/// Longest accepted token lifetime (100 years).
pub const MAX_TTL: Duration = Duration::days(36_525);
/// Largest accepted clock-skew leeway.
pub const MAX_LEEWAY: Duration = Duration::hours(1);

const PLACEHOLDER_SECRETS: &[&str] = &["secret", "default", "password", "jwt-secret", "todo"];
const PLACEHOLDER_MARKERS: &[&str] =
	&["changeme", "change-me", "change_me", "change-this", "change_this", "your-", "placeholder"];

/// Builder for [`TokenConfig`] values.
#[derive(Clone)]
pub struct TokenConfigBuilder {
	access_secret: Option<String>,
	refresh_secret: Option<String>,
	algorithm: SigningAlgorithm,
	access_ttl: Duration,
	refresh_ttl: Duration,
	leeway: Duration,
}
impl TokenConfigBuilder {
	/// Default access token lifetime.
	pub const DEFAULT_ACCESS_TTL: Duration = Duration::minutes(30);
	/// Default refresh token lifetime.
	pub const DEFAULT_REFRESH_TTL: Duration = Duration::days(7);

	/// Creates a builder with HS256, a 30 minute access TTL, a 7 day refresh TTL, and no leeway.
	pub fn new() -> Self {
		Self {
			access_secret: None,
			refresh_secret: None,
			algorithm: SigningAlgorithm::default(),
			access_ttl: Self::DEFAULT_ACCESS_TTL,
			refresh_ttl: Self::DEFAULT_REFRESH_TTL,
			leeway: Duration::ZERO,
		}
	}

	/// Sets the secret used to sign access tokens.
	pub fn access_secret(mut self, secret: impl Into<String>) -> Self {
		self.access_secret = Some(secret.into());

		self
	}

	/// Sets the secret used to sign refresh tokens.
	pub fn refresh_secret(mut self, secret: impl Into<String>) -> Self {
		self.refresh_secret = Some(secret.into());

		self
	}

	/// Overrides the signing algorithm.
	pub fn algorithm(mut self, algorithm: SigningAlgorithm) -> Self {
		self.algorithm = algorithm;

		self
	}

	/// Overrides the access token lifetime.
	pub fn access_ttl(mut self, ttl: Duration) -> Self {
		self.access_ttl = ttl;

		self
	}

	/// Overrides the refresh token lifetime.
	pub fn refresh_ttl(mut self, ttl: Duration) -> Self {
		self.refresh_ttl = ttl;

		self
	}

	/// Tolerates clock skew on expiry checks. Defaults to zero.
	pub fn leeway(mut self, leeway: Duration) -> Self {
		self.leeway = leeway;

		self
	}

	/// Validates the collected values and produces a [`TokenConfig`].
	pub fn build(self) -> Result<TokenConfig, ConfigError> {
		let access_secret = validate_secret("access", self.access_secret)?;
		let refresh_secret = validate_secret("refresh", self.refresh_secret)?;

		if access_secret == refresh_secret {
			return Err(ConfigError::SharedSecret);
		}
		validate_ttl("access", self.access_ttl)?;
		validate_ttl("refresh", self.refresh_ttl)?;

		if self.access_ttl >= self.refresh_ttl {
			return Err(ConfigError::AccessOutlivesRefresh);
		}
		if self.leeway.is_negative() {
			return Err(ConfigError::NegativeLeeway);
		}
		if self.leeway > MAX_LEEWAY {
			return Err(ConfigError::LeewayTooLarge { max_seconds: MAX_LEEWAY.whole_seconds() });
		}

		Ok(TokenConfig {
			access_secret: SigningSecret::new(access_secret),
			refresh_secret: SigningSecret::new(refresh_secret),
			algorithm: self.algorithm,
			access_ttl: self.access_ttl,
			refresh_ttl: self.refresh_ttl,
			leeway: self.leeway,
		})
	}
}
impl Default for TokenConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}
impl Debug for TokenConfigBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenConfigBuilder")
			.field("access_secret_set", &self.access_secret.is_some())
			.field("refresh_secret_set", &self.refresh_secret.is_some())
			.field("algorithm", &self.algorithm)
			.field("access_ttl", &self.access_ttl)
			.field("refresh_ttl", &self.refresh_ttl)
			.field("leeway", &self.leeway)
			.finish()
	}
}

fn validate_ttl(kind: &'static str, ttl: Duration) -> Result<(), ConfigError> {
	if !ttl.is_positive() {
		return Err(ConfigError::NonPositiveTtl { kind });
	}
	if ttl > MAX_TTL {
		return Err(ConfigError::TtlTooLong { kind, max_days: MAX_TTL.whole_days() });
	}

	Ok(())
}

fn validate_secret(kind: &'static str, secret: Option<String>) -> Result<String, ConfigError> {
	let secret = secret
		.filter(|value| !value.trim().is_empty())
		.ok_or(ConfigError::MissingSecret { kind })?;
	let normalized = secret.trim().to_ascii_lowercase();

	if PLACEHOLDER_SECRETS.contains(&normalized.as_str())
		|| PLACEHOLDER_MARKERS.iter().any(|marker| normalized.contains(marker))
	{
		return Err(ConfigError::PlaceholderSecret { kind });
	}
	if secret.len() < MIN_SECRET_LEN {
		return Err(ConfigError::WeakSecret { kind, min: MIN_SECRET_LEN });
	}

	Ok(secret)
}
