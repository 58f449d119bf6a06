// self
use crate::{
	_prelude::*,
	config::{SigningAlgorithm, TokenConfig, TokenConfigBuilder},
	error::ConfigError,
};

const ACCESS_SECRET_VAR: &str = "JWT_SECRET_KEY";
const REFRESH_SECRET_VAR: &str = "JWT_REFRESH_SECRET_KEY";
const ALGORITHM_VAR: &str = "JWT_ALGORITHM";
const ACCESS_TTL_VAR: &str = "ACCESS_TOKEN_EXPIRE_MINUTES";
const REFRESH_TTL_VAR: &str = "REFRESH_TOKEN_EXPIRE_DAYS";
const LEEWAY_VAR: &str = "TOKEN_LEEWAY_SECONDS";

/// Raw, unvalidated token settings keyed by their deployment variable names.
///
/// Convert into a [`TokenConfig`] with [`TryFrom`]; unset optional values fall back to
/// the builder defaults while unset secrets fail the conversion.
#[derive(Clone, Default, Deserialize)]
pub struct TokenSettings {
	/// `JWT_SECRET_KEY`.
	#[serde(rename = "JWT_SECRET_KEY", default)]
	pub access_secret: Option<String>,
	/// `JWT_REFRESH_SECRET_KEY`.
	#[serde(rename = "JWT_REFRESH_SECRET_KEY", default)]
	pub refresh_secret: Option<String>,
	/// `JWT_ALGORITHM`, e.g. `HS256`.
	#[serde(rename = "JWT_ALGORITHM", default)]
	pub algorithm: Option<String>,
	/// `ACCESS_TOKEN_EXPIRE_MINUTES`.
	#[serde(rename = "ACCESS_TOKEN_EXPIRE_MINUTES", default)]
	pub access_ttl_minutes: Option<i64>,
	/// `REFRESH_TOKEN_EXPIRE_DAYS`.
	#[serde(rename = "REFRESH_TOKEN_EXPIRE_DAYS", default)]
	pub refresh_ttl_days: Option<i64>,
	/// `TOKEN_LEEWAY_SECONDS`.
	#[serde(rename = "TOKEN_LEEWAY_SECONDS", default)]
	pub leeway_seconds: Option<i64>,
}
impl TokenSettings {
	/// Reads settings from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_vars(std::env::vars())
	}

	/// Reads settings from arbitrary key/value pairs; unknown keys are ignored.
	pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		let mut settings = Self::default();

		for (key, value) in vars {
			let value = value.into();

			match key.as_ref() {
				ACCESS_SECRET_VAR => settings.access_secret = Some(value),
				REFRESH_SECRET_VAR => settings.refresh_secret = Some(value),
				ALGORITHM_VAR => settings.algorithm = Some(value),
				ACCESS_TTL_VAR => settings.access_ttl_minutes = Some(parse_int(ACCESS_TTL_VAR, value)?),
				REFRESH_TTL_VAR =>
					settings.refresh_ttl_days = Some(parse_int(REFRESH_TTL_VAR, value)?),
				LEEWAY_VAR => settings.leeway_seconds = Some(parse_int(LEEWAY_VAR, value)?),
				_ => {},
			}
		}

		Ok(settings)
	}

	/// Parses settings from a JSON document, reporting the path of any invalid field.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let mut deserializer = serde_json::Deserializer::from_str(json);

		serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
			ConfigError::InvalidSettings { path: e.path().to_string(), message: e.inner().to_string() }
		})
	}
}
impl Debug for TokenSettings {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenSettings")
			.field("access_secret_set", &self.access_secret.is_some())
			.field("refresh_secret_set", &self.refresh_secret.is_some())
			.field("algorithm", &self.algorithm)
			.field("access_ttl_minutes", &self.access_ttl_minutes)
			.field("refresh_ttl_days", &self.refresh_ttl_days)
			.field("leeway_seconds", &self.leeway_seconds)
			.finish()
	}
}
impl TryFrom<TokenSettings> for TokenConfig {
	type Error = ConfigError;

	fn try_from(settings: TokenSettings) -> Result<Self, Self::Error> {
		let mut builder = TokenConfigBuilder::new();

		if let Some(secret) = settings.access_secret {
			builder = builder.access_secret(secret);
		}
		if let Some(secret) = settings.refresh_secret {
			builder = builder.refresh_secret(secret);
		}
		if let Some(algorithm) = settings.algorithm {
			builder = builder.algorithm(algorithm.parse::<SigningAlgorithm>()?);
		}
		if let Some(minutes) = settings.access_ttl_minutes {
			builder = builder.access_ttl(scaled(ACCESS_TTL_VAR, minutes, 60)?);
		}
		if let Some(days) = settings.refresh_ttl_days {
			builder = builder.refresh_ttl(scaled(REFRESH_TTL_VAR, days, 86_400)?);
		}
		if let Some(seconds) = settings.leeway_seconds {
			builder = builder.leeway(Duration::seconds(seconds));
		}

		builder.build()
	}
}

fn scaled(name: &'static str, value: i64, unit_secs: i64) -> Result<Duration, ConfigError> {
	value
		.checked_mul(unit_secs)
		.map(Duration::seconds)
		.ok_or_else(|| ConfigError::InvalidNumber { name, value: value.to_string() })
}

fn parse_int(name: &'static str, value: String) -> Result<i64, ConfigError> {
	value.trim().parse().map_err(|_| ConfigError::InvalidNumber { name, value })
}
