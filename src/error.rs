//! Service-level error types shared across the codec, stores, and credential gateway.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Generic message shown to unauthenticated callers regardless of the failure kind.
pub const PUBLIC_DENIAL_MESSAGE: &str = "Could not validate credentials.";

/// Canonical error exposed by public APIs.
///
/// The variant is meant for logs and diagnostics only. Anything returned to an
/// unauthenticated caller should go through [`Error::public_message`], which never
/// distinguishes an expired token from a forged or revoked one.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Token structure cannot be parsed.
	#[error("Token is malformed.")]
	Malformed {
		/// Underlying decoding failure, when one was produced.
		#[source]
		source: Option<jsonwebtoken::errors::Error>,
	},
	/// Claims could not be signed.
	#[error("Token could not be signed.")]
	Encoding {
		/// Underlying signing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Signature does not verify under the key of the expected token kind.
	#[error("Token signature is invalid for the expected token kind.")]
	InvalidSignature,
	/// Expiry claim has passed.
	#[error("Token has expired.")]
	Expired,
	/// Signature matched but the embedded type claim disagrees with the expected kind.
	#[error("Token type `{actual}` does not match the expected `{expected}`.")]
	TypeMismatch {
		/// Kind the caller asked for.
		expected: crate::auth::TokenKind,
		/// Kind carried by the token.
		actual: crate::auth::TokenKind,
	},
	/// Token identifier is present in the revocation store.
	#[error("Token has been revoked.")]
	Revoked,
	/// Revocation store could not answer; the token is treated as unverifiable.
	#[error("Revocation check failed.")]
	RevocationCheckFailed {
		/// Store failure that prevented the lookup.
		#[source]
		source: crate::store::StoreError,
	},
	/// Identity provider could not be reached during login.
	#[error("Credential check failed.")]
	CredentialCheckFailed {
		/// Gateway failure that prevented the check.
		#[source]
		source: crate::credentials::CredentialError,
	},
	/// Identity provider rejected the supplied credentials.
	#[error("Incorrect username or password.")]
	InvalidCredentials,
	/// Revocation store failed while recording or pruning entries.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// Builds a [`Error::Malformed`] without an underlying source.
	pub fn malformed() -> Self {
		Self::Malformed { source: None }
	}

	/// Returns a stable label suitable for log fields and metrics.
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::Malformed { .. } => "malformed",
			Self::Encoding { .. } => "encoding",
			Self::InvalidSignature => "invalid_signature",
			Self::Expired => "expired",
			Self::TypeMismatch { .. } => "type_mismatch",
			Self::Revoked => "revoked",
			Self::RevocationCheckFailed { .. } => "revocation_check_failed",
			Self::CredentialCheckFailed { .. } => "credential_check_failed",
			Self::InvalidCredentials => "invalid_credentials",
			Self::Storage(_) => "storage",
			Self::Config(_) => "config_invalid",
		}
	}

	/// Returns `true` when the failure stems from infrastructure and a caller may retry with
	/// backoff. Token-validity failures are terminal.
	pub const fn is_retryable(&self) -> bool {
		matches!(
			self,
			Self::RevocationCheckFailed { .. } | Self::CredentialCheckFailed { .. } | Self::Storage(_)
		)
	}

	/// Message safe to expose to unauthenticated callers.
	pub const fn public_message(&self) -> &'static str {
		PUBLIC_DENIAL_MESSAGE
	}
}

/// Configuration and validation failures raised at startup.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// A required signing secret was not supplied.
	#[error("The {kind} signing secret is missing.")]
	MissingSecret {
		/// Token kind whose secret is missing.
		kind: &'static str,
	},
	/// A signing secret still carries a placeholder value.
	#[error("The {kind} signing secret is a placeholder value.")]
	PlaceholderSecret {
		/// Token kind whose secret is a placeholder.
		kind: &'static str,
	},
	/// A signing secret is too short for HMAC signing.
	#[error("The {kind} signing secret must be at least {min} bytes.")]
	WeakSecret {
		/// Token kind whose secret is too short.
		kind: &'static str,
		/// Minimum accepted length in bytes.
		min: usize,
	},
	/// Access and refresh tokens were configured with the same secret.
	#[error("Access and refresh tokens must use different signing secrets.")]
	SharedSecret,
	/// Algorithm identifier is unknown or not an HMAC algorithm.
	#[error("Signing algorithm `{algorithm}` is not supported.")]
	UnsupportedAlgorithm {
		/// Offending algorithm identifier.
		algorithm: String,
	},
	/// A lifetime was zero or negative.
	#[error("The {kind} token lifetime must be positive.")]
	NonPositiveTtl {
		/// Token kind whose lifetime is invalid.
		kind: &'static str,
	},
	/// A lifetime exceeded the supported maximum.
	#[error("The {kind} token lifetime cannot exceed {max_days} days.")]
	TtlTooLong {
		/// Token kind whose lifetime is invalid.
		kind: &'static str,
		/// Maximum accepted lifetime in days.
		max_days: i64,
	},
	/// Access tokens would outlive refresh tokens.
	#[error("The access token lifetime must be shorter than the refresh token lifetime.")]
	AccessOutlivesRefresh,
	/// Clock-skew leeway was negative.
	#[error("The verification leeway cannot be negative.")]
	NegativeLeeway,
	/// Clock-skew leeway exceeded the supported maximum.
	#[error("The verification leeway cannot exceed {max_seconds} seconds.")]
	LeewayTooLarge {
		/// Maximum accepted leeway in seconds.
		max_seconds: i64,
	},
	/// A numeric setting could not be parsed.
	#[error("Setting `{name}` must be an integer, got `{value}`.")]
	InvalidNumber {
		/// Setting name.
		name: &'static str,
		/// Raw value supplied.
		value: String,
	},
	/// Structured settings could not be deserialized.
	#[error("Settings are invalid at `{path}`: {message}.")]
	InvalidSettings {
		/// Path of the offending field.
		path: String,
		/// Deserializer message.
		message: String,
	},
	/// Login was requested but no credential gateway is configured.
	#[error("No credential gateway is configured.")]
	MissingCredentialGateway,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed: {message}.")]
	HttpClientBuild {
		/// Builder failure message.
		message: String,
	},
}
