//! Payloads handed back to callers at the service boundary.

// self
use crate::{
	_prelude::*,
	auth::{Subject, TokenSecret},
};

/// Token type advertised alongside issued tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
	/// RFC 6750 bearer token.
	#[default]
	Bearer,
}

/// Access + refresh pair minted at login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
	/// Short-lived access token.
	pub access_token: TokenSecret,
	/// Long-lived refresh token.
	pub refresh_token: TokenSecret,
	/// Always `bearer`.
	pub token_type: TokenType,
}

/// Fresh access token minted from a refresh token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
	/// Newly minted access token.
	pub access_token: TokenSecret,
	/// Always `bearer`.
	pub token_type: TokenType,
}

/// Introspection result for service-to-service trust checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedToken {
	/// Authenticated principal.
	pub subject: Subject,
	/// Expiry instant of the verified token.
	#[serde(with = "time::serde::timestamp")]
	pub expires_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn pair_serializes_with_bearer_type() {
		let pair = TokenPair {
			access_token: TokenSecret::new("a.b.c"),
			refresh_token: TokenSecret::new("d.e.f"),
			token_type: TokenType::Bearer,
		};
		let value = serde_json::to_value(&pair).expect("TokenPair should serialize to JSON.");

		assert_eq!(
			value,
			serde_json::json!({
				"access_token": "a.b.c",
				"refresh_token": "d.e.f",
				"token_type": "bearer",
			})
		);
	}
}
