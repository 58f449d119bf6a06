//! Token kind classification.

// self
use crate::_prelude::*;

/// Kind of a signed token; fixed at creation and selects the signing key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
	/// Short-lived credential presented on every request.
	Access,
	/// Long-lived credential exchanged for new access tokens.
	Refresh,
}
impl TokenKind {
	/// Both kinds, in the order the codec tries them for kind-agnostic inspection.
	pub const ALL: [TokenKind; 2] = [TokenKind::Access, TokenKind::Refresh];

	/// Returns the value carried in the `type` claim.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenKind::Access => "access",
			TokenKind::Refresh => "refresh",
		}
	}
}
impl Display for TokenKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn serializes_as_lowercase_claim_value() {
		assert_eq!(
			serde_json::to_string(&TokenKind::Refresh).expect("TokenKind should serialize."),
			"\"refresh\""
		);
		assert!(serde_json::from_str::<TokenKind>("\"id\"").is_err());
	}
}
