//! Strongly typed identifiers for token subjects and revocation entries.

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

const SUBJECT_MAX_LEN: usize = 320;

/// Error returned when subject validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum SubjectError {
	/// The subject was empty.
	#[error("Subject cannot be empty.")]
	Empty,
	/// The subject contains whitespace characters.
	#[error("Subject contains whitespace.")]
	ContainsWhitespace,
	/// The subject exceeded the allowed length.
	#[error("Subject exceeds {max} bytes.")]
	TooLong {
		/// Maximum permitted length in bytes.
		max: usize,
	},
}

/// Identifier of the authenticated principal carried in the `sub` claim.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subject(String);
impl Subject {
	/// Creates a new subject after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, SubjectError> {
		let view = value.as_ref();

		validate_subject(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Returns the subject as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for Subject {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for Subject {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for Subject {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<Subject> for String {
	fn from(value: Subject) -> Self {
		value.0
	}
}
impl TryFrom<String> for Subject {
	type Error = SubjectError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_subject(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for Subject {
	type Err = SubjectError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for Subject {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Subject({})", self.0)
	}
}
impl Display for Subject {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Stable identifier under which a token is recorded in a revocation store.
///
/// The identifier is the base64 (url-safe, no padding) SHA-256 digest of the encoded token,
/// so raw bearer strings never land in storage and arbitrary input, including garbage that
/// fails to parse, maps to a fixed-size key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevocationId(String);
impl RevocationId {
	/// Derives the identifier for an encoded token string.
	pub fn for_token(token: &str) -> Self {
		let mut hasher = Sha256::new();

		hasher.update(token.as_bytes());

		Self(URL_SAFE_NO_PAD.encode(hasher.finalize()))
	}

	/// Returns the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for RevocationId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for RevocationId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Display for RevocationId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_subject(view: &str) -> Result<(), SubjectError> {
	if view.is_empty() {
		return Err(SubjectError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(SubjectError::ContainsWhitespace);
	}
	if view.len() > SUBJECT_MAX_LEN {
		return Err(SubjectError::TooLong { max: SUBJECT_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn subjects_reject_empty_and_whitespace() {
		assert_eq!(Subject::new(""), Err(SubjectError::Empty));
		assert_eq!(Subject::new(" alice"), Err(SubjectError::ContainsWhitespace));
		assert_eq!(Subject::new(format!("alice{}x", '\u{00A0}')), Err(SubjectError::ContainsWhitespace));

		let subject =
			Subject::new("alice@example.com").expect("Email subject should be considered valid.");

		assert_eq!(subject.as_str(), "alice@example.com");
	}

	#[test]
	fn subject_length_limit_is_inclusive() {
		Subject::new("a".repeat(SUBJECT_MAX_LEN)).expect("Exact length should succeed.");

		assert_eq!(
			Subject::new("a".repeat(SUBJECT_MAX_LEN + 1)),
			Err(SubjectError::TooLong { max: SUBJECT_MAX_LEN })
		);
	}

	#[test]
	fn serde_enforces_subject_validation() {
		let subject: Subject =
			serde_json::from_str("\"bob\"").expect("Subject should deserialize successfully.");

		assert_eq!(subject.as_str(), "bob");
		assert!(serde_json::from_str::<Subject>("\"\"").is_err());
		assert!(serde_json::from_str::<Subject>("\"with space\"").is_err());
	}

	#[test]
	fn revocation_ids_are_stable_digests() {
		let first = RevocationId::for_token("header.payload.signature");
		let second = RevocationId::for_token("header.payload.signature");
		let other = RevocationId::for_token("header.payload.signaturf");

		assert_eq!(first, second);
		assert_ne!(first, other);
		// 32-byte digest, base64 without padding.
		assert_eq!(first.as_str().len(), 43);
		assert!(!first.as_str().contains('='));
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let id = RevocationId::for_token("token");
		let map: HashMap<RevocationId, u8> = HashMap::from_iter([(id.clone(), 7_u8)]);

		assert_eq!(map.get(id.as_str()), Some(&7));
	}
}
