//! Split-key JWT codec.
//!
//! Access and refresh tokens are signed with distinct HMAC secrets, so a key compromise for
//! one kind cannot mint the other. Decoding always verifies with the key of the kind the
//! caller expects: an access token presented where a refresh token is required fails the
//! signature check instead of silently succeeding. The embedded `type` claim is checked
//! afterwards as a second line of defense.

// crates.io
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
// self
use crate::{
	_prelude::*,
	auth::{Claims, Subject, TokenKind, TokenSecret, TokenStatus},
	config::TokenConfig,
};

#[derive(Clone)]
struct KindKeys {
	encoding: EncodingKey,
	decoding: DecodingKey,
	ttl: Duration,
}

/// Encodes and decodes signed tokens; immutable once constructed.
#[derive(Clone)]
pub struct TokenCodec {
	header: Header,
	validation: Validation,
	access: KindKeys,
	refresh: KindKeys,
	leeway: Duration,
}
impl TokenCodec {
	/// Builds a codec from a validated configuration.
	pub fn new(config: &TokenConfig) -> Self {
		let algorithm = config.algorithm().to_jwt();
		let keys = |kind| {
			let secret = config.secret(kind).expose();

			KindKeys {
				encoding: EncodingKey::from_secret(secret),
				decoding: DecodingKey::from_secret(secret),
				ttl: config.ttl(kind),
			}
		};
		let mut validation = Validation::new(algorithm);

		// Expiry is checked against the injected clock, not the system time.
		validation.validate_exp = false;
		validation.validate_nbf = false;
		validation.validate_aud = false;
		validation.leeway = 0;
		validation.set_required_spec_claims(&["exp", "sub"]);

		Self {
			header: Header::new(algorithm),
			validation,
			access: keys(TokenKind::Access),
			refresh: keys(TokenKind::Refresh),
			leeway: config.leeway(),
		}
	}

	/// Signs a fresh claim set for `subject` issued at `now`.
	pub fn encode(
		&self,
		subject: &Subject,
		kind: TokenKind,
		now: OffsetDateTime,
	) -> Result<TokenSecret> {
		let claims = Claims::new(subject.clone(), kind, now, self.keys(kind).ttl);

		self.encode_claims(&claims)
	}

	/// Signs an arbitrary claim set with the key selected by its kind.
	pub fn encode_claims(&self, claims: &Claims) -> Result<TokenSecret> {
		jsonwebtoken::encode(&self.header, claims, &self.keys(claims.kind).encoding)
			.map(TokenSecret::new)
			.map_err(|source| Error::Encoding { source })
	}

	/// Decodes `token`, requiring it to be a live token of the `expected` kind at `now`.
	///
	/// Checks run in order: structure and signature under the expected key, the `type`
	/// claim, then expiry. Type runs before expiry so a cross-kind token always fails with
	/// [`Error::InvalidSignature`] or [`Error::TypeMismatch`].
	pub fn decode(&self, token: &str, expected: TokenKind, now: OffsetDateTime) -> Result<Claims> {
		let claims = self.verify_signature(token, expected)?;

		if claims.kind != expected {
			return Err(Error::TypeMismatch { expected, actual: claims.kind });
		}
		if claims.status_at(now, self.leeway) == TokenStatus::Expired {
			return Err(Error::Expired);
		}

		Ok(claims)
	}

	/// Returns the claims of a genuine token of either kind, ignoring expiry.
	///
	/// Yields `None` for anything that does not verify under the key matching its own
	/// `type` claim.
	pub fn inspect(&self, token: &str) -> Option<Claims> {
		TokenKind::ALL.into_iter().find_map(|kind| {
			self.verify_signature(token, kind).ok().filter(|claims| claims.kind == kind)
		})
	}

	/// Lifetime configured for `kind`.
	pub fn ttl(&self, kind: TokenKind) -> Duration {
		self.keys(kind).ttl
	}

	fn verify_signature(&self, token: &str, kind: TokenKind) -> Result<Claims> {
		jsonwebtoken::decode::<Claims>(token, &self.keys(kind).decoding, &self.validation)
			.map(|data| data.claims)
			.map_err(map_decode_error)
	}

	fn keys(&self, kind: TokenKind) -> &KindKeys {
		match kind {
			TokenKind::Access => &self.access,
			TokenKind::Refresh => &self.refresh,
		}
	}
}
impl Debug for TokenCodec {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenCodec")
			.field("algorithm", &self.header.alg)
			.field("access_ttl", &self.access.ttl)
			.field("refresh_ttl", &self.refresh.ttl)
			.field("leeway", &self.leeway)
			.finish_non_exhaustive()
	}
}

fn map_decode_error(e: jsonwebtoken::errors::Error) -> Error {
	match e.kind() {
		// A header naming another algorithm was not produced under our key either.
		ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Error::InvalidSignature,
		_ => Error::Malformed { source: Some(e) },
	}
}
