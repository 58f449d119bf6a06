//! Typed claim set carried inside every signed token, plus lifecycle helpers.

// self
use crate::{
	_prelude::*,
	auth::{Subject, TokenKind},
};

/// Expiry-driven lifecycle status of a decoded claim set.
///
/// Revocation is orthogonal and tracked by the revocation store, not by the claims.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Token is within its lifetime.
	Active,
	/// Token reached its expiry instant.
	Expired,
}

/// Fixed-field claim set serialized as `{sub, type, iat, exp}`.
///
/// Timestamps travel as unix seconds; every comparison happens at second granularity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
	/// Authenticated principal.
	#[serde(rename = "sub")]
	pub subject: Subject,
	/// Token kind, checked against the kind the caller expects.
	#[serde(rename = "type")]
	pub kind: TokenKind,
	/// Issued-at instant.
	#[serde(rename = "iat", with = "time::serde::timestamp")]
	pub issued_at: OffsetDateTime,
	/// Expiry instant (`issued_at + ttl(kind)`).
	#[serde(rename = "exp", with = "time::serde::timestamp")]
	pub expires_at: OffsetDateTime,
}
impl Claims {
	/// Builds claims issued at `now` (truncated to whole seconds) and living for `ttl`.
	pub fn new(subject: Subject, kind: TokenKind, now: OffsetDateTime, ttl: Duration) -> Self {
		let issued_at = truncate_to_seconds(now);

		Self { subject, kind, issued_at, expires_at: issued_at.saturating_add(ttl) }
	}

	/// Computes the status at `instant`, tolerating `leeway` past the expiry.
	pub fn status_at(&self, instant: OffsetDateTime, leeway: Duration) -> TokenStatus {
		let deadline = self.expires_at.unix_timestamp().saturating_add(leeway.whole_seconds());

		if instant.unix_timestamp() >= deadline { TokenStatus::Expired } else { TokenStatus::Active }
	}

	/// Returns `true` if the claims have expired at `instant` with zero leeway.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant, Duration::ZERO), TokenStatus::Expired)
	}
}

pub(crate) fn truncate_to_seconds(instant: OffsetDateTime) -> OffsetDateTime {
	instant - Duration::nanoseconds(i64::from(instant.nanosecond()))
}
