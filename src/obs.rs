//! Optional observability helpers for token operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `token_warden.op` with the `op`
//!   (operation) and `stage` (call site) fields, plus failure events keyed by the error kind.
//!   [`OperationSpan`] wraps every service operation and records its outcome.
//! - Enable `metrics` to increment the `token_warden_operation_total` counter for every
//!   attempt/success/failure, labeled by `op` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Service operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Token pair issuance.
	Issue,
	/// Token verification.
	Verify,
	/// Access token renewal from a refresh token.
	Refresh,
	/// Token revocation.
	Revoke,
	/// Credential check followed by issuance.
	Login,
	/// Revocation of a caller's own access token.
	Logout,
	/// Revocation store housekeeping.
	Prune,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Issue => "issue",
			Operation::Verify => "verify",
			Operation::Refresh => "refresh",
			Operation::Revoke => "revoke",
			Operation::Login => "login",
			Operation::Logout => "logout",
			Operation::Prune => "prune",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to a service operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
