//! Auth-domain identifiers, token kinds, claims, and boundary payloads.

pub mod id;
pub mod token;

pub use id::*;
pub use token::{claims::*, grant::*, kind::*, secret::*};
