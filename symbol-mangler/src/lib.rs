//! Linkage-stable mangled identifiers for exported declarations.
//!
//! Exported names answer "what does the foreign caller type"; the mangled id
//! answers "which runtime symbol does the call bind to". The two namespaces
//! are independent: ids stay stable across sessions and processes, so they
//! are digests of content the graph fully determines, never of allocation
//! order.

use serde::Serialize;
use std::fmt;

pub mod error;
pub mod mangler;

pub use error::{MangleError, MangleErrorType, MangleResult};
pub use mangler::SymbolMangler;

/// Fixed-width linkage identifier of one exported declaration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MangledId(pub u64);

impl fmt::Display for MangledId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:016x}", self.0)
  }
}

impl fmt::Debug for MangledId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }
}
