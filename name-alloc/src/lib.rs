//! Name allocation tables and mangling sequences.
//!
//! [`table::NameTable`] is the generic element-to-name store with reservation
//! and conflict rules; [`seq::mangle_seq`] produces the deterministic infinite
//! fallback sequences fed into it on collision.

pub mod error;
pub mod seq;
pub mod table;

pub use error::{AllocError, AllocErrorType, AllocResult};
pub use seq::{mangle_seq, MangleKind};
pub use table::{NameTable, SharedNameTable, TableMode, MAX_MANGLE_STEPS};
