//! Exported-name assignment for declarations consumed by two foreign surface
//! languages: a flat-namespace target (one global namespace, colon-delimited
//! selectors) and a nested target (dotted names, labeled call signatures).
//!
//! [`namer::ExportNamer`] drives candidate construction per declaration kind
//! and routes every candidate through the conflict-aware allocation tables of
//! `name-alloc`; [`conflict`] is the oracle deciding which declarations must
//! keep distinct names.

use serde::Serialize;

pub mod conflict;
pub mod error;
pub mod namer;
pub mod reserved;
pub mod words;

pub use error::{NamerError, NamerErrorType, NamerResult};
pub use namer::ExportNamer;

/// Exported names of a type, one per target namespace.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ExportName {
  /// Flat-namespace name, including the module-derived prefix.
  pub flat: String,
  /// Nested-target name; dotted for nested declarations where the target
  /// allows it.
  pub nested: String,
  /// Linkage-visible runtime class name. Defaults to the flat name.
  pub binary: String,
}

/// Exported names of a callable.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct MethodName {
  /// Flat-target selector, e.g. `speakWithSound:`.
  pub selector: String,
  /// Nested-target signature, e.g. `speak(sound:)`.
  pub nested_signature: String,
}

/// Options controlling name construction.
#[derive(Clone, Debug)]
pub struct NamerConfig {
  /// Verb prepended to base names that would otherwise start a
  /// memory-management method family of the flat runtime.
  pub neutral_verb: String,
  /// Whether the nested-language target is being produced. Affects the base
  /// name of array-constructing constructors.
  pub nested_target: bool,
}

impl Default for NamerConfig {
  fn default() -> Self {
    Self {
      neutral_verb: "do".to_string(),
      nested_target: true,
    }
  }
}
