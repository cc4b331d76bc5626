//! Immutable declaration graph for one compilation session.
//!
//! The graph is the external collaborator queried by the export namer and the
//! symbol mangler: declaration kinds, containment, parameter shapes, subtype
//! reachability, and per-member bridge classifications. It is constructed via
//! [`builder::GraphBuilder`] and frozen; declarations never change afterwards.

use serde::Serialize;

pub mod bridge;
pub mod builder;
pub mod graph;

pub use bridge::{BridgeParam, BridgeReturn, BridgeShape};
pub use builder::{Decl, GraphBuilder};
pub use graph::{Declaration, DeclGraph, Param};

/// A stable identifier for a module in the program.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub struct ModuleId(pub u32);

/// A stable identifier for a source unit (file) within a module.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub struct UnitId(pub u32);

/// A stable identifier for a declaration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub struct DeclId(pub u32);

/// An interned type name, used in structural signatures and parameter lists.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub struct TypeRef(pub u32);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum DeclKind {
  Class,
  Interface,
  Singleton,
  EnumEntry,
  FileContainer,
  Method,
  Constructor,
  Property,
  Accessor,
}

impl DeclKind {
  /// Whether this declaration introduces an exported type of its own.
  pub fn is_type(self) -> bool {
    matches!(
      self,
      DeclKind::Class | DeclKind::Interface | DeclKind::Singleton | DeclKind::FileContainer
    )
  }

  /// Whether this declaration is a callable member (receives a selector).
  pub fn is_callable(self) -> bool {
    matches!(
      self,
      DeclKind::Method | DeclKind::Constructor | DeclKind::Accessor
    )
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum AccessorKind {
  Getter,
  Setter,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum Modality {
  Final,
  Open,
  Abstract,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum Visibility {
  Public,
  Internal,
  Private,
}

/// Where a declaration's identity comes from.
///
/// Interop-originating declarations were produced from a pre-existing external
/// binary interface description and may carry the stable identifier recorded
/// there; freshly compiled declarations are `Source`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub enum Origin {
  Source,
  Interop { uid: Option<String> },
}

/// Handles to the declarations that receive forced, well-known names before
/// any dynamic allocation happens.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum WellKnown {
  /// The root type of the standard runtime module.
  Root,
  MutableSet,
  MutableDictionary,
  /// The root type's equality test member.
  Equals,
  /// The root type's hash code member.
  HashCode,
  /// The root type's string conversion member.
  ToString,
}
