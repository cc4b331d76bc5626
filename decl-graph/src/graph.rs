use crate::bridge::BridgeShape;
use crate::{
  AccessorKind, DeclId, DeclKind, Modality, ModuleId, Origin, TypeRef, UnitId, Visibility,
  WellKnown,
};
use ahash::{HashMap, HashSet};
use serde::Serialize;

/// One ordered parameter of a callable declaration.
///
/// A `None` label contributes an empty selector label (receiver-style
/// synthetic parameters, a setter's sole value parameter).
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Param {
  pub label: Option<String>,
  pub ty: TypeRef,
}

/// One declaration of the compiled program. Immutable once the graph is
/// frozen; the namer and mangler only ever read it.
#[derive(Clone, Debug)]
pub struct Declaration {
  pub kind: DeclKind,
  pub name: String,
  pub parent: Option<DeclId>,
  pub module: ModuleId,
  pub unit: UnitId,
  pub params: Vec<Param>,
  pub modality: Modality,
  pub visibility: Visibility,
  pub origin: Origin,
  /// Direct supertypes; subtype reachability is the transitive closure.
  pub supertypes: Vec<DeclId>,
  /// For `DeclKind::Accessor`: which side of the property this is.
  pub accessor: Option<AccessorKind>,
  /// For `DeclKind::Accessor`: the property it belongs to.
  pub property: Option<DeclId>,
  /// Bridge classification, present iff the member bridges to the
  /// flat-namespace foreign runtime.
  pub bridge: Option<BridgeShape>,
  /// Carries a receiver when true; type-level members are false.
  pub is_instance_member: bool,
  /// Category/extension member (type-level receiver outside the type).
  pub is_extension: bool,
  pub is_synthetic: bool,
  pub is_fake_override: bool,
  /// Constructor of an array type.
  pub constructs_array: bool,
  pub explicit_flat_name: Option<String>,
  pub explicit_nested_name: Option<String>,
  pub explicit_binary_name: Option<String>,
}

#[derive(Clone, Debug)]
pub(crate) struct ModuleData {
  pub name: String,
  pub is_runtime: bool,
  pub in_export_unit: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct UnitData {
  pub name: String,
  #[allow(dead_code)]
  pub module: ModuleId,
}

/// The frozen declaration graph for one compilation session.
pub struct DeclGraph {
  pub(crate) decls: Vec<Declaration>,
  pub(crate) modules: Vec<ModuleData>,
  pub(crate) units: Vec<UnitData>,
  pub(crate) type_names: Vec<String>,
  pub(crate) well_known: HashMap<WellKnown, DeclId>,
  /// Canonical visitation order: (module, unit, insertion).
  pub(crate) order: Vec<DeclId>,
}

impl DeclGraph {
  pub fn decl(&self, d: DeclId) -> &Declaration {
    &self.decls[d.0 as usize]
  }

  pub fn kind(&self, d: DeclId) -> DeclKind {
    self.decl(d).kind
  }

  pub fn name(&self, d: DeclId) -> &str {
    &self.decl(d).name
  }

  pub fn parent(&self, d: DeclId) -> Option<DeclId> {
    self.decl(d).parent
  }

  pub fn module_of(&self, d: DeclId) -> ModuleId {
    self.decl(d).module
  }

  pub fn unit_of(&self, d: DeclId) -> UnitId {
    self.decl(d).unit
  }

  pub fn module_name(&self, m: ModuleId) -> &str {
    &self.modules[m.0 as usize].name
  }

  pub fn unit_name(&self, u: UnitId) -> &str {
    &self.units[u.0 as usize].name
  }

  /// Whether the module is the standard runtime module.
  pub fn is_runtime_module(&self, m: ModuleId) -> bool {
    self.modules[m.0 as usize].is_runtime
  }

  /// Whether the module is part of the unit of modules being exported
  /// together (and therefore needs no disambiguating prefix).
  pub fn is_exported_with(&self, m: ModuleId) -> bool {
    self.modules[m.0 as usize].in_export_unit
  }

  pub fn type_name(&self, t: TypeRef) -> &str {
    &self.type_names[t.0 as usize]
  }

  pub fn bridge_shape(&self, d: DeclId) -> Option<&BridgeShape> {
    self.decl(d).bridge.as_ref()
  }

  pub fn well_known(&self, w: WellKnown) -> Option<DeclId> {
    self.well_known.get(&w).copied()
  }

  /// Reflexive-transitive supertype reachability: `a` is `b` or inherits from
  /// `b` through any chain of direct supertypes.
  pub fn is_subtype_of(&self, a: DeclId, b: DeclId) -> bool {
    if a == b {
      return true;
    }
    let mut seen = HashSet::default();
    let mut queue = vec![a];
    while let Some(d) = queue.pop() {
      if !seen.insert(d) {
        continue;
      }
      for &sup in self.decl(d).supertypes.iter() {
        if sup == b {
          return true;
        }
        queue.push(sup);
      }
    }
    false
  }

  /// Declarations in the canonical visitation order required for
  /// reproducible first-come-first-served allocation.
  pub fn decls_in_order(&self) -> impl Iterator<Item = DeclId> + '_ {
    self.order.iter().copied()
  }

  pub fn len(&self) -> usize {
    self.decls.len()
  }

  pub fn is_empty(&self) -> bool {
    self.decls.is_empty()
  }
}
