use crate::bridge::BridgeShape;
use crate::graph::{Declaration, DeclGraph, ModuleData, Param, UnitData};
use crate::{
  AccessorKind, DeclId, DeclKind, Modality, ModuleId, Origin, TypeRef, UnitId, Visibility,
  WellKnown,
};
use ahash::HashMap;

/// A declaration under construction. Fields not set through the chainers keep
/// the defaults: final, public, source-originating, instance-level for member
/// kinds.
#[derive(Clone, Debug)]
pub struct Decl {
  kind: DeclKind,
  name: String,
  parent: Option<DeclId>,
  params: Vec<Param>,
  modality: Modality,
  visibility: Visibility,
  origin: Origin,
  supertypes: Vec<DeclId>,
  accessor: Option<AccessorKind>,
  property: Option<DeclId>,
  bridge: Option<BridgeShape>,
  is_instance_member: bool,
  is_extension: bool,
  is_synthetic: bool,
  is_fake_override: bool,
  constructs_array: bool,
  explicit_flat_name: Option<String>,
  explicit_nested_name: Option<String>,
  explicit_binary_name: Option<String>,
}

impl Decl {
  pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
    Self {
      kind,
      name: name.into(),
      parent: None,
      params: Vec::new(),
      modality: Modality::Final,
      visibility: Visibility::Public,
      origin: Origin::Source,
      supertypes: Vec::new(),
      accessor: None,
      property: None,
      bridge: None,
      is_instance_member: !kind.is_type() && kind != DeclKind::EnumEntry,
      is_extension: false,
      is_synthetic: false,
      is_fake_override: false,
      constructs_array: false,
      explicit_flat_name: None,
      explicit_nested_name: None,
      explicit_binary_name: None,
    }
  }

  pub fn class(name: impl Into<String>) -> Self {
    Self::new(DeclKind::Class, name)
  }

  pub fn interface(name: impl Into<String>) -> Self {
    Self::new(DeclKind::Interface, name).open()
  }

  pub fn singleton(name: impl Into<String>) -> Self {
    Self::new(DeclKind::Singleton, name)
  }

  pub fn method(name: impl Into<String>) -> Self {
    Self::new(DeclKind::Method, name)
  }

  pub fn constructor() -> Self {
    Self::new(DeclKind::Constructor, "<init>")
  }

  pub fn property(name: impl Into<String>) -> Self {
    Self::new(DeclKind::Property, name)
  }

  pub fn enum_entry(name: impl Into<String>) -> Self {
    Self::new(DeclKind::EnumEntry, name)
  }

  /// The synthesized container for a unit's top-level callables. Its exported
  /// name is derived from the unit name, so it carries none of its own.
  pub fn file_container() -> Self {
    let mut decl = Self::new(DeclKind::FileContainer, "");
    decl.is_synthetic = true;
    decl
  }

  pub fn accessor(kind: AccessorKind, property: DeclId) -> Self {
    let mut decl = Self::new(DeclKind::Accessor, "");
    decl.accessor = Some(kind);
    decl.property = Some(property);
    decl
  }

  pub fn in_(mut self, parent: DeclId) -> Self {
    self.parent = Some(parent);
    self
  }

  pub fn param(mut self, label: impl Into<String>, ty: TypeRef) -> Self {
    self.params.push(Param {
      label: Some(label.into()),
      ty,
    });
    self
  }

  pub fn unlabeled_param(mut self, ty: TypeRef) -> Self {
    self.params.push(Param { label: None, ty });
    self
  }

  pub fn open(mut self) -> Self {
    self.modality = Modality::Open;
    self
  }

  pub fn abstract_(mut self) -> Self {
    self.modality = Modality::Abstract;
    self
  }

  pub fn visibility(mut self, v: Visibility) -> Self {
    self.visibility = v;
    self
  }

  pub fn interop(mut self, uid: Option<&str>) -> Self {
    self.origin = Origin::Interop {
      uid: uid.map(|u| u.to_string()),
    };
    self
  }

  pub fn extends(mut self, supertype: DeclId) -> Self {
    self.supertypes.push(supertype);
    self
  }

  pub fn bridge(mut self, shape: BridgeShape) -> Self {
    self.bridge = Some(shape);
    self
  }

  pub fn type_level(mut self) -> Self {
    self.is_instance_member = false;
    self
  }

  pub fn extension(mut self) -> Self {
    self.is_extension = true;
    self
  }

  pub fn synthetic(mut self) -> Self {
    self.is_synthetic = true;
    self
  }

  pub fn fake_override(mut self) -> Self {
    self.is_fake_override = true;
    self
  }

  pub fn constructs_array(mut self) -> Self {
    self.constructs_array = true;
    self
  }

  pub fn flat_name(mut self, name: impl Into<String>) -> Self {
    self.explicit_flat_name = Some(name.into());
    self
  }

  pub fn nested_name(mut self, name: impl Into<String>) -> Self {
    self.explicit_nested_name = Some(name.into());
    self
  }

  pub fn binary_name(mut self, name: impl Into<String>) -> Self {
    self.explicit_binary_name = Some(name.into());
    self
  }
}

/// Builds a [`DeclGraph`]. All mutation happens here; `finish` freezes the
/// graph for the rest of the session.
#[derive(Default)]
pub struct GraphBuilder {
  decls: Vec<Declaration>,
  modules: Vec<ModuleData>,
  units: Vec<UnitData>,
  type_names: Vec<String>,
  type_index: HashMap<String, TypeRef>,
  well_known: HashMap<WellKnown, DeclId>,
}

impl GraphBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn module(&mut self, name: impl Into<String>) -> ModuleId {
    let id = ModuleId(self.modules.len() as u32);
    self.modules.push(ModuleData {
      name: name.into(),
      is_runtime: false,
      in_export_unit: false,
    });
    id
  }

  /// The standard runtime module; its top-level types use the fixed prefix.
  pub fn runtime_module(&mut self, name: impl Into<String>) -> ModuleId {
    let id = self.module(name);
    self.modules[id.0 as usize].is_runtime = true;
    id
  }

  /// Marks a module as part of the current export unit, removing the
  /// module-derived prefix from its top-level declarations.
  pub fn export_with(&mut self, m: ModuleId) {
    self.modules[m.0 as usize].in_export_unit = true;
  }

  pub fn unit(&mut self, module: ModuleId, name: impl Into<String>) -> UnitId {
    let id = UnitId(self.units.len() as u32);
    self.units.push(UnitData {
      name: name.into(),
      module,
    });
    id
  }

  pub fn ty(&mut self, name: &str) -> TypeRef {
    if let Some(&t) = self.type_index.get(name) {
      return t;
    }
    let t = TypeRef(self.type_names.len() as u32);
    self.type_names.push(name.to_string());
    self.type_index.insert(name.to_string(), t);
    t
  }

  pub fn add(&mut self, module: ModuleId, unit: UnitId, decl: Decl) -> DeclId {
    let id = DeclId(self.decls.len() as u32);
    self.decls.push(Declaration {
      kind: decl.kind,
      name: decl.name,
      parent: decl.parent,
      module,
      unit,
      params: decl.params,
      modality: decl.modality,
      visibility: decl.visibility,
      origin: decl.origin,
      supertypes: decl.supertypes,
      accessor: decl.accessor,
      property: decl.property,
      bridge: decl.bridge,
      is_instance_member: decl.is_instance_member,
      is_extension: decl.is_extension,
      is_synthetic: decl.is_synthetic,
      is_fake_override: decl.is_fake_override,
      constructs_array: decl.constructs_array,
      explicit_flat_name: decl.explicit_flat_name,
      explicit_nested_name: decl.explicit_nested_name,
      explicit_binary_name: decl.explicit_binary_name,
    });
    id
  }

  pub fn well_known(&mut self, w: WellKnown, d: DeclId) {
    self.well_known.insert(w, d);
  }

  pub fn finish(self) -> DeclGraph {
    let mut order: Vec<DeclId> = (0..self.decls.len() as u32).map(DeclId).collect();
    order.sort_by_key(|&d| {
      let decl = &self.decls[d.0 as usize];
      (decl.module, decl.unit, d)
    });
    DeclGraph {
      decls: self.decls,
      modules: self.modules,
      units: self.units,
      type_names: self.type_names,
      well_known: self.well_known,
      order,
    }
  }
}
