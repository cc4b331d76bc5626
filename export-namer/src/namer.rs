use crate::conflict::members_conflict;
use crate::error::{NamerError, NamerResult};
use crate::reserved;
use crate::words;
use crate::{ExportName, MethodName, NamerConfig};
use ahash::HashMap;
use decl_graph::{
  AccessorKind, BridgeParam, BridgeShape, DeclGraph, DeclId, DeclKind, WellKnown,
};
use name_alloc::{mangle_seq, MangleKind, NameTable, TableMode};

/// Fixed flat prefix of the standard runtime module's top-level types.
pub const RUNTIME_MODULE_PREFIX: &str = "Std";

/// Well-known runtime types whose names are forced before any dynamic
/// allocation. The flat name carries the runtime prefix.
const FORCED_TYPE_NAMES: [(WellKnown, &str); 3] = [
  (WellKnown::Root, "Base"),
  (WellKnown::MutableSet, "MutableSet"),
  (WellKnown::MutableDictionary, "MutableDictionary"),
];

/// Root-type members pre-bound to the foreign root type's own protocol:
/// (member, selector, nested signature).
const FORCED_MEMBER_NAMES: [(WellKnown, &str, &str); 3] = [
  (WellKnown::Equals, "isEqual:", "isEqual(_:)"),
  (WellKnown::HashCode, "hash", "hash()"),
  (WellKnown::ToString, "description", "description()"),
];

/// Assigns exported names to declarations, one instance per naming session.
///
/// All name state lives in the per-kind allocation tables; in global mode
/// every binding persists for the session, and the well-known runtime names
/// are force-assigned up front so no dynamic request can ever take them.
pub struct ExportNamer<'g> {
  graph: &'g DeclGraph,
  config: NamerConfig,
  mode: TableMode,
  // Flat-namespace tables: the flat target keeps classes and protocols in
  // separate namespaces, the nested target has a single one for both.
  flat_class_names: NameTable<DeclId>,
  flat_protocol_names: NameTable<DeclId>,
  nested_type_names: NameTable<DeclId>,
  selectors: NameTable<DeclId>,
  nested_signatures: NameTable<DeclId>,
  property_names: NameTable<DeclId>,
  accessor_names: NameTable<DeclId>,
  type_cache: HashMap<DeclId, ExportName>,
  method_cache: HashMap<DeclId, MethodName>,
}

impl<'g> ExportNamer<'g> {
  pub fn new(graph: &'g DeclGraph, config: NamerConfig, mode: TableMode) -> NamerResult<Self> {
    let mut selectors = NameTable::new(mode);
    selectors.reserve_all(reserved::instance_reserved());
    let mut property_names = NameTable::new(mode);
    property_names.reserve_all(reserved::instance_reserved());
    let mut accessor_names = NameTable::new(mode);
    accessor_names.reserve_all(reserved::class_level_reserved());

    let mut namer = Self {
      graph,
      config,
      mode,
      flat_class_names: NameTable::new(mode),
      flat_protocol_names: NameTable::new(mode),
      nested_type_names: NameTable::new(mode),
      selectors,
      nested_signatures: NameTable::new(mode),
      property_names,
      accessor_names,
      type_cache: HashMap::default(),
      method_cache: HashMap::default(),
    };
    if mode == TableMode::Global {
      namer.force_well_known()?;
    }
    Ok(namer)
  }

  pub fn graph(&self) -> &'g DeclGraph {
    self.graph
  }

  pub fn mode(&self) -> TableMode {
    self.mode
  }

  /// Names every declaration of the graph in the canonical visitation order.
  /// First-come-first-served allocation makes this the reproducibility
  /// anchor: callers wanting stable output run this once per session.
  pub fn assign_all(&mut self) -> NamerResult<()> {
    let graph = self.graph;
    for d in graph.decls_in_order() {
      match graph.kind(d) {
        DeclKind::Class | DeclKind::Interface | DeclKind::FileContainer => {
          self.type_names(d)?;
        }
        DeclKind::Singleton => {
          self.type_names(d)?;
          self.singleton_accessor(d)?;
        }
        DeclKind::EnumEntry => {
          self.enum_entry_accessor(d)?;
        }
        DeclKind::Method | DeclKind::Constructor | DeclKind::Accessor => {
          self.method_names(d)?;
        }
        DeclKind::Property => {
          self.property_name(d)?;
        }
      }
    }
    Ok(())
  }

  /// The exported name triple of a type declaration.
  pub fn type_names(&mut self, d: DeclId) -> NamerResult<ExportName> {
    if self.mode == TableMode::Global {
      if let Some(name) = self.type_cache.get(&d) {
        return Ok(name.clone());
      }
    }
    let decl = self.graph.decl(d);
    if !decl.kind.is_type() {
      return Err(NamerError::unrecognized(&decl.name));
    }

    let flat = self.flat_type_name(d)?;
    let nested = self.nested_type_name(d)?;
    let binary = self
      .graph
      .decl(d)
      .explicit_binary_name
      .clone()
      .unwrap_or_else(|| flat.clone());
    let name = ExportName {
      flat,
      nested,
      binary,
    };
    if self.mode == TableMode::Global {
      self.type_cache.insert(d, name.clone());
    }
    Ok(name)
  }

  /// The flat selector and nested signature of a callable declaration.
  pub fn method_names(&mut self, d: DeclId) -> NamerResult<MethodName> {
    if self.mode == TableMode::Global {
      if let Some(name) = self.method_cache.get(&d) {
        return Ok(name.clone());
      }
    }
    let graph = self.graph;
    let decl = graph.decl(d);
    if !decl.kind.is_callable() {
      return Err(NamerError::unrecognized(&decl.name));
    }

    let base = self.method_base_name(d)?;
    let shape = effective_shape(graph, d);
    let selector_base = build_selector(graph, d, &base, &shape);
    let nested_base = build_nested_signature(graph, d, &base, &shape);

    let selector = self
      .selectors
      .get_or_assign(d, mangle_seq(selector_base, MangleKind::Selector), |a, b| {
        members_conflict(graph, a, b)
      })
      .map_err(|e| NamerError::alloc(&graph.decl(d).name, e))?;
    let nested_signature = self
      .nested_signatures
      .get_or_assign(
        d,
        mangle_seq(nested_base, MangleKind::NestedSignature),
        |a, b| members_conflict(graph, a, b),
      )
      .map_err(|e| NamerError::alloc(&graph.decl(d).name, e))?;

    let name = MethodName {
      selector,
      nested_signature,
    };
    if self.mode == TableMode::Global {
      self.method_cache.insert(d, name.clone());
    }
    Ok(name)
  }

  /// The flat accessor name of a property declaration.
  pub fn property_name(&mut self, d: DeclId) -> NamerResult<String> {
    let graph = self.graph;
    let decl = graph.decl(d);
    if decl.kind != DeclKind::Property {
      return Err(NamerError::unrecognized(&decl.name));
    }
    self
      .property_names
      .get_or_assign(
        d,
        mangle_seq(decl.name.clone(), MangleKind::Simple),
        |a, b| members_conflict(graph, a, b),
      )
      .map_err(|e| NamerError::alloc(&decl.name, e))
  }

  /// The class-level accessor exposing a singleton instance.
  pub fn singleton_accessor(&mut self, d: DeclId) -> NamerResult<String> {
    let graph = self.graph;
    let decl = graph.decl(d);
    if decl.kind != DeclKind::Singleton {
      return Err(NamerError::unrecognized(&decl.name));
    }
    let base = words::avoid_family_prefix(
      &words::decapitalize(&decl.name),
      &self.config.neutral_verb,
    );
    self
      .accessor_names
      .get_or_assign(d, mangle_seq(base, MangleKind::Simple), |a, b| {
        accessors_conflict(graph, a, b)
      })
      .map_err(|e| NamerError::alloc(&decl.name, e))
  }

  /// The class-level accessor exposing an enum entry.
  pub fn enum_entry_accessor(&mut self, d: DeclId) -> NamerResult<String> {
    let graph = self.graph;
    let decl = graph.decl(d);
    if decl.kind != DeclKind::EnumEntry {
      return Err(NamerError::unrecognized(&decl.name));
    }
    let base = words::avoid_family_prefix(
      &words::screaming_to_camel(&decl.name),
      &self.config.neutral_verb,
    );
    self
      .accessor_names
      .get_or_assign(d, mangle_seq(base, MangleKind::Simple), |a, b| {
        accessors_conflict(graph, a, b)
      })
      .map_err(|e| NamerError::alloc(&decl.name, e))
  }

  fn force_well_known(&mut self) -> NamerResult<()> {
    let graph = self.graph;
    for (w, name) in FORCED_TYPE_NAMES {
      let Some(d) = graph.well_known(w) else {
        continue;
      };
      let flat = format!("{}{}", RUNTIME_MODULE_PREFIX, name);
      let table = self.flat_table_for(graph.kind(d));
      table
        .force_assign(d, flat)
        .map_err(|e| NamerError::alloc(graph.name(d), e))?;
      self
        .nested_type_names
        .force_assign(d, name)
        .map_err(|e| NamerError::alloc(graph.name(d), e))?;
    }
    for (w, selector, nested) in FORCED_MEMBER_NAMES {
      let Some(d) = graph.well_known(w) else {
        continue;
      };
      self
        .selectors
        .force_assign(d, selector)
        .map_err(|e| NamerError::alloc(graph.name(d), e))?;
      self
        .nested_signatures
        .force_assign(d, nested)
        .map_err(|e| NamerError::alloc(graph.name(d), e))?;
    }
    // The zero-parameter root members surface as properties on the flat
    // target as well.
    for (w, property) in [
      (WellKnown::HashCode, "hash"),
      (WellKnown::ToString, "description"),
    ] {
      let Some(d) = graph.well_known(w) else {
        continue;
      };
      self
        .property_names
        .force_assign(d, property)
        .map_err(|e| NamerError::alloc(graph.name(d), e))?;
    }
    Ok(())
  }

  fn flat_table_for(&mut self, kind: DeclKind) -> &mut NameTable<DeclId> {
    if kind == DeclKind::Interface {
      &mut self.flat_protocol_names
    } else {
      &mut self.flat_class_names
    }
  }

  /// Simple exported name of a type: its own capitalized name, or the
  /// unit-derived container name for synthesized file containers.
  fn simple_type_name(&self, d: DeclId) -> String {
    let decl = self.graph.decl(d);
    if decl.kind == DeclKind::FileContainer {
      format!("{}Kt", words::unit_stem(self.graph.unit_name(decl.unit)))
    } else {
      words::capitalize(&decl.name)
    }
  }

  fn top_level_prefix(&self, d: DeclId) -> String {
    let m = self.graph.module_of(d);
    if self.graph.is_runtime_module(m) {
      RUNTIME_MODULE_PREFIX.to_string()
    } else if self.graph.is_exported_with(m) {
      String::new()
    } else {
      words::module_prefix(self.graph.module_name(m))
    }
  }

  fn type_parent(&self, d: DeclId) -> Option<DeclId> {
    self
      .graph
      .parent(d)
      .filter(|&p| self.graph.kind(p).is_type())
  }

  fn flat_type_name(&mut self, d: DeclId) -> NamerResult<String> {
    let kind = self.graph.kind(d);
    if let Some(name) = self.flat_table_for(kind).name_of(d) {
      return Ok(name.to_string());
    }

    // The flat target has no nesting: a nested type concatenates onto its
    // containing type's already-prefixed flat name.
    let base = match self.type_parent(d) {
      Some(p) => format!("{}{}", self.flat_type_name(p)?, self.simple_type_name(d)),
      None => format!("{}{}", self.top_level_prefix(d), self.simple_type_name(d)),
    };
    let explicit = self.graph.decl(d).explicit_flat_name.clone();
    let candidates = explicit
      .into_iter()
      .chain(mangle_seq(base, MangleKind::Simple));
    self
      .flat_table_for(kind)
      .get_or_assign(d, candidates, |_, _| true)
      .map_err(|e| NamerError::alloc(self.graph.name(d), e))
  }

  fn nested_type_name(&mut self, d: DeclId) -> NamerResult<String> {
    if let Some(name) = self.nested_type_names.name_of(d) {
      return Ok(name.to_string());
    }

    let simple = self.simple_type_name(d);
    let base = match self.type_parent(d) {
      Some(p) => {
        let outer = self.nested_type_name(p)?;
        // The nested target forbids nested interface-like declarations and
        // nesting deeper than one level; both cases flatten.
        let flatten = self.graph.kind(p) == DeclKind::Interface
          || self.graph.kind(d) == DeclKind::Interface
          || outer.contains('.');
        if flatten {
          format!("{}{}", outer.replace('.', ""), simple)
        } else {
          format!("{}.{}", outer, simple)
        }
      }
      None => simple,
    };
    let explicit = self.graph.decl(d).explicit_nested_name.clone();
    let candidates = explicit
      .into_iter()
      .chain(mangle_seq(base, MangleKind::Simple));
    self
      .nested_type_names
      .get_or_assign(d, candidates, |_, _| true)
      .map_err(|e| NamerError::alloc(self.graph.name(d), e))
  }

  /// Base name of a callable before labels are appended. Constructors keep
  /// their `init`/`array` bases: they are supposed to sit in the flat
  /// runtime's init family. Everything else is steered away from the
  /// memory-management families with the neutral verb.
  fn method_base_name(&self, d: DeclId) -> NamerResult<String> {
    let decl = self.graph.decl(d);
    let raw = match decl.kind {
      DeclKind::Constructor => {
        if decl.constructs_array && !self.config.nested_target {
          "array".to_string()
        } else {
          "init".to_string()
        }
      }
      DeclKind::Accessor => {
        let property = decl
          .property
          .ok_or_else(|| NamerError::unrecognized(&decl.name))?;
        let property_name = self.graph.name(property).to_string();
        match decl
          .accessor
          .ok_or_else(|| NamerError::unrecognized(&decl.name))?
        {
          AccessorKind::Getter => property_name,
          AccessorKind::Setter => format!("set{}", words::capitalize(&property_name)),
        }
      }
      DeclKind::Method => decl.name.clone(),
      _ => return Err(NamerError::unrecognized(&decl.name)),
    };
    if decl.kind == DeclKind::Constructor {
      Ok(raw)
    } else {
      Ok(words::avoid_family_prefix(&raw, &self.config.neutral_verb))
    }
  }
}

fn effective_shape(graph: &DeclGraph, d: DeclId) -> BridgeShape {
  match graph.bridge_shape(d) {
    Some(shape) => shape.clone(),
    None => BridgeShape::direct(graph.decl(d).params.len()),
  }
}

/// Builds the flat-target selector: one label per foreign parameter, each
/// terminated by `:`. The first label merges into the base name, prefixed
/// `With` when a declared label exists and `AndReturn` when the position is a
/// synthesized out-parameter; empty labels (receiver-style parameters, a
/// setter's value parameter) contribute a bare `:`.
fn build_selector(graph: &DeclGraph, d: DeclId, base: &str, shape: &BridgeShape) -> String {
  let decl = graph.decl(d);
  let mut selector = base.to_string();
  let mut declared = decl.params.iter();
  for (i, bp) in shape.params.iter().enumerate() {
    let label = match bp {
      BridgeParam::Mapped => declared.next().and_then(|p| p.label.clone()),
      BridgeParam::ErrorOut => Some("error".to_string()),
      BridgeParam::ResultOut => Some("result".to_string()),
    };
    if i == 0 {
      if let Some(label) = label {
        let prefix = if bp.is_out() { "AndReturn" } else { "With" };
        selector.push_str(prefix);
        selector.push_str(&words::capitalize(&label));
      }
    } else if let Some(label) = label {
      selector.push_str(&label);
    }
    selector.push(':');
  }
  selector
}

/// Builds the nested-target signature `name(label1:label2:)`. Labels stay
/// unprefixed; unlabeled parameters render as `_`; a synthesized error-out
/// parameter is omitted entirely.
fn build_nested_signature(graph: &DeclGraph, d: DeclId, base: &str, shape: &BridgeShape) -> String {
  let decl = graph.decl(d);
  let mut signature = format!("{}(", base);
  let mut declared = decl.params.iter();
  for bp in shape.params.iter() {
    match bp {
      BridgeParam::Mapped => {
        let label = declared
          .next()
          .and_then(|p| p.label.clone())
          .unwrap_or_else(|| "_".to_string());
        signature.push_str(&label);
        signature.push(':');
      }
      BridgeParam::ErrorOut => {}
      BridgeParam::ResultOut => signature.push_str("result:"),
    }
  }
  signature.push(')');
  signature
}

/// Conflict rule for the class-level accessor table: singleton accessors
/// never conflict; enum-entry accessors conflict only with sibling entries of
/// the same enclosing type.
fn accessors_conflict(graph: &DeclGraph, a: DeclId, b: DeclId) -> bool {
  graph.kind(a) == DeclKind::EnumEntry
    && graph.kind(b) == DeclKind::EnumEntry
    && graph.parent(a).is_some()
    && graph.parent(a) == graph.parent(b)
}
