use crate::error::{MangleError, MangleResult};
use crate::MangledId;
use ahash::HashMap;
use decl_graph::{AccessorKind, DeclGraph, DeclId, DeclKind, Origin};
use export_namer::ExportNamer;

/// Computes linkage-stable ids, one instance per export session.
///
/// Three signature sources, in precedence order: the interop identifier
/// recorded on foreign-originating declarations, the flat-runtime bridge
/// signature built from the assigned selector, and the structural signature
/// derived from the graph alone. Every signature is digested to the same
/// fixed width, so no consumer can tell which path produced an id.
pub struct SymbolMangler<'a, 'g> {
  graph: &'g DeclGraph,
  namer: &'a mut ExportNamer<'g>,
  cache: HashMap<DeclId, MangledId>,
}

impl<'a, 'g> SymbolMangler<'a, 'g> {
  pub fn new(namer: &'a mut ExportNamer<'g>) -> Self {
    Self {
      graph: namer.graph(),
      namer,
      cache: HashMap::default(),
    }
  }

  pub fn graph(&self) -> &'g DeclGraph {
    self.graph
  }

  /// The linkage id of a declaration. Memoized write-once: repeated calls
  /// return the first computed id.
  pub fn mangled_id(&mut self, d: DeclId) -> MangleResult<MangledId> {
    if let Some(&id) = self.cache.get(&d) {
      return Ok(id);
    }
    let signature = self.signature(d)?;
    let id = digest(&signature);
    self.cache.insert(d, id);
    Ok(id)
  }

  fn signature(&mut self, d: DeclId) -> MangleResult<String> {
    let graph = self.graph;
    let decl = graph.decl(d);
    if let Origin::Interop { uid } = &decl.origin {
      // Local and synthetic interop declarations never recorded an
      // identifier; their ids derive from structure like source code.
      if !self.is_local_or_synthetic(d) {
        return match uid {
          Some(uid) => Ok(format!("interop:{}", uid)),
          None => Err(MangleError::missing_identity(&decl.name)),
        };
      }
    }
    if decl.bridge.is_some() && decl.kind.is_callable() {
      return self.bridge_signature(d);
    }
    self.structural_signature(d)
  }

  /// Bridged members are dispatched by selector on the flat runtime, so
  /// structurally distinct declarations sharing one selector must share one
  /// id. Only the selector, the suffix separating the constructor and
  /// accessor selector families, and (for extension members, whose selectors
  /// live per receiver) the receiver's flat name may enter the signature.
  fn bridge_signature(&mut self, d: DeclId) -> MangleResult<String> {
    let graph = self.graph;
    let decl = graph.decl(d);
    let selector = self
      .namer
      .method_names(d)
      .map_err(|e| MangleError::naming(&decl.name, e))?
      .selector;

    let mut sig = String::from("bridge:");
    if decl.is_extension {
      if let Some(p) = decl.parent {
        let receiver = self
          .namer
          .type_names(p)
          .map_err(|e| MangleError::naming(&decl.name, e))?
          .flat;
        sig.push_str(&receiver);
        sig.push('|');
      }
    }
    sig.push_str(&selector);
    match decl.kind {
      DeclKind::Constructor => sig.push_str("#ctor"),
      DeclKind::Accessor => sig.push_str("#acc"),
      _ => {}
    }
    Ok(sig)
  }

  fn structural_signature(&self, d: DeclId) -> MangleResult<String> {
    let graph = self.graph;
    let decl = graph.decl(d);

    let mut sig = format!("decl:{}", graph.module_name(decl.module));
    for scope in self.scope_chain(d) {
      sig.push(':');
      sig.push_str(&self.scope_name(scope));
    }
    sig.push(':');
    sig.push_str(kind_tag(decl.kind));
    sig.push(':');
    sig.push_str(&self.scope_name(d));

    if decl.kind.is_callable() {
      sig.push('(');
      for (i, p) in decl.params.iter().enumerate() {
        if i > 0 {
          sig.push(',');
        }
        sig.push_str(graph.type_name(p.ty));
      }
      sig.push(')');
    }
    if decl.kind == DeclKind::Accessor {
      let (accessor, property) = decl
        .accessor
        .zip(decl.property)
        .ok_or_else(|| MangleError::unrecognized(&decl.name))?;
      sig.push_str(match accessor {
        AccessorKind::Getter => "#get:",
        AccessorKind::Setter => "#set:",
      });
      sig.push_str(graph.name(property));
    }
    Ok(sig)
  }

  /// Containing declarations, outermost first.
  fn scope_chain(&self, d: DeclId) -> Vec<DeclId> {
    let graph = self.graph;
    let mut chain = Vec::new();
    let mut cursor = graph.parent(d);
    while let Some(p) = cursor {
      chain.push(p);
      cursor = graph.parent(p);
    }
    chain.reverse();
    chain
  }

  /// A declaration's contribution to the scope chain. Synthesized file
  /// containers have no name of their own; the unit name stands in.
  fn scope_name(&self, d: DeclId) -> String {
    let graph = self.graph;
    let decl = graph.decl(d);
    if decl.kind == DeclKind::FileContainer {
      graph.unit_name(decl.unit).to_string()
    } else {
      decl.name.clone()
    }
  }

  fn is_local_or_synthetic(&self, d: DeclId) -> bool {
    let graph = self.graph;
    let decl = graph.decl(d);
    decl.is_fake_override
      || decl.is_synthetic
      || decl.kind == DeclKind::Accessor
      || (decl.kind == DeclKind::Constructor
        && decl
          .parent
          .map_or(false, |p| graph.kind(p) == DeclKind::Singleton))
  }
}

fn kind_tag(kind: DeclKind) -> &'static str {
  match kind {
    DeclKind::Class => "class",
    DeclKind::Interface => "interface",
    DeclKind::Singleton => "object",
    DeclKind::EnumEntry => "entry",
    DeclKind::FileContainer => "file",
    DeclKind::Method => "fun",
    DeclKind::Constructor => "ctor",
    DeclKind::Property => "prop",
    DeclKind::Accessor => "acc",
  }
}

/// Truncating the digest to 64 bits keeps ids pointer-sized; the digest is
/// keyless, so equal signatures map to equal ids in every process.
fn digest(signature: &str) -> MangledId {
  let hash = blake3::hash(signature.as_bytes());
  let mut bytes = [0u8; 8];
  bytes.copy_from_slice(&hash.as_bytes()[..8]);
  MangledId(u64::from_le_bytes(bytes))
}
