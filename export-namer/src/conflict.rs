//! The conflict oracle: decides whether two declarations' exported names must
//! differ because a future common subtype could expose both.

use decl_graph::{BridgeShape, DeclGraph, DeclId, DeclKind, Modality};

/// Whether two class-like declarations can converge: a future common
/// descendant could expose members of both. True when one is a supertype of
/// the other, or when neither is final and at least one is interface-like.
/// Unrelated final declarations never converge.
pub fn can_converge(graph: &DeclGraph, a: DeclId, b: DeclId) -> bool {
  if graph.is_subtype_of(a, b) || graph.is_subtype_of(b, a) {
    return true;
  }
  let a_final = graph.decl(a).modality == Modality::Final;
  let b_final = graph.decl(b).modality == Modality::Final;
  if a_final || b_final {
    return false;
  }
  graph.kind(a) == DeclKind::Interface || graph.kind(b) == DeclKind::Interface
}

fn is_top_level(graph: &DeclGraph, d: DeclId) -> bool {
  match graph.parent(d) {
    None => true,
    Some(p) => graph.kind(p) == DeclKind::FileContainer,
  }
}

/// The effective bridge shape of a member: the classifier's result, or the
/// direct mapping of its declared parameters when the bridge does not rewrite
/// it.
fn effective_shape(graph: &DeclGraph, d: DeclId) -> BridgeShape {
  match graph.bridge_shape(d) {
    Some(shape) => shape.clone(),
    None => BridgeShape::direct(graph.decl(d).params.len()),
  }
}

fn shapes_match(graph: &DeclGraph, a: DeclId, b: DeclId) -> bool {
  let (da, db) = (graph.decl(a), graph.decl(b));
  match (da.kind, db.kind) {
    (DeclKind::Property, DeclKind::Property) => true,
    (ka, kb) if ka.is_callable() && kb.is_callable() => {
      da.params.len() == db.params.len()
        && da
          .params
          .iter()
          .zip(db.params.iter())
          .all(|(pa, pb)| pa.label == pb.label)
    }
    _ => false,
  }
}

/// Whether two members must keep distinct exported names.
///
/// Top-level members of distinct source units never conflict; within one unit
/// they always do. Otherwise a conflict requires converging enclosing types,
/// both members instance-level, matching arity and label positions, and
/// incompatible bridge shapes. Members whose bridge shapes match exactly are
/// required to share a name (override convergence), so they do not conflict.
pub fn members_conflict(graph: &DeclGraph, a: DeclId, b: DeclId) -> bool {
  if a == b {
    return false;
  }

  if is_top_level(graph, a) && is_top_level(graph, b) {
    return graph.unit_of(a) == graph.unit_of(b);
  }

  let (da, db) = (graph.decl(a), graph.decl(b));
  if da.is_extension || db.is_extension || !da.is_instance_member || !db.is_instance_member {
    return false;
  }

  let (Some(pa), Some(pb)) = (da.parent, db.parent) else {
    return false;
  };
  if !can_converge(graph, pa, pb) {
    return false;
  }

  if !shapes_match(graph, a, b) {
    return false;
  }

  !effective_shape(graph, a).compatible(&effective_shape(graph, b))
}
