use crate::error::{AllocError, AllocErrorType, AllocResult};
use ahash::{HashMap, HashSet};
use parking_lot::Mutex;
use serde::Serialize;
use std::hash::Hash;
use std::sync::Arc;

/// Safety cap on rejected candidates per allocation. The candidate sequences
/// are infinite by contract, so hitting this means the generator stopped
/// distinguishing or the conflict predicate rejects everything; surfacing a
/// fatal diagnostic beats looping forever.
pub const MAX_MANGLE_STEPS: usize = 10_000;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum TableMode {
  /// Bindings are not persisted; repeated calls for the same element may
  /// legally differ. Used while cross-program uniqueness is not yet required.
  Local,
  /// Every binding persists for the session and is visible to later calls.
  Global,
}

/// Bidirectional element-to-name store with reservation and conflict rules.
///
/// Invariants: in global mode two conflicting elements never share a name;
/// reserved names are never dynamically assigned; a bound element's name
/// never changes; forced assignments can never be evicted or reassigned.
pub struct NameTable<E> {
  mode: TableMode,
  by_elem: HashMap<E, String>,
  by_name: HashMap<String, Vec<E>>,
  reserved: HashSet<String>,
}

impl<E: Copy + Eq + Hash> NameTable<E> {
  pub fn new(mode: TableMode) -> Self {
    Self {
      mode,
      by_elem: HashMap::default(),
      by_name: HashMap::default(),
      reserved: HashSet::default(),
    }
  }

  pub fn mode(&self) -> TableMode {
    self.mode
  }

  pub fn reserve(&mut self, name: impl Into<String>) {
    self.reserved.insert(name.into());
  }

  pub fn reserve_all<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
    for name in names {
      self.reserved.insert(name.to_string());
    }
  }

  pub fn is_reserved(&self, name: &str) -> bool {
    self.reserved.contains(name)
  }

  pub fn name_of(&self, elem: E) -> Option<&str> {
    self.by_elem.get(&elem).map(|n| n.as_str())
  }

  pub fn holders_of(&self, name: &str) -> &[E] {
    self.by_name.get(name).map(|v| v.as_slice()).unwrap_or(&[])
  }

  /// Binds `name` to `elem` ahead of any dynamic allocation. Fails fatally if
  /// the element is already bound or the name is held by a different element.
  /// Forced names bypass the reserved set: reservation exists to keep dynamic
  /// candidates away from exactly these names.
  pub fn force_assign(&mut self, elem: E, name: impl Into<String>) -> AllocResult<()> {
    let name = name.into();
    if self.by_elem.contains_key(&elem) {
      return Err(AllocError::new(AllocErrorType::DoubleAssignment, name));
    }
    if let Some(holders) = self.by_name.get(&name) {
      if holders.iter().any(|&h| h != elem) {
        return Err(AllocError::new(AllocErrorType::DoubleAssignment, name));
      }
    }
    self.bind(elem, name);
    Ok(())
  }

  /// Returns the element's bound name, or scans `candidates` in order for the
  /// first name that is neither reserved nor held by a conflicting element,
  /// binding it in global mode.
  pub fn get_or_assign(
    &mut self,
    elem: E,
    candidates: impl IntoIterator<Item = String>,
    conflicts: impl Fn(E, E) -> bool,
  ) -> AllocResult<String> {
    if let Some(name) = self.by_elem.get(&elem) {
      return Ok(name.clone());
    }

    let mut last_candidate = String::new();
    let mut steps = 0usize;
    for candidate in candidates {
      steps += 1;
      if steps > MAX_MANGLE_STEPS {
        return Err(AllocError::new(
          AllocErrorType::ExhaustedCandidates,
          candidate,
        ));
      }
      if self.is_reserved(&candidate) {
        last_candidate = candidate;
        continue;
      }
      if let Some(holders) = self.by_name.get(&candidate) {
        if holders.iter().any(|&h| conflicts(elem, h)) {
          last_candidate = candidate;
          continue;
        }
      }
      if self.mode == TableMode::Global {
        self.bind(elem, candidate.clone());
      }
      return Ok(candidate);
    }

    Err(AllocError::new(
      AllocErrorType::ExhaustedCandidates,
      last_candidate,
    ))
  }

  fn bind(&mut self, elem: E, name: String) {
    self.by_elem.insert(elem, name.clone());
    self.by_name.entry(name).or_default().push(elem);
  }
}

/// A cloneable handle to a global-mode table shared across parallel workers.
/// Each operation takes the single exclusive section the bidirectional
/// invariant requires.
pub struct SharedNameTable<E> {
  inner: Arc<Mutex<NameTable<E>>>,
}

impl<E> Clone for SharedNameTable<E> {
  fn clone(&self) -> Self {
    Self {
      inner: Arc::clone(&self.inner),
    }
  }
}

impl<E: Copy + Eq + Hash> SharedNameTable<E> {
  pub fn new(mode: TableMode) -> Self {
    Self {
      inner: Arc::new(Mutex::new(NameTable::new(mode))),
    }
  }

  pub fn reserve(&self, name: impl Into<String>) {
    self.inner.lock().reserve(name);
  }

  pub fn is_reserved(&self, name: &str) -> bool {
    self.inner.lock().is_reserved(name)
  }

  pub fn name_of(&self, elem: E) -> Option<String> {
    self.inner.lock().name_of(elem).map(|n| n.to_string())
  }

  pub fn force_assign(&self, elem: E, name: impl Into<String>) -> AllocResult<()> {
    self.inner.lock().force_assign(elem, name)
  }

  pub fn get_or_assign(
    &self,
    elem: E,
    candidates: impl IntoIterator<Item = String>,
    conflicts: impl Fn(E, E) -> bool,
  ) -> AllocResult<String> {
    self.inner.lock().get_or_assign(elem, candidates, conflicts)
  }
}
