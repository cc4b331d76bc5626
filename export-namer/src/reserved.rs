//! Names of the flat runtime that exported declarations must never shadow.

use ahash::HashSet;
use once_cell::sync::Lazy;

/// Instance-level runtime method names: memory management, comparison, and
/// class metadata. Excluded from selectors and property names. The root-type
/// members that legitimately own `hash` and `description` receive them
/// through forced assignment, which bypasses this set.
pub static RESERVED_INSTANCE_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  [
    "retain",
    "release",
    "autorelease",
    "retainCount",
    "dealloc",
    "zone",
    "isEqual",
    "hash",
    "self",
    "class",
    "superclass",
    "isProxy",
    "description",
    "debugDescription",
  ]
  .into_iter()
  .collect()
});

/// Additional class-level names: archiving and description hooks plus the
/// allocation entry points. Together with [`RESERVED_INSTANCE_NAMES`] these
/// are excluded from class-level accessor names.
pub static RESERVED_CLASS_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  [
    "load",
    "initialize",
    "new",
    "alloc",
    "allocWithZone",
    "version",
    "classFallbacksForKeyedArchiver",
    "classForKeyedUnarchiver",
    "accessInstanceVariablesDirectly",
    "useStoredAccessor",
  ]
  .into_iter()
  .collect()
});

pub fn instance_reserved() -> impl Iterator<Item = &'static str> {
  RESERVED_INSTANCE_NAMES.iter().copied()
}

pub fn class_level_reserved() -> impl Iterator<Item = &'static str> {
  RESERVED_INSTANCE_NAMES
    .iter()
    .chain(RESERVED_CLASS_NAMES.iter())
    .copied()
}
