//! Case and word-boundary utilities shared by the candidate builders.

/// Prefixes the flat runtime treats as memory-management method families.
/// A produced selector or accessor name must never start one of these at a
/// word boundary.
pub const FAMILY_PREFIXES: [&str; 5] = ["alloc", "copy", "mutableCopy", "new", "init"];

pub fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

pub fn decapitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_lowercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Whether `name` starts with `prefix` at a word boundary: the character
/// after the prefix, if any, must not be lowercase. `copyrighted` is safe;
/// `copyToClipboard` and a bare `copy` are not.
fn starts_with_word(name: &str, prefix: &str) -> bool {
  match name.strip_prefix(prefix) {
    Some(rest) => !rest.chars().next().is_some_and(|c| c.is_lowercase()),
    None => false,
  }
}

pub fn starts_family_prefix(name: &str) -> bool {
  FAMILY_PREFIXES
    .iter()
    .any(|prefix| starts_with_word(name, prefix))
}

/// Re-prefixes a family-colliding base name with the neutral verb:
/// `newInstance` becomes `doNewInstance`.
pub fn avoid_family_prefix(name: &str, neutral_verb: &str) -> String {
  if starts_family_prefix(name) {
    format!("{}{}", neutral_verb, capitalize(name))
  } else {
    name.to_string()
  }
}

/// Module-derived short prefix for flat top-level names. The capitalized
/// module name (hyphens normalized to underscores) is abbreviated to its
/// uppercase-or-leading characters when that yields at least three; shorter
/// abbreviations fall back to the leading three characters, uppercased.
pub fn module_prefix(module_name: &str) -> String {
  let normalized = capitalize(&module_name.replace('-', "_"));
  let abbreviated: String = normalized
    .chars()
    .enumerate()
    .filter(|&(i, c)| i == 0 || c.is_uppercase())
    .map(|(_, c)| c)
    .collect();
  if abbreviated.chars().count() >= 3 {
    abbreviated
  } else {
    normalized.chars().take(3).collect::<String>().to_uppercase()
  }
}

/// Converts a `SCREAMING_CASE` enum entry name to a `camelCase` accessor
/// candidate: segments are lowercased and every segment after the first is
/// re-capitalized. Empty segments from repeated underscores are dropped.
pub fn screaming_to_camel(name: &str) -> String {
  let mut out = String::new();
  for segment in name.split('_').filter(|s| !s.is_empty()) {
    let lowered = segment.to_lowercase();
    if out.is_empty() {
      out.push_str(&lowered);
    } else {
      out.push_str(&capitalize(&lowered));
    }
  }
  out
}

/// The capitalized stem of a unit name: everything before the first `.`,
/// capitalized. `myFile.kt` yields `MyFile`.
pub fn unit_stem(unit_name: &str) -> String {
  let stem = unit_name.split('.').next().unwrap_or(unit_name);
  capitalize(stem)
}
