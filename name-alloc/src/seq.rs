use serde::Serialize;

/// Which mangling scheme applies to a base candidate.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum MangleKind {
  /// Plain names (types, properties, accessors): underscores are appended.
  Simple,
  /// Flat-target selectors: underscores go before the final `:` when the
  /// selector is parameterized, and are appended otherwise.
  Selector,
  /// Nested-target call signatures: underscores go before the closing `)`.
  NestedSignature,
}

/// Deterministic infinite sequence of name variants for one base candidate.
///
/// Step 0 yields the base itself; step `n` yields the base with `n`
/// underscores inserted at the kind-specific position. Every step yields a
/// string not previously produced for that base, which is the contract the
/// allocation table's termination argument rests on.
pub fn mangle_seq(base: impl Into<String>, kind: MangleKind) -> MangleSeq {
  MangleSeq {
    base: base.into(),
    kind,
    step: 0,
  }
}

pub struct MangleSeq {
  base: String,
  kind: MangleKind,
  step: usize,
}

impl Iterator for MangleSeq {
  type Item = String;

  fn next(&mut self) -> Option<String> {
    let step = self.step;
    self.step += 1;
    if step == 0 {
      return Some(self.base.clone());
    }
    let underscores = "_".repeat(step);
    let name = match self.kind {
      MangleKind::Simple => format!("{}{}", self.base, underscores),
      MangleKind::Selector => match self.base.rfind(':') {
        Some(i) => format!("{}{}{}", &self.base[..i], underscores, &self.base[i..]),
        None => format!("{}{}", self.base, underscores),
      },
      MangleKind::NestedSignature => match self.base.rfind(')') {
        Some(i) => format!("{}{}{}", &self.base[..i], underscores, &self.base[i..]),
        None => format!("{}{}", self.base, underscores),
      },
    };
    Some(name)
  }
}
