use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of allocation failures.
///
/// Diagnostic codes (prefix `NA`) are assigned per variant and are stable:
/// - `NA0001`: [`AllocErrorType::ExhaustedCandidates`]
/// - `NA0002`: [`AllocErrorType::DoubleAssignment`]
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum AllocErrorType {
  /// The candidate sequence ran out or exceeded the safety cap without
  /// producing an acceptable name. The sequence generator contract (infinite,
  /// strictly distinguishing) was violated.
  ExhaustedCandidates,
  /// A forced assignment targeted an element that already has a name, or a
  /// name that is already bound to a different element.
  DoubleAssignment,
}

impl AllocErrorType {
  /// Stable diagnostic code for this allocation error variant.
  pub fn code(&self) -> &'static str {
    match self {
      AllocErrorType::ExhaustedCandidates => "NA0001",
      AllocErrorType::DoubleAssignment => "NA0002",
    }
  }

  pub fn message(&self, name: &str) -> String {
    match self {
      AllocErrorType::ExhaustedCandidates => {
        format!("candidate sequence exhausted while naming `{}`", name)
      }
      AllocErrorType::DoubleAssignment => {
        format!("`{}` is already assigned and cannot be rebound", name)
      }
    }
  }
}

/// An allocation failure. All variants are fatal: the naming pass aborts
/// rather than producing a partial or overwritten name.
#[derive(Clone, PartialEq, Eq)]
pub struct AllocError {
  pub typ: AllocErrorType,
  /// The name or base candidate involved in the failure.
  pub name: String,
}

impl AllocError {
  pub fn new(typ: AllocErrorType, name: impl Into<String>) -> AllocError {
    AllocError {
      typ,
      name: name.into(),
    }
  }
}

impl Debug for AllocError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} [{}]", self, self.typ.code())
  }
}

impl Display for AllocError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(&self.typ.message(&self.name))
  }
}

impl Error for AllocError {}

pub type AllocResult<T> = Result<T, AllocError>;
