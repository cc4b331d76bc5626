use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use name_alloc::AllocError;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of naming failures.
///
/// Diagnostic codes (prefix `EN`) are assigned per variant and are stable;
/// wrapped allocation failures keep their `NA` codes:
/// - `EN0001`: [`NamerErrorType::UnrecognizedDeclarationShape`]
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NamerErrorType {
  /// The declaration's structural shape matches no known naming case.
  UnrecognizedDeclarationShape,
  /// The allocation table failed; the whole naming pass aborts.
  Alloc(AllocError),
}

/// A naming failure, fatal to the surrounding naming pass. Always names the
/// declaration it occurred on.
#[derive(Clone, PartialEq, Eq)]
pub struct NamerError {
  pub typ: NamerErrorType,
  pub decl: String,
}

impl NamerError {
  pub fn new(typ: NamerErrorType, decl: impl Into<String>) -> NamerError {
    NamerError {
      typ,
      decl: decl.into(),
    }
  }

  pub fn unrecognized(decl: impl Into<String>) -> NamerError {
    NamerError::new(NamerErrorType::UnrecognizedDeclarationShape, decl)
  }

  pub fn alloc(decl: impl Into<String>, err: AllocError) -> NamerError {
    NamerError::new(NamerErrorType::Alloc(err), decl)
  }

  /// Stable diagnostic code for this naming error.
  pub fn code(&self) -> &'static str {
    match &self.typ {
      NamerErrorType::UnrecognizedDeclarationShape => "EN0001",
      NamerErrorType::Alloc(err) => err.typ.code(),
    }
  }
}

impl Debug for NamerError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} [{}]", self, self.code())
  }
}

impl Display for NamerError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.typ {
      NamerErrorType::UnrecognizedDeclarationShape => {
        write!(f, "declaration `{}` has no recognized naming shape", self.decl)
      }
      NamerErrorType::Alloc(err) => write!(f, "while naming `{}`: {}", self.decl, err),
    }
  }
}

impl Error for NamerError {}

pub type NamerResult<T> = Result<T, NamerError>;
