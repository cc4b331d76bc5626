use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use export_namer::NamerError;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of mangling failures.
///
/// Diagnostic codes (prefix `SM`) are assigned per variant and are stable;
/// wrapped naming failures keep their `EN`/`NA` codes:
/// - `SM0001`: [`MangleErrorType::MissingInteropIdentity`]
/// - `SM0002`: [`MangleErrorType::UnrecognizedDeclarationShape`]
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum MangleErrorType {
  /// An interop-originating declaration carries no recorded stable
  /// identifier, yet is not local or synthetic. Its id cannot be
  /// reconstructed in a later session, so mangling aborts.
  MissingInteropIdentity,
  /// The declaration's structural shape matches no known mangling case.
  UnrecognizedDeclarationShape,
  /// Computing the exported name a bridge signature embeds failed.
  Naming(NamerError),
}

/// A mangling failure, fatal to the surrounding export pass. Always names the
/// declaration it occurred on.
#[derive(Clone, PartialEq, Eq)]
pub struct MangleError {
  pub typ: MangleErrorType,
  pub decl: String,
}

impl MangleError {
  pub fn new(typ: MangleErrorType, decl: impl Into<String>) -> MangleError {
    MangleError {
      typ,
      decl: decl.into(),
    }
  }

  pub fn missing_identity(decl: impl Into<String>) -> MangleError {
    MangleError::new(MangleErrorType::MissingInteropIdentity, decl)
  }

  pub fn unrecognized(decl: impl Into<String>) -> MangleError {
    MangleError::new(MangleErrorType::UnrecognizedDeclarationShape, decl)
  }

  pub fn naming(decl: impl Into<String>, err: NamerError) -> MangleError {
    MangleError::new(MangleErrorType::Naming(err), decl)
  }

  /// Stable diagnostic code for this mangling error.
  pub fn code(&self) -> &'static str {
    match &self.typ {
      MangleErrorType::MissingInteropIdentity => "SM0001",
      MangleErrorType::UnrecognizedDeclarationShape => "SM0002",
      MangleErrorType::Naming(err) => err.code(),
    }
  }
}

impl Debug for MangleError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} [{}]", self, self.code())
  }
}

impl Display for MangleError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.typ {
      MangleErrorType::MissingInteropIdentity => {
        write!(
          f,
          "interop declaration `{}` carries no stable identifier",
          self.decl
        )
      }
      MangleErrorType::UnrecognizedDeclarationShape => {
        write!(
          f,
          "declaration `{}` has no recognized mangling shape",
          self.decl
        )
      }
      MangleErrorType::Naming(err) => write!(f, "while mangling `{}`: {}", self.decl, err),
    }
  }
}

impl Error for MangleError {}

pub type MangleResult<T> = Result<T, MangleError>;
