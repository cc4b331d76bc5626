use serde::Serialize;

/// Classification of one parameter position of the foreign call signature.
///
/// `ErrorOut` and `ResultOut` positions are synthesized by the bridge and may
/// have no counterpart in the declared parameter list.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum BridgeParam {
  Mapped,
  ErrorOut,
  ResultOut,
}

impl BridgeParam {
  pub fn is_out(self) -> bool {
    matches!(self, BridgeParam::ErrorOut | BridgeParam::ResultOut)
  }
}

/// Classification of the foreign return value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum BridgeReturn {
  Mapped,
  Void,
  /// The foreign function returns a success flag; the real value travels
  /// through an out-parameter.
  OutFlag,
}

/// How a member's parameters and return value map onto the foreign calling
/// convention.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct BridgeShape {
  pub params: Vec<BridgeParam>,
  pub ret: BridgeReturn,
}

impl BridgeShape {
  pub fn new(params: Vec<BridgeParam>, ret: BridgeReturn) -> Self {
    Self { params, ret }
  }

  /// A shape where every declared parameter maps directly and the return
  /// value maps directly. Used for members the bridge does not rewrite.
  pub fn direct(param_count: usize) -> Self {
    Self {
      params: vec![BridgeParam::Mapped; param_count],
      ret: BridgeReturn::Mapped,
    }
  }

  /// Two shapes are compatible iff they would produce the identical foreign
  /// call signature.
  pub fn compatible(&self, other: &BridgeShape) -> bool {
    self == other
  }

  pub fn has_error_out(&self) -> bool {
    self.params.contains(&BridgeParam::ErrorOut)
  }
}
