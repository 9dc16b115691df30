//! Typed option values for stages and plugins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A stage or plugin option value.
///
/// Descriptors carry small trees of named options (compiler targets, inline
/// size limits, template paths). Modeling them as an explicit value tree,
/// rather than an untyped mapping, lets malformed configuration be rejected
/// while the descriptor is constructed instead of deep inside a transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptValue {
  Bool(bool),
  Int(i64),
  Float(f64),
  Str(String),
  List(Vec<OptValue>),
  Map(BTreeMap<String, OptValue>),
}

impl From<bool> for OptValue {
  fn from(v: bool) -> Self {
    OptValue::Bool(v)
  }
}

impl From<i64> for OptValue {
  fn from(v: i64) -> Self {
    OptValue::Int(v)
  }
}

impl From<&str> for OptValue {
  fn from(v: &str) -> Self {
    OptValue::Str(v.to_string())
  }
}

impl From<String> for OptValue {
  fn from(v: String) -> Self {
    OptValue::Str(v)
  }
}
