//! Build mode selection and mode gating.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The build mode, selected once per invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
  #[default]
  Development,
  Production,
}

impl BuildMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      BuildMode::Development => "development",
      BuildMode::Production => "production",
    }
  }

  pub fn is_production(&self) -> bool {
    matches!(self, BuildMode::Production)
  }
}

impl fmt::Display for BuildMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for BuildMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "development" | "dev" => Ok(BuildMode::Development),
      "production" | "prod" => Ok(BuildMode::Production),
      other => Err(format!("unknown build mode '{}' (expected 'development' or 'production')", other)),
    }
  }
}

/// Predicate over [`BuildMode`] attached to a stage.
///
/// A stage whose gate rejects the current mode is dropped from its rule's
/// chain at resolve time, so the plan never carries conditional branches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeGate {
  /// Included in every mode.
  #[default]
  Any,
  /// Included only in the given mode.
  Only(BuildMode),
}

impl ModeGate {
  pub fn admits(&self, mode: BuildMode) -> bool {
    match self {
      ModeGate::Any => true,
      ModeGate::Only(only) => *only == mode,
    }
  }
}
