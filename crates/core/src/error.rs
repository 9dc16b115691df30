//! Error types for plan resolution.

use thiserror::Error;

/// Errors raised while resolving a descriptor into an execution plan.
///
/// All variants are configuration mistakes: they are reported before any
/// transform or emit work begins and always abort the build. Resolution never
/// touches the filesystem, so there is no I/O failure surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
  #[error("resolve.extensions must not be empty")]
  EmptyExtensions,

  #[error("resolve.extensions contains duplicate entry '{0}'")]
  DuplicateExtension(String),

  #[error("resolve.extensions entry '{0}' must start with '.'")]
  MalformedExtension(String),

  #[error("rule '{rule}': pattern matches nothing (empty extension list)")]
  EmptyPattern { rule: String },

  #[error("rule '{rule}': pattern entry '{entry}' must start with '.'")]
  MalformedPattern { rule: String, entry: String },

  #[error("rules '{first}' and '{second}' both match '{witness}' without mutual exclusion")]
  ConflictingRules {
    first: String,
    second: String,
    witness: String,
  },

  #[error("optimization: duplicate cache group '{0}'")]
  DuplicateCacheGroup(String),

  #[error("output.filename must not be empty")]
  EmptyOutputFilename,
}
