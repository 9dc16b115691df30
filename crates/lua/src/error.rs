//! Error types for config evaluation.

use thiserror::Error;

/// Errors raised while evaluating a Lua config into a descriptor.
///
/// Shape errors cover a config that evaluated fine but does not describe a
/// well-formed descriptor. Semantic problems (overlapping rules, bad
/// extension lists) are not caught here; those surface later as
/// `pack_core::ConfigurationError` during resolution.
#[derive(Debug, Error)]
pub enum EvalError {
  #[error("lua error: {0}")]
  Lua(#[from] mlua::Error),

  #[error("config shape error: {0}")]
  Shape(String),
}
