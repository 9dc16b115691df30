//! Configuration file evaluation.
//!
//! This module provides `evaluate_config`, which takes a path to a Lua
//! configuration file and returns the typed `Descriptor` it describes.

use std::path::Path;

use mlua::prelude::*;
use tracing::info;

use pack_core::Descriptor;

use crate::convert::descriptor_from_lua;
use crate::error::EvalError;
use crate::runtime;

/// Evaluate a Lua configuration file and return the resulting descriptor.
///
/// The file must return a table; see the crate docs for the expected shape.
pub fn evaluate_config(path: &Path) -> Result<Descriptor, EvalError> {
  let lua = runtime::create_runtime()?;
  let value = runtime::load_file(&lua, path)?;
  let descriptor = descriptor_from_value(value)?;
  info!(
    config = %path.display(),
    rules = descriptor.rules.len(),
    plugins = descriptor.plugins.len(),
    "evaluated config"
  );
  Ok(descriptor)
}

/// Evaluate an in-memory Lua chunk as a config.
pub fn evaluate_chunk(source: &str) -> Result<Descriptor, EvalError> {
  let lua = runtime::create_runtime()?;
  let value = lua.load(source).set_name("@<chunk>").eval::<LuaValue>()?;
  descriptor_from_value(value)
}

fn descriptor_from_value(value: LuaValue) -> Result<Descriptor, EvalError> {
  match value {
    LuaValue::Table(table) => descriptor_from_lua(&table),
    other => Err(EvalError::Shape(format!(
      "config must return a table, got {}",
      other.type_name()
    ))),
  }
}
