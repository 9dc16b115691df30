//! Lua runtime setup and file loading.

use std::path::Path;

use mlua::prelude::*;

/// Create a new Lua runtime for config evaluation.
///
/// Registers the `pack` global table with version and platform fields so
/// configs can introspect their host. The build mode is intentionally
/// absent, see the crate docs.
pub fn create_runtime() -> LuaResult<Lua> {
  let lua = Lua::new();

  let pack = lua.create_table()?;
  pack.set("version", env!("CARGO_PKG_VERSION"))?;
  pack.set("os", std::env::consts::OS)?;
  pack.set("arch", std::env::consts::ARCH)?;
  lua.globals().set("pack", pack)?;

  Ok(lua)
}

/// Load and execute a Lua file at the given path.
/// Sets the `pack.dir` global to the directory of the loaded file.
/// Returns the result of the file execution.
pub fn load_file(lua: &Lua, path: &Path) -> LuaResult<LuaValue> {
  let canonical_path = path
    .canonicalize()
    .map_err(|e| LuaError::external(format!("cannot canonicalize '{}': {}", path.display(), e)))?;
  let content = std::fs::read_to_string(&canonical_path)
    .map_err(|e| LuaError::external(format!("cannot read '{}': {}", canonical_path.display(), e)))?;

  let pack_globals = lua.globals().get::<LuaTable>("pack")?;
  pack_globals.set(
    "dir",
    canonical_path
      .parent()
      .unwrap_or(Path::new(""))
      .to_string_lossy()
      .to_string(),
  )?;

  let result = lua
    .load(&content)
    .set_name(format!("@{}", canonical_path.display()))
    .eval::<LuaValue>()?;
  Ok(result)
}
