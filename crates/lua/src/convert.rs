//! Conversion from evaluated Lua tables into descriptor types.
//!
//! Conversion is strict: every field is pulled out with a context path so a
//! malformed config fails here with a message like
//! `rules[3].pattern: expected exactly one of 'extensions', 'suffix', 'segment'`
//! instead of failing deep inside a downstream transform.

use std::collections::BTreeMap;

use mlua::prelude::*;

use pack_core::{
  BuildMode, CacheGroup, Descriptor, Devtool, DevtoolConfig, FilePattern, ModeGate, OptValue, OutputConfig, PluginDecl,
  Rule, SplitChunks, Stage,
};

use crate::error::EvalError;

/// Convert the table a config file returned into a typed descriptor.
pub fn descriptor_from_lua(config: &LuaTable) -> Result<Descriptor, EvalError> {
  let entry: String = req_field(config, "entry", "config")?;
  let output = output_from_lua(config, entry)?;
  let resolve_extensions = extensions_from_lua(config)?;
  let rules = rules_from_lua(config)?;
  let plugins = plugins_from_lua(config)?;
  let devtool = devtool_from_lua(config)?;
  let split_chunks = split_chunks_from_lua(config)?;

  Ok(Descriptor {
    output,
    resolve_extensions,
    rules,
    plugins,
    devtool,
    split_chunks,
  })
}

fn output_from_lua(config: &LuaTable, entry: String) -> Result<OutputConfig, EvalError> {
  let table: Option<LuaTable> = opt_field(config, "output", "config")?;
  let (filename, dir, clean) = match table {
    Some(table) => (
      opt_field::<String>(&table, "filename", "output")?.unwrap_or_else(|| "bundle.[contenthash].js".to_string()),
      opt_field::<String>(&table, "dir", "output")?.unwrap_or_else(|| "dist".to_string()),
      opt_field::<bool>(&table, "clean", "output")?.unwrap_or(false),
    ),
    None => ("bundle.[contenthash].js".to_string(), "dist".to_string(), false),
  };

  Ok(OutputConfig {
    entry: entry.into(),
    filename,
    dir: dir.into(),
    clean,
  })
}

fn extensions_from_lua(config: &LuaTable) -> Result<Vec<String>, EvalError> {
  let resolve: Option<LuaTable> = opt_field(config, "resolve", "config")?;
  match resolve {
    Some(resolve) => Ok(opt_field::<Vec<String>>(&resolve, "extensions", "resolve")?.unwrap_or_default()),
    None => Ok(Vec::new()),
  }
}

fn rules_from_lua(config: &LuaTable) -> Result<Vec<Rule>, EvalError> {
  let Some(table) = opt_field::<LuaTable>(config, "rules", "config")? else {
    return Ok(Vec::new());
  };

  let mut rules = Vec::new();
  for (i, value) in table.sequence_values::<LuaValue>().enumerate() {
    let ctx = format!("rules[{}]", i + 1);
    let LuaValue::Table(rule) = value? else {
      return Err(shape(&ctx, "expected a table"));
    };
    rules.push(rule_from_lua(&rule, &ctx)?);
  }
  Ok(rules)
}

fn rule_from_lua(table: &LuaTable, ctx: &str) -> Result<Rule, EvalError> {
  let name = opt_field::<String>(table, "name", ctx)?.unwrap_or_else(|| ctx.to_string());

  let pattern_value: LuaTable =
    opt_field(table, "pattern", ctx)?.ok_or_else(|| shape(ctx, "missing required field 'pattern'"))?;
  let pattern = pattern_from_lua(&pattern_value, &format!("{}.pattern", ctx))?;

  let exclude = match opt_field::<LuaTable>(table, "exclude", ctx)? {
    Some(value) => Some(pattern_from_lua(&value, &format!("{}.exclude", ctx))?),
    None => None,
  };

  let stages_table: LuaTable =
    opt_field(table, "stages", ctx)?.ok_or_else(|| shape(ctx, "missing required field 'stages'"))?;
  let mut stages = Vec::new();
  for (i, value) in stages_table.sequence_values::<LuaValue>().enumerate() {
    stages.push(stage_from_lua(value?, &format!("{}.stages[{}]", ctx, i + 1))?);
  }

  let mut rule = Rule::new(name, pattern, stages);
  rule.exclude = exclude;
  Ok(rule)
}

fn pattern_from_lua(table: &LuaTable, ctx: &str) -> Result<FilePattern, EvalError> {
  let extensions: Option<Vec<String>> = opt_field(table, "extensions", ctx)?;
  let suffix: Option<String> = opt_field(table, "suffix", ctx)?;
  let segment: Option<String> = opt_field(table, "segment", ctx)?;

  match (extensions, suffix, segment) {
    (Some(extensions), None, None) => Ok(FilePattern::Extensions(extensions)),
    (None, Some(suffix), None) => Ok(FilePattern::Suffix(suffix)),
    (None, None, Some(segment)) => Ok(FilePattern::Segment(segment)),
    _ => Err(shape(ctx, "expected exactly one of 'extensions', 'suffix', 'segment'")),
  }
}

/// A stage is either a bare name (`"style"`) or a table with `name`,
/// optional `options`, and an optional `mode` gate.
fn stage_from_lua(value: LuaValue, ctx: &str) -> Result<Stage, EvalError> {
  match value {
    LuaValue::String(name) => Ok(Stage::new(name.to_str()?.to_string())),
    LuaValue::Table(table) => {
      let name: String = req_field(&table, "name", ctx)?;
      let mut stage = Stage::new(name);

      if let Some(options) = opt_field::<LuaTable>(&table, "options", ctx)? {
        stage.options = options_from_lua(&options, &format!("{}.options", ctx))?;
      }
      if let Some(mode) = opt_field::<String>(&table, "mode", ctx)? {
        stage.gate = ModeGate::Only(parse_mode(&mode, ctx)?);
      }
      Ok(stage)
    }
    other => Err(shape(ctx, &format!("expected stage name or table, got {}", other.type_name()))),
  }
}

fn plugins_from_lua(config: &LuaTable) -> Result<Vec<PluginDecl>, EvalError> {
  let Some(table) = opt_field::<LuaTable>(config, "plugins", "config")? else {
    return Ok(Vec::new());
  };

  let mut plugins = Vec::new();
  for (i, value) in table.sequence_values::<LuaValue>().enumerate() {
    let ctx = format!("plugins[{}]", i + 1);
    let LuaValue::Table(plugin) = value? else {
      return Err(shape(&ctx, "expected a table"));
    };
    let name: String = req_field(&plugin, "name", &ctx)?;
    let mut decl = PluginDecl::new(name);
    if let Some(options) = opt_field::<LuaTable>(&plugin, "options", &ctx)? {
      decl.options = options_from_lua(&options, &format!("{}.options", ctx))?;
    }
    plugins.push(decl);
  }
  Ok(plugins)
}

fn devtool_from_lua(config: &LuaTable) -> Result<DevtoolConfig, EvalError> {
  let Some(table) = opt_field::<LuaTable>(config, "devtool", "config")? else {
    return Ok(DevtoolConfig::default());
  };

  let defaults = DevtoolConfig::default();
  let development = match opt_field::<String>(&table, "development", "devtool")? {
    Some(value) => parse_devtool(&value, "devtool.development")?,
    None => defaults.development,
  };
  let production = match opt_field::<String>(&table, "production", "devtool")? {
    Some(value) => parse_devtool(&value, "devtool.production")?,
    None => defaults.production,
  };
  Ok(DevtoolConfig { development, production })
}

fn split_chunks_from_lua(config: &LuaTable) -> Result<SplitChunks, EvalError> {
  let Some(optimization) = opt_field::<LuaTable>(config, "optimization", "config")? else {
    return Ok(SplitChunks::default());
  };
  let Some(table) = opt_field::<LuaTable>(&optimization, "split_chunks", "optimization")? else {
    return Ok(SplitChunks::default());
  };

  let defaults = SplitChunks::default();
  let chunks = opt_field::<String>(&table, "chunks", "split_chunks")?.unwrap_or(defaults.chunks);
  let min_chunks = opt_field::<u32>(&table, "min_chunks", "split_chunks")?.unwrap_or(defaults.min_chunks);

  let mut groups = Vec::new();
  if let Some(groups_table) = opt_field::<LuaTable>(&table, "groups", "split_chunks")? {
    for (i, value) in groups_table.sequence_values::<LuaValue>().enumerate() {
      let ctx = format!("split_chunks.groups[{}]", i + 1);
      let LuaValue::Table(group) = value? else {
        return Err(shape(&ctx, "expected a table"));
      };
      groups.push(cache_group_from_lua(&group, &ctx)?);
    }
  }

  Ok(SplitChunks {
    chunks,
    min_chunks,
    groups,
  })
}

fn cache_group_from_lua(table: &LuaTable, ctx: &str) -> Result<CacheGroup, EvalError> {
  let name: String = req_field(table, "name", ctx)?;
  let test = match opt_field::<LuaTable>(table, "test", ctx)? {
    Some(value) => Some(pattern_from_lua(&value, &format!("{}.test", ctx))?),
    None => None,
  };
  let priority = opt_field::<i64>(table, "priority", ctx)?.unwrap_or(0);
  let reuse_existing = opt_field::<bool>(table, "reuse_existing", ctx)?.unwrap_or(false);

  Ok(CacheGroup {
    name,
    test,
    priority,
    reuse_existing,
  })
}

fn options_from_lua(table: &LuaTable, ctx: &str) -> Result<BTreeMap<String, OptValue>, EvalError> {
  let mut options = BTreeMap::new();
  for pair in table.pairs::<String, LuaValue>() {
    let (key, value) = pair.map_err(|e| shape(ctx, &e.to_string()))?;
    let converted = opt_value_from_lua(&value, &format!("{}.{}", ctx, key))?;
    options.insert(key, converted);
  }
  Ok(options)
}

fn opt_value_from_lua(value: &LuaValue, ctx: &str) -> Result<OptValue, EvalError> {
  match value {
    LuaValue::Boolean(b) => Ok(OptValue::Bool(*b)),
    LuaValue::Integer(i) => Ok(OptValue::Int(*i)),
    LuaValue::Number(n) => Ok(OptValue::Float(*n)),
    LuaValue::String(s) => Ok(OptValue::Str(s.to_str()?.to_string())),
    LuaValue::Table(table) => {
      if table.raw_len() > 0 {
        let mut list = Vec::new();
        for (i, item) in table.sequence_values::<LuaValue>().enumerate() {
          let item = item.map_err(|e| shape(ctx, &e.to_string()))?;
          list.push(opt_value_from_lua(&item, &format!("{}[{}]", ctx, i + 1))?);
        }
        Ok(OptValue::List(list))
      } else {
        let mut map = BTreeMap::new();
        for pair in table.pairs::<String, LuaValue>() {
          let (key, item) = pair.map_err(|e| shape(ctx, &e.to_string()))?;
          let converted = opt_value_from_lua(&item, &format!("{}.{}", ctx, key))?;
          map.insert(key, converted);
        }
        Ok(OptValue::Map(map))
      }
    }
    other => Err(shape(ctx, &format!("unsupported option type '{}'", other.type_name()))),
  }
}

fn parse_mode(value: &str, ctx: &str) -> Result<BuildMode, EvalError> {
  value.parse::<BuildMode>().map_err(|e| shape(ctx, &e))
}

fn parse_devtool(value: &str, ctx: &str) -> Result<Devtool, EvalError> {
  match value {
    "none" => Ok(Devtool::None),
    "inline-source-map" => Ok(Devtool::InlineSourceMap),
    "source-map" => Ok(Devtool::SourceMap),
    other => Err(shape(ctx, &format!("unknown devtool '{}'", other))),
  }
}

fn shape(ctx: &str, msg: &str) -> EvalError {
  EvalError::Shape(format!("{}: {}", ctx, msg))
}

fn opt_field<T: FromLua>(table: &LuaTable, key: &str, ctx: &str) -> Result<Option<T>, EvalError> {
  table
    .get::<Option<T>>(key)
    .map_err(|e| shape(&format!("{}.{}", ctx, key), &e.to_string()))
}

fn req_field<T: FromLua>(table: &LuaTable, key: &str, ctx: &str) -> Result<T, EvalError> {
  opt_field::<T>(table, key, ctx)?.ok_or_else(|| shape(ctx, &format!("missing required field '{}'", key)))
}
