//! The declarative build descriptor.
//!
//! A descriptor is the typed form of an evaluated `pack.lua` configuration:
//! entry and output settings, module resolution extensions, the rule set,
//! emit-time plugins, devtool selection, and the chunk-splitting template.
//! It is plain data; all semantic checks happen in [`crate::resolve`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::mode::BuildMode;
use crate::options::OptValue;
use crate::pattern::FilePattern;
use crate::rule::Rule;

/// Placeholder token in output filename templates.
///
/// The resolver treats it as opaque: the emitter substitutes the real content
/// hash per file, the plan only guarantees the token survives verbatim.
pub const CONTENT_HASH_PLACEHOLDER: &str = "[contenthash]";

/// Entry point and output location for the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
  /// The module graph root, e.g. `src/index.tsx`.
  pub entry: PathBuf,
  /// Output filename template, may contain `[contenthash]`.
  pub filename: String,
  /// Directory all output files are written under.
  pub dir: PathBuf,
  /// Whether the emitter clears the output directory before writing.
  #[serde(default)]
  pub clean: bool,
}

/// Source-map flavor handed to the downstream engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Devtool {
  #[default]
  None,
  InlineSourceMap,
  SourceMap,
}

impl Devtool {
  pub fn as_str(&self) -> &'static str {
    match self {
      Devtool::None => "none",
      Devtool::InlineSourceMap => "inline-source-map",
      Devtool::SourceMap => "source-map",
    }
  }
}

/// Per-mode devtool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevtoolConfig {
  pub development: Devtool,
  pub production: Devtool,
}

impl Default for DevtoolConfig {
  fn default() -> Self {
    // Inline maps for debugging, nothing in production builds.
    DevtoolConfig {
      development: Devtool::InlineSourceMap,
      production: Devtool::None,
    }
  }
}

impl DevtoolConfig {
  pub fn for_mode(&self, mode: BuildMode) -> Devtool {
    match mode {
      BuildMode::Development => self.development,
      BuildMode::Production => self.production,
    }
  }
}

/// One chunk cache group in the split-chunks template.
///
/// More negative priority means lower priority; ties break toward the group
/// declared first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheGroup {
  pub name: String,
  /// Restricts the group to modules matching the pattern, if set.
  #[serde(default)]
  pub test: Option<FilePattern>,
  pub priority: i64,
  #[serde(default)]
  pub reuse_existing: bool,
}

/// Chunk-splitting template, always enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitChunks {
  /// Which chunks participate ("all", "async", "initial").
  pub chunks: String,
  /// Minimum number of chunks a module must appear in before it splits.
  pub min_chunks: u32,
  pub groups: Vec<CacheGroup>,
}

impl Default for SplitChunks {
  fn default() -> Self {
    SplitChunks {
      chunks: "all".to_string(),
      min_chunks: 1,
      groups: Vec::new(),
    }
  }
}

/// An emit-time plugin with its configuration.
///
/// Declaration order is execution order, which downstream consumers rely on
/// (a static-asset copy must be visible to a later HTML injection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDecl {
  pub name: String,
  #[serde(default)]
  pub options: BTreeMap<String, OptValue>,
}

impl PluginDecl {
  pub fn new(name: impl Into<String>) -> Self {
    PluginDecl {
      name: name.into(),
      options: BTreeMap::new(),
    }
  }

  pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptValue>) -> Self {
    self.options.insert(key.into(), value.into());
    self
  }
}

/// The complete declarative input to [`crate::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
  pub output: OutputConfig,
  /// Import resolution extensions, first match wins on extension-less imports.
  pub resolve_extensions: Vec<String>,
  pub rules: Vec<Rule>,
  pub plugins: Vec<PluginDecl>,
  #[serde(default)]
  pub devtool: DevtoolConfig,
  #[serde(default)]
  pub split_chunks: SplitChunks,
}
