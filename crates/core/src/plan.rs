//! The resolved execution plan.

use std::path::Path;

use serde::Serialize;

use crate::descriptor::{CacheGroup, Descriptor, Devtool, OutputConfig, PluginDecl};
use crate::mode::BuildMode;
use crate::pattern::FilePattern;
use crate::rule::Stage;

/// A rule after mode filtering: its stage chain holds only the stages
/// admitted for the plan's mode, in declared order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRule {
  pub name: String,
  pub pattern: FilePattern,
  pub exclude: Option<FilePattern>,
  pub stages: Vec<Stage>,
}

impl ResolvedRule {
  /// Whether this rule owns the given file.
  pub fn applies_to(&self, path: &Path) -> bool {
    if !self.pattern.matches(path) {
      return false;
    }
    match &self.exclude {
      Some(exclude) => !exclude.matches(path),
      None => true,
    }
  }
}

/// Optimization settings handed to the optimizer collaborator.
///
/// Groups are ordered by descending priority; equal priorities keep
/// declaration order, so the ordering is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationPolicy {
  pub minimize: bool,
  pub chunks: String,
  pub min_chunks: u32,
  pub groups: Vec<CacheGroup>,
}

/// The validated, immutable output of [`crate::resolve`].
///
/// Constructed once per build invocation and never mutated afterwards; the
/// external engine executes against it and discards it when the build ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionPlan {
  pub mode: BuildMode,
  pub output: OutputConfig,
  pub resolve_extensions: Vec<String>,
  pub rules: Vec<ResolvedRule>,
  pub plugins: Vec<PluginDecl>,
  pub optimization: OptimizationPolicy,
  pub devtool: Devtool,
  /// The descriptor this plan was resolved from, unchanged.
  pub source: Descriptor,
}

impl ExecutionPlan {
  /// The first declared rule that owns the given file, if any.
  pub fn matching_rule(&self, path: &Path) -> Option<&ResolvedRule> {
    self.rules.iter().find(|rule| rule.applies_to(path))
  }

  /// The ordered stage chain for a discovered file.
  ///
  /// Files no rule claims get an empty chain, which downstream engines treat
  /// as a pass-through copy.
  pub fn chain_for(&self, path: &Path) -> &[Stage] {
    self.matching_rule(path).map(|rule| rule.stages.as_slice()).unwrap_or(&[])
  }

  /// Whether the file would be copied through untransformed.
  pub fn is_passthrough(&self, path: &Path) -> bool {
    self.chain_for(path).is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::rule::Stage;

  fn style_rules() -> Vec<ResolvedRule> {
    vec![
      ResolvedRule {
        name: "less".to_string(),
        pattern: FilePattern::Extensions(vec![".less".to_string()]),
        exclude: Some(FilePattern::Suffix(".module.less".to_string())),
        stages: vec![Stage::new("style"), Stage::new("css")],
      },
      ResolvedRule {
        name: "less-modules".to_string(),
        pattern: FilePattern::Suffix(".module.less".to_string()),
        exclude: None,
        stages: vec![Stage::new("style"), Stage::new("css").with_option("modules", true)],
      },
    ]
  }

  #[test]
  fn mutual_excludes_route_module_files_to_module_rule() {
    let rules = style_rules();
    assert!(rules[0].applies_to(Path::new("src/app.less")));
    assert!(!rules[0].applies_to(Path::new("src/app.module.less")));
    assert!(rules[1].applies_to(Path::new("src/app.module.less")));
  }

  #[test]
  fn unmatched_file_gets_empty_chain() {
    let plan = ExecutionPlan {
      mode: BuildMode::Development,
      output: OutputConfig {
        entry: "src/index.ts".into(),
        filename: "bundle.js".to_string(),
        dir: "dist".into(),
        clean: false,
      },
      resolve_extensions: vec![".ts".to_string()],
      rules: style_rules(),
      plugins: vec![],
      optimization: OptimizationPolicy {
        minimize: false,
        chunks: "all".to_string(),
        min_chunks: 1,
        groups: vec![],
      },
      devtool: Devtool::InlineSourceMap,
      source: crate::resolve::tests::minimal_descriptor(),
    };

    assert!(plan.chain_for(Path::new("src/logo.bmp")).is_empty());
    assert!(plan.is_passthrough(Path::new("src/logo.bmp")));
    assert_eq!(plan.chain_for(Path::new("src/app.less")).len(), 2);
  }
}
