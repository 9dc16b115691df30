//! Descriptor resolution.
//!
//! `resolve` is a pure function from (descriptor, mode) to an execution plan.
//! It validates the descriptor, filters stage chains by mode, proves the rule
//! set free of unordered overlaps, and computes the optimization policy. It
//! performs no I/O and never mutates its input.

use std::collections::BTreeSet;

use tracing::debug;

use crate::descriptor::{CacheGroup, Descriptor, SplitChunks};
use crate::error::ConfigurationError;
use crate::mode::BuildMode;
use crate::pattern::witness_alphabet;
use crate::plan::{ExecutionPlan, OptimizationPolicy, ResolvedRule};
use crate::rule::Rule;

/// Resolve a descriptor for the given mode into an immutable execution plan.
///
/// Fails with [`ConfigurationError`] before any transform or emit work can
/// begin; a descriptor that resolves once resolves identically every time.
pub fn resolve(descriptor: &Descriptor, mode: BuildMode) -> Result<ExecutionPlan, ConfigurationError> {
  validate_extensions(&descriptor.resolve_extensions)?;

  if descriptor.output.filename.is_empty() {
    return Err(ConfigurationError::EmptyOutputFilename);
  }

  for rule in &descriptor.rules {
    rule.validate()?;
  }
  validate_groups(&descriptor.split_chunks)?;

  let rules = filter_rules(&descriptor.rules, mode);
  detect_conflicts(&rules)?;

  let optimization = OptimizationPolicy {
    minimize: mode.is_production(),
    chunks: descriptor.split_chunks.chunks.clone(),
    min_chunks: descriptor.split_chunks.min_chunks,
    groups: order_groups(&descriptor.split_chunks.groups),
  };

  debug!(
    mode = %mode,
    rules = rules.len(),
    plugins = descriptor.plugins.len(),
    minimize = optimization.minimize,
    "resolved execution plan"
  );

  Ok(ExecutionPlan {
    mode,
    output: descriptor.output.clone(),
    resolve_extensions: descriptor.resolve_extensions.clone(),
    rules,
    plugins: descriptor.plugins.clone(),
    optimization,
    devtool: descriptor.devtool.for_mode(mode),
    source: descriptor.clone(),
  })
}

/// Extensions must be non-empty, unique, and each start with '.'.
/// Their order is the import resolution priority, first match wins.
fn validate_extensions(extensions: &[String]) -> Result<(), ConfigurationError> {
  if extensions.is_empty() {
    return Err(ConfigurationError::EmptyExtensions);
  }
  let mut seen = BTreeSet::new();
  for ext in extensions {
    if !ext.starts_with('.') {
      return Err(ConfigurationError::MalformedExtension(ext.clone()));
    }
    if !seen.insert(ext.as_str()) {
      return Err(ConfigurationError::DuplicateExtension(ext.clone()));
    }
  }
  Ok(())
}

fn validate_groups(split_chunks: &SplitChunks) -> Result<(), ConfigurationError> {
  let mut seen = BTreeSet::new();
  for group in &split_chunks.groups {
    if !seen.insert(group.name.as_str()) {
      return Err(ConfigurationError::DuplicateCacheGroup(group.name.clone()));
    }
  }
  Ok(())
}

/// Drop stages the mode gate rejects, then drop rules left with no stages.
/// Relative order is preserved on both levels.
fn filter_rules(rules: &[Rule], mode: BuildMode) -> Vec<ResolvedRule> {
  rules
    .iter()
    .filter_map(|rule| {
      let stages: Vec<_> = rule.stages.iter().filter(|stage| stage.gate.admits(mode)).cloned().collect();
      if stages.is_empty() {
        debug!(rule = %rule.name, mode = %mode, "rule has no stages for this mode, dropped");
        return None;
      }
      Some(ResolvedRule {
        name: rule.name.clone(),
        pattern: rule.pattern.clone(),
        exclude: rule.exclude.clone(),
        stages,
      })
    })
    .collect()
}

/// Prove the mode-filtered rule set free of unordered overlaps.
///
/// Two rules claiming the same witness path without one excluding it is a
/// configuration mistake (the classic case: a plain style rule and its
/// `.module` variant missing the mutual excludes). The check runs once over
/// a synthetic alphabet, independent of any real file.
fn detect_conflicts(rules: &[ResolvedRule]) -> Result<(), ConfigurationError> {
  for witness in witness_alphabet(rules.iter().map(|rule| &rule.pattern)) {
    let mut owners = rules.iter().filter(|rule| rule.applies_to(&witness));
    if let (Some(first), Some(second)) = (owners.next(), owners.next()) {
      return Err(ConfigurationError::ConflictingRules {
        first: first.name.clone(),
        second: second.name.clone(),
        witness: witness.display().to_string(),
      });
    }
  }
  Ok(())
}

/// Order cache groups by descending priority. The sort is stable, so groups
/// with equal priority keep declaration order.
fn order_groups(groups: &[CacheGroup]) -> Vec<CacheGroup> {
  let mut ordered = groups.to_vec();
  ordered.sort_by(|a, b| b.priority.cmp(&a.priority));
  ordered
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use crate::descriptor::{DevtoolConfig, OutputConfig, PluginDecl};
  use crate::pattern::FilePattern;
  use crate::rule::Stage;
  use std::path::Path;

  fn exts(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
  }

  pub(crate) fn minimal_descriptor() -> Descriptor {
    Descriptor {
      output: OutputConfig {
        entry: "src/index.tsx".into(),
        filename: "bundle.[contenthash].js".to_string(),
        dir: "dist".into(),
        clean: true,
      },
      resolve_extensions: exts(&[".ts", ".tsx", ".js"]),
      rules: vec![
        Rule::new(
          "typescript",
          FilePattern::Extensions(exts(&[".ts", ".tsx"])),
          vec![
            Stage::new("babel").only(BuildMode::Production),
            Stage::new("ts").with_option("target", "es2018"),
          ],
        )
        .exclude(FilePattern::Segment("node_modules".to_string())),
      ],
      plugins: vec![
        PluginDecl::new("copy-static").with_option("from", "public"),
        PluginDecl::new("inject-html").with_option("template", "public/index.html"),
      ],
      devtool: DevtoolConfig::default(),
      split_chunks: SplitChunks {
        chunks: "all".to_string(),
        min_chunks: 1,
        groups: vec![
          CacheGroup {
            name: "default".to_string(),
            test: None,
            priority: -20,
            reuse_existing: true,
          },
          CacheGroup {
            name: "vendors".to_string(),
            test: Some(FilePattern::Segment("node_modules".to_string())),
            priority: -10,
            reuse_existing: false,
          },
        ],
      },
    }
  }

  #[test]
  fn empty_extensions_fail_before_rules_are_examined() {
    let mut descriptor = minimal_descriptor();
    descriptor.resolve_extensions.clear();
    // Plant a rule conflict behind the extension error to show ordering.
    descriptor.rules.push(Rule::new(
      "typescript-again",
      FilePattern::Extensions(exts(&[".ts"])),
      vec![Stage::new("ts")],
    ));

    let err = resolve(&descriptor, BuildMode::Development).unwrap_err();
    assert_eq!(err, ConfigurationError::EmptyExtensions);
  }

  #[test]
  fn duplicate_and_malformed_extensions_are_rejected() {
    let mut descriptor = minimal_descriptor();
    descriptor.resolve_extensions = exts(&[".ts", ".ts"]);
    assert!(matches!(
      resolve(&descriptor, BuildMode::Development),
      Err(ConfigurationError::DuplicateExtension(_))
    ));

    descriptor.resolve_extensions = exts(&[".ts", "js"]);
    assert!(matches!(
      resolve(&descriptor, BuildMode::Development),
      Err(ConfigurationError::MalformedExtension(_))
    ));
  }

  #[test]
  fn production_minimizes_and_strips_dev_gated_stages() {
    let mut descriptor = minimal_descriptor();
    descriptor.rules[0]
      .stages
      .push(Stage::new("react-refresh").only(BuildMode::Development));

    let plan = resolve(&descriptor, BuildMode::Production).unwrap();
    assert!(plan.optimization.minimize);
    for rule in &plan.rules {
      assert!(rule.stages.iter().all(|stage| stage.name != "react-refresh"));
    }

    let chain = plan.chain_for(Path::new("src/app.ts"));
    let names: Vec<_> = chain.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["babel", "ts"]);
  }

  #[test]
  fn development_drops_production_only_stages_and_rules() {
    let mut descriptor = minimal_descriptor();
    // A rule consisting solely of a production-gated stage disappears in
    // development rather than erroring.
    descriptor.rules.push(Rule::new(
      "scripts",
      FilePattern::Extensions(exts(&[".js", ".cjs", ".mjs"])),
      vec![Stage::new("babel").only(BuildMode::Production)],
    ));

    let plan = resolve(&descriptor, BuildMode::Development).unwrap();
    assert!(!plan.optimization.minimize);
    assert_eq!(plan.rules.len(), 1);
    assert!(plan.is_passthrough(Path::new("src/util.js")));

    let chain = plan.chain_for(Path::new("src/app.ts"));
    let names: Vec<_> = chain.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["ts"]);
  }

  #[test]
  fn overlapping_rules_without_mutual_exclusion_conflict() {
    let mut descriptor = minimal_descriptor();
    descriptor.rules.push(Rule::new(
      "less",
      FilePattern::Extensions(exts(&[".less"])),
      vec![Stage::new("style"), Stage::new("css")],
    ));
    descriptor.rules.push(Rule::new(
      "less-modules",
      FilePattern::Suffix(".module.less".to_string()),
      vec![Stage::new("style"), Stage::new("css")],
    ));

    let err = resolve(&descriptor, BuildMode::Development).unwrap_err();
    match err {
      ConfigurationError::ConflictingRules { first, second, .. } => {
        assert_eq!(first, "less");
        assert_eq!(second, "less-modules");
      }
      other => panic!("expected conflict, got {:?}", other),
    }
  }

  #[test]
  fn mutually_excluding_rules_resolve_and_route_correctly() {
    let mut descriptor = minimal_descriptor();
    descriptor.rules.push(
      Rule::new(
        "less",
        FilePattern::Extensions(exts(&[".less"])),
        vec![Stage::new("style"), Stage::new("css")],
      )
      .exclude(FilePattern::Suffix(".module.less".to_string())),
    );
    descriptor.rules.push(Rule::new(
      "less-modules",
      FilePattern::Suffix(".module.less".to_string()),
      vec![Stage::new("style"), Stage::new("css").with_option("modules", true)],
    ));

    let plan = resolve(&descriptor, BuildMode::Development).unwrap();
    assert_eq!(plan.matching_rule(Path::new("src/a.less")).unwrap().name, "less");
    assert_eq!(
      plan.matching_rule(Path::new("src/a.module.less")).unwrap().name,
      "less-modules"
    );
  }

  #[test]
  fn conflicts_are_checked_on_the_mode_filtered_rule_set() {
    let mut descriptor = minimal_descriptor();
    // Overlaps with "typescript" on .ts, but only exists in production...
    descriptor.rules.push(Rule::new(
      "instrument",
      FilePattern::Extensions(exts(&[".ts"])),
      vec![Stage::new("coverage").only(BuildMode::Production)],
    ));

    // ...so development resolves, production conflicts.
    assert!(resolve(&descriptor, BuildMode::Development).is_ok());
    assert!(matches!(
      resolve(&descriptor, BuildMode::Production),
      Err(ConfigurationError::ConflictingRules { .. })
    ));
  }

  #[test]
  fn plugins_keep_declaration_order() {
    let descriptor = minimal_descriptor();
    let plan = resolve(&descriptor, BuildMode::Production).unwrap();
    let names: Vec<_> = plan.plugins.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["copy-static", "inject-html"]);
  }

  #[test]
  fn cache_groups_order_by_descending_priority_with_stable_ties() {
    let mut descriptor = minimal_descriptor();
    descriptor.split_chunks.groups.push(CacheGroup {
      name: "shared".to_string(),
      test: None,
      priority: -10,
      reuse_existing: false,
    });

    let plan = resolve(&descriptor, BuildMode::Development).unwrap();
    let names: Vec<_> = plan.optimization.groups.iter().map(|g| g.name.as_str()).collect();
    // vendors (-10) declared before shared (-10), both above default (-20).
    assert_eq!(names, ["vendors", "shared", "default"]);
  }

  #[test]
  fn duplicate_cache_group_names_are_rejected() {
    let mut descriptor = minimal_descriptor();
    descriptor.split_chunks.groups.push(CacheGroup {
      name: "vendors".to_string(),
      test: None,
      priority: 0,
      reuse_existing: false,
    });
    assert!(matches!(
      resolve(&descriptor, BuildMode::Development),
      Err(ConfigurationError::DuplicateCacheGroup(_))
    ));
  }

  #[test]
  fn content_hash_placeholder_passes_through_verbatim() {
    let descriptor = minimal_descriptor();
    let plan = resolve(&descriptor, BuildMode::Production).unwrap();
    assert!(plan.output.filename.contains(crate::CONTENT_HASH_PLACEHOLDER));
    assert_eq!(plan.output.filename, descriptor.output.filename);
  }

  #[test]
  fn devtool_follows_mode() {
    use crate::descriptor::Devtool;
    let descriptor = minimal_descriptor();
    let dev = resolve(&descriptor, BuildMode::Development).unwrap();
    let prod = resolve(&descriptor, BuildMode::Production).unwrap();
    assert_eq!(dev.devtool, Devtool::InlineSourceMap);
    assert_eq!(prod.devtool, Devtool::None);
  }

  #[test]
  fn resolve_is_deterministic_and_pure() {
    let descriptor = minimal_descriptor();
    let before = descriptor.clone();

    let first = resolve(&descriptor, BuildMode::Production).unwrap();
    let second = resolve(&descriptor, BuildMode::Production).unwrap();

    assert_eq!(first, second);
    assert_eq!(
      serde_json::to_string(&first).unwrap(),
      serde_json::to_string(&second).unwrap()
    );
    // The input descriptor is untouched and carried through as-is.
    assert_eq!(descriptor, before);
    assert_eq!(first.source, descriptor);
  }
}
