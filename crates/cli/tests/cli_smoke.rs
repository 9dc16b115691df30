//! CLI smoke tests for pack.
//!
//! These tests verify that all CLI commands run without panicking and
//! return appropriate exit codes.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the pack binary.
fn pack_cmd() -> Command {
  cargo_bin_cmd!("pack")
}

/// Create a temp directory with a config file.
fn temp_config(content: &str) -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("pack.lua"), content).unwrap();
  temp
}

/// Minimal valid config: one rule, one plugin.
const MINIMAL_CONFIG: &str = r#"
return {
  entry = "src/index.tsx",
  resolve = { extensions = { ".ts", ".tsx", ".js" } },
  rules = {
    {
      name = "typescript",
      pattern = { extensions = { ".ts", ".tsx" } },
      exclude = { segment = "node_modules" },
      stages = {
        { name = "babel", mode = "production" },
        "ts",
      },
    },
  },
  plugins = {
    { name = "inject-html", options = { template = "public/index.html" } },
  },
}
"#;

/// Config with a style rule and its module variant missing the mutual
/// excludes, which is a resolve-time conflict.
const CONFLICTING_CONFIG: &str = r#"
return {
  entry = "src/index.tsx",
  resolve = { extensions = { ".ts" } },
  rules = {
    { name = "less", pattern = { extensions = { ".less" } }, stages = { "style", "css" } },
    { name = "less-modules", pattern = { suffix = ".module.less" }, stages = { "style", "css" } },
  },
}
"#;

#[test]
fn plan_prints_summary() {
  let temp = temp_config(MINIMAL_CONFIG);
  pack_cmd()
    .current_dir(temp.path())
    .args(["plan"])
    .assert()
    .success()
    .stderr(predicate::str::contains("Plan (development mode)"))
    .stderr(predicate::str::contains("typescript"));
}

#[test]
fn plan_json_emits_the_resolved_plan() {
  let temp = temp_config(MINIMAL_CONFIG);
  let output = pack_cmd()
    .current_dir(temp.path())
    .args(["plan", "--json", "--mode", "production"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let plan: serde_json::Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(plan["mode"], "production");
  assert_eq!(plan["optimization"]["minimize"], true);
  // The production-gated babel stage is present in this mode.
  assert_eq!(plan["rules"][0]["stages"][0]["name"], "babel");
}

#[test]
fn plan_with_root_lists_file_assignments() {
  let temp = temp_config(MINIMAL_CONFIG);
  std::fs::create_dir_all(temp.path().join("src")).unwrap();
  std::fs::write(temp.path().join("src/index.tsx"), "").unwrap();
  std::fs::write(temp.path().join("src/readme.txt"), "").unwrap();

  pack_cmd()
    .current_dir(temp.path())
    .args(["plan", "--root", "src"])
    .assert()
    .success()
    .stderr(predicate::str::contains("Files (2)"))
    .stderr(predicate::str::contains("pass-through"));
}

#[test]
fn check_passes_both_modes_for_valid_config() {
  let temp = temp_config(MINIMAL_CONFIG);
  pack_cmd()
    .current_dir(temp.path())
    .args(["check"])
    .assert()
    .success()
    .stderr(predicate::str::contains("development: ok"))
    .stderr(predicate::str::contains("production: ok"));
}

#[test]
fn check_fails_on_conflicting_rules() {
  let temp = temp_config(CONFLICTING_CONFIG);
  pack_cmd()
    .current_dir(temp.path())
    .args(["check"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("without mutual exclusion"));
}

#[test]
fn check_fails_on_empty_extensions() {
  let temp = temp_config(
    r#"
    return {
      entry = "src/index.ts",
      rules = {},
    }
    "#,
  );
  pack_cmd()
    .current_dir(temp.path())
    .args(["check"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("resolve.extensions"));
}

#[test]
fn explain_names_the_owning_rule() {
  let temp = temp_config(MINIMAL_CONFIG);
  pack_cmd()
    .current_dir(temp.path())
    .args(["explain", "src/app.ts"])
    .assert()
    .success()
    .stdout(predicate::str::contains("typescript"))
    .stdout(predicate::str::contains("-> ts"));
}

#[test]
fn explain_reports_pass_through_for_unmatched_files() {
  let temp = temp_config(MINIMAL_CONFIG);
  pack_cmd()
    .current_dir(temp.path())
    .args(["explain", "src/logo.bmp"])
    .assert()
    .success()
    .stdout(predicate::str::contains("pass-through"));
}

#[test]
fn init_writes_a_config_that_checks_clean() {
  let temp = TempDir::new().unwrap();
  pack_cmd().current_dir(temp.path()).args(["init"]).assert().success();
  assert!(temp.path().join("pack.lua").exists());

  pack_cmd().current_dir(temp.path()).args(["check"]).assert().success();
}

#[test]
fn init_refuses_to_overwrite() {
  let temp = temp_config(MINIMAL_CONFIG);
  pack_cmd()
    .current_dir(temp.path())
    .args(["init"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("already exists"));
}

#[test]
fn missing_config_is_reported() {
  let temp = TempDir::new().unwrap();
  pack_cmd()
    .current_dir(temp.path())
    .args(["plan"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn unknown_mode_is_rejected() {
  let temp = temp_config(MINIMAL_CONFIG);
  pack_cmd()
    .current_dir(temp.path())
    .args(["plan", "--mode", "release"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown build mode"));
}
