//! Implementation of the `pack explain` command.

use std::path::Path;

use anyhow::Result;
use console::{Term, style};

use crate::cmd::{load_descriptor, parse_mode};

/// Print the stage chain the given file path would be assigned.
pub fn cmd_explain(file: &Path, config: &Path, mode: &str) -> Result<()> {
  let term = Term::stderr();
  let mode = parse_mode(mode)?;
  let descriptor = load_descriptor(config, &term)?;
  let plan = pack_core::resolve(&descriptor, mode)?;

  match plan.matching_rule(file) {
    Some(rule) => {
      println!("{} ({} mode)", file.display(), mode);
      println!("  rule: {}", style(&rule.name).bold());
      for stage in &rule.stages {
        if stage.options.is_empty() {
          println!("    -> {}", stage.name);
        } else {
          let keys: Vec<_> = stage.options.keys().map(String::as_str).collect();
          println!("    -> {} {}", stage.name, style(format!("[{}]", keys.join(", "))).dim());
        }
      }
    }
    None => {
      println!("{} ({} mode)", file.display(), mode);
      println!("  no rule matches: pass-through copy");
    }
  }

  Ok(())
}
