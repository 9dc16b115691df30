//! Implementation of the `pack check` command.

use std::path::Path;

use anyhow::Result;
use console::{Term, style};

use pack_core::BuildMode;

use crate::cmd::{load_descriptor, parse_mode};

/// Validate a config by resolving it. With no explicit mode, both modes are
/// checked, since a rule conflict can exist in one mode only.
pub fn cmd_check(config: &Path, mode: Option<&str>) -> Result<()> {
  let term = Term::stderr();
  let descriptor = load_descriptor(config, &term)?;

  let modes = match mode {
    Some(mode) => vec![parse_mode(mode)?],
    None => vec![BuildMode::Development, BuildMode::Production],
  };

  let mut failed = false;
  for mode in modes {
    match pack_core::resolve(&descriptor, mode) {
      Ok(plan) => {
        term.write_line(&format!(
          "{} {}: ok ({} rule(s), {} plugin(s))",
          style("::").green().bold(),
          mode,
          plan.rules.len(),
          plan.plugins.len()
        ))?;
      }
      Err(e) => {
        term.write_line(&format!("{} {}: {}", style("error:").red().bold(), mode, e))?;
        failed = true;
      }
    }
  }

  if failed {
    std::process::exit(1);
  }
  Ok(())
}
