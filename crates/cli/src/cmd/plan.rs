//! Implementation of the `pack plan` command.
//!
//! Evaluates a config file, resolves it for the requested mode, and prints
//! the resulting execution plan. With `--root`, also walks a source tree and
//! shows which rule chain each discovered file would be assigned.

use std::path::Path;

use anyhow::{Context, Result};
use console::Term;
use tracing::debug;

use pack_core::engine::FileDiscovery;

use crate::cmd::{load_descriptor, parse_mode};
use crate::discovery::SourceWalker;
use crate::output::{print_assignments, print_plan};

pub fn cmd_plan(config: &Path, mode: &str, json: bool, root: Option<&Path>, verbose: bool) -> Result<()> {
  let term = Term::stderr();
  let mode = parse_mode(mode)?;
  let descriptor = load_descriptor(config, &term)?;
  let plan = pack_core::resolve(&descriptor, mode)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?);
    return Ok(());
  }

  print_plan(&term, &plan, verbose)?;

  if let Some(root) = root {
    let walker = SourceWalker::new(&plan.output.dir);
    let files = walker
      .discover(root)
      .with_context(|| format!("Failed to walk {}", root.display()))?;
    debug!(root = %root.display(), files = files.len(), "discovered sources");
    print_assignments(&term, &plan, &files)?;
  }

  Ok(())
}
