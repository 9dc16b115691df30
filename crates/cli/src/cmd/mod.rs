mod check;
mod explain;
mod init;
mod plan;

pub use check::cmd_check;
pub use explain::cmd_explain;
pub use init::cmd_init;
pub use plan::cmd_plan;

use std::path::Path;

use anyhow::{Context, Result};
use console::{Term, style};

use pack_core::{BuildMode, Descriptor};

// Helper to convert EvalError to anyhow::Error (works around mlua not being Send+Sync)
fn map_eval_err<T>(result: std::result::Result<T, pack_lua::EvalError>) -> Result<T> {
  result.map_err(|e| anyhow::anyhow!("{}", e))
}

pub(crate) fn parse_mode(mode: &str) -> Result<BuildMode> {
  mode.parse::<BuildMode>().map_err(|e| anyhow::anyhow!(e))
}

/// Evaluate the config file, reporting a styled error if it is missing.
pub(crate) fn load_descriptor(config: &Path, term: &Term) -> Result<Descriptor> {
  if !config.exists() {
    term.write_line(&format!(
      "{} Config file not found: {}",
      style("error:").red().bold(),
      config.display()
    ))?;
    std::process::exit(1);
  }

  map_eval_err(pack_lua::evaluate_config(config))
    .with_context(|| format!("Failed to evaluate config: {}", config.display()))
}
