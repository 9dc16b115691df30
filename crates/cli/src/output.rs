//! Terminal rendering of resolved plans.

use std::path::PathBuf;

use anyhow::Result;
use console::{Term, style};

use pack_core::{ExecutionPlan, OptValue};

pub fn print_plan(term: &Term, plan: &ExecutionPlan, verbose: bool) -> Result<()> {
  term.write_line(&format!("{} Plan ({} mode)", style("::").cyan().bold(), plan.mode))?;
  term.write_line(&format!("  Entry:   {}", plan.output.entry.display()))?;
  term.write_line(&format!(
    "  Output:  {} in {}{}",
    plan.output.filename,
    plan.output.dir.display(),
    if plan.output.clean { " (cleaned)" } else { "" }
  ))?;
  term.write_line(&format!("  Resolve: {}", plan.resolve_extensions.join(", ")))?;
  term.write_line(&format!("  Devtool: {}", plan.devtool.as_str()))?;

  term.write_line(&format!("  Rules ({}):", plan.rules.len()))?;
  for rule in &plan.rules {
    let chain: Vec<_> = rule.stages.iter().map(|s| s.name.as_str()).collect();
    term.write_line(&format!(
      "    {} {}",
      style(&rule.name).bold(),
      style(chain.join(" -> ")).dim()
    ))?;
    if verbose {
      for stage in &rule.stages {
        for (key, value) in &stage.options {
          term.write_line(&format!("      {}.{} = {}", stage.name, key, render_opt(value)))?;
        }
      }
    }
  }

  term.write_line(&format!("  Plugins ({}):", plan.plugins.len()))?;
  for plugin in &plan.plugins {
    term.write_line(&format!("    {}", plugin.name))?;
  }

  let opt = &plan.optimization;
  let groups: Vec<_> = opt.groups.iter().map(|g| g.name.as_str()).collect();
  term.write_line(&format!(
    "  Optimization: minimize={} chunks={} groups=[{}]",
    opt.minimize,
    opt.chunks,
    groups.join(", ")
  ))?;

  Ok(())
}

pub fn print_assignments(term: &Term, plan: &ExecutionPlan, files: &[PathBuf]) -> Result<()> {
  term.write_line("")?;
  term.write_line(&format!("{} Files ({}):", style("::").cyan().bold(), files.len()))?;
  for file in files {
    match plan.matching_rule(file) {
      Some(rule) => {
        term.write_line(&format!(
          "  {} {} {}",
          style("+").green().bold(),
          file.display(),
          style(format!("({})", rule.name)).dim()
        ))?;
      }
      None => {
        term.write_line(&format!(
          "  {} {} {}",
          style("=").dim(),
          file.display(),
          style("(pass-through)").dim()
        ))?;
      }
    }
  }
  Ok(())
}

fn render_opt(value: &OptValue) -> String {
  match value {
    OptValue::Bool(b) => b.to_string(),
    OptValue::Int(i) => i.to_string(),
    OptValue::Float(f) => f.to_string(),
    OptValue::Str(s) => format!("\"{}\"", s),
    OptValue::List(items) => format!("[{} item(s)]", items.len()),
    OptValue::Map(map) => format!("{{{} field(s)}}", map.len()),
  }
}
