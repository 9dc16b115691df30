//! Implementation of the `pack init` command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::{Term, style};

/// Starter descriptor for a TypeScript + Less web client.
const TEMPLATE: &str = r#"-- pack.lua build descriptor.
-- Stages with `mode = "production"` only run in production builds; keep
-- mode differences here as gates rather than branching in Lua.
return {
  entry = "src/index.tsx",
  output = {
    filename = "bundle.[contenthash].js",
    dir = "dist",
    clean = true,
  },
  resolve = {
    extensions = { ".ts", ".tsx", ".js", ".jsx", ".cjs", ".mjs" },
  },
  rules = {
    {
      name = "typescript",
      pattern = { extensions = { ".ts", ".tsx" } },
      exclude = { segment = "node_modules" },
      stages = {
        { name = "babel", mode = "production" },
        -- ES2018 keeps async/await debuggable; production lowers via babel.
        { name = "ts", options = { compiler_options = { target = "es2018" } } },
      },
    },
    {
      name = "scripts",
      pattern = { extensions = { ".js", ".jsx", ".cjs", ".mjs" } },
      exclude = { segment = "node_modules" },
      stages = {
        { name = "babel", mode = "production" },
      },
    },
    {
      name = "less",
      pattern = { extensions = { ".less" } },
      exclude = { suffix = ".module.less" },
      stages = {
        "style",
        "css",
        { name = "postcss", options = { preset = "postcss-preset-env" } },
        { name = "less", options = { javascript_enabled = true } },
      },
    },
    {
      name = "less-modules",
      pattern = { suffix = ".module.less" },
      stages = {
        "style",
        { name = "css", options = { modules = true } },
        { name = "postcss", options = { preset = "postcss-preset-env" } },
        { name = "less", options = { javascript_enabled = true } },
      },
    },
    {
      name = "css",
      pattern = { extensions = { ".css" } },
      exclude = { suffix = ".module.css" },
      stages = {
        "style",
        "css",
        { name = "postcss", options = { preset = "postcss-preset-env" } },
      },
    },
    {
      name = "css-modules",
      pattern = { suffix = ".module.css" },
      stages = {
        "style",
        { name = "css", options = { modules = true } },
        { name = "postcss", options = { preset = "postcss-preset-env" } },
      },
    },
    {
      name = "images",
      pattern = { extensions = { ".png", ".jpg", ".jpeg", ".gif" } },
      stages = {
        -- Inline small images as base64, reference the rest by URL.
        { name = "url", options = { limit = 8192, es_module = false } },
        "img",
      },
    },
    {
      name = "fonts-woff",
      pattern = { extensions = { ".woff", ".woff2" } },
      stages = { { name = "file", options = { es_module = false } } },
    },
    {
      name = "fonts",
      pattern = { extensions = { ".ttf", ".eot", ".svg" } },
      stages = { { name = "file", options = { es_module = false } } },
    },
  },
  plugins = {
    -- Copy "public" to the output dir, then inject the bundle script tag.
    { name = "copy-static", options = { from = "public", ignore = { "public/index.html" } } },
    { name = "inject-html", options = { template = "public/index.html" } },
  },
  devtool = {
    development = "inline-source-map",
    production = "none",
  },
  optimization = {
    split_chunks = {
      chunks = "all",
      min_chunks = 1,
      groups = {
        { name = "default", priority = -20, reuse_existing = true },
        { name = "vendors", test = { segment = "node_modules" }, priority = -10 },
      },
    },
  },
}
"#;

pub fn cmd_init(dir: &Path) -> Result<()> {
  let term = Term::stderr();
  let path = dir.join("pack.lua");

  if path.exists() {
    term.write_line(&format!(
      "{} {} already exists",
      style("error:").red().bold(),
      path.display()
    ))?;
    std::process::exit(1);
  }

  fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
  fs::write(&path, TEMPLATE).with_context(|| format!("Failed to write {}", path.display()))?;

  term.write_line(&format!("{} Wrote {}", style("::").green().bold(), path.display()))?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::TEMPLATE;
  use pack_core::BuildMode;

  #[test]
  fn template_evaluates_and_resolves_in_both_modes() {
    let descriptor = pack_lua::evaluate_chunk(TEMPLATE).unwrap();
    for mode in [BuildMode::Development, BuildMode::Production] {
      let plan = pack_core::resolve(&descriptor, mode).unwrap();
      assert!(!plan.rules.is_empty());
      assert_eq!(plan.plugins.len(), 2);
    }
  }
}
