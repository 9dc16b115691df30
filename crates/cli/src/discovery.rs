//! Source discovery for plan display.
//!
//! The resolver itself never touches the filesystem; this is the CLI's
//! implementation of the `FileDiscovery` collaborator, used to show per-file
//! chain assignments under `pack plan --root`.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use pack_core::engine::FileDiscovery;

/// Walkdir-backed discovery that skips dependency, VCS, hidden, and output
/// directories. Listing order is sorted so output is deterministic.
pub struct SourceWalker {
  skip_dirs: Vec<String>,
}

impl SourceWalker {
  pub fn new(output_dir: &Path) -> Self {
    let mut skip_dirs = vec!["node_modules".to_string()];
    if let Some(name) = output_dir.file_name().and_then(|n| n.to_str()) {
      skip_dirs.push(name.to_string());
    }
    SourceWalker { skip_dirs }
  }

  fn keep(&self, entry: &walkdir::DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if entry.depth() > 0 && name.starts_with('.') {
      return false;
    }
    if entry.file_type().is_dir() && self.skip_dirs.iter().any(|d| name == d.as_str()) {
      return false;
    }
    true
  }
}

impl FileDiscovery for SourceWalker {
  fn discover(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|e| self.keep(e))
    {
      let entry = entry.map_err(io::Error::other)?;
      if entry.file_type().is_file() {
        files.push(entry.into_path());
      }
    }
    Ok(files)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;

  #[test]
  fn skips_node_modules_hidden_and_output_dirs() {
    let temp = tempfile::TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("node_modules/react")).unwrap();
    fs::create_dir_all(root.join("dist")).unwrap();
    fs::create_dir_all(root.join(".cache")).unwrap();
    fs::write(root.join("src/index.ts"), "").unwrap();
    fs::write(root.join("src/app.less"), "").unwrap();
    fs::write(root.join("node_modules/react/index.js"), "").unwrap();
    fs::write(root.join("dist/bundle.js"), "").unwrap();
    fs::write(root.join(".cache/tmp"), "").unwrap();

    let walker = SourceWalker::new(Path::new("dist"));
    let files = walker.discover(root).unwrap();
    let names: Vec<_> = files
      .iter()
      .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().to_string())
      .collect();

    assert_eq!(names, ["src/app.less", "src/index.ts"]);
  }
}
