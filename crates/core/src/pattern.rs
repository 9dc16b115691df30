//! File patterns and overlap witnesses.
//!
//! Patterns are deliberately small: extension lists, literal name suffixes,
//! and path segments. That is enough to express the usual bundler rule sets
//! (scripts by extension, `.module.*` style variants by suffix,
//! `node_modules` excludes by segment) while keeping overlap analysis exact.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Extensions the overlap analysis uses as its synthetic alphabet.
///
/// Covers the script, style, image, and font families a front-end build is
/// expected to route. Patterns over extensions outside this list still get a
/// witness of their own, see [`FilePattern::witnesses`].
pub const KNOWN_EXTENSIONS: &[&str] = &[
  ".ts", ".tsx", ".js", ".jsx", ".cjs", ".mjs", ".json", ".css", ".less", ".scss", ".sass", ".png", ".jpg", ".jpeg",
  ".gif", ".webp", ".svg", ".woff", ".woff2", ".ttf", ".eot", ".otf", ".html", ".wasm",
];

/// Style extensions that also occur in a `.module.*` variant.
const STYLE_EXTENSIONS: &[&str] = &[".css", ".less", ".scss", ".sass"];

/// A matcher over candidate source file paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePattern {
  /// File name ends with any of the listed extensions (each starts with '.').
  Extensions(Vec<String>),
  /// File name ends with the literal suffix, e.g. `.module.less`.
  Suffix(String),
  /// Some path component equals the literal, e.g. `node_modules`.
  Segment(String),
}

impl FilePattern {
  /// Whether the pattern matches the given path.
  pub fn matches(&self, path: &Path) -> bool {
    match self {
      FilePattern::Extensions(exts) => file_name(path).is_some_and(|name| exts.iter().any(|ext| name.ends_with(ext))),
      FilePattern::Suffix(suffix) => file_name(path).is_some_and(|name| name.ends_with(suffix.as_str())),
      FilePattern::Segment(segment) => path.components().any(|c| c.as_os_str().to_str() == Some(segment)),
    }
  }

  /// Synthetic paths this pattern is guaranteed to match.
  ///
  /// Used to seed the overlap analysis so that patterns over suffixes or
  /// extensions outside [`KNOWN_EXTENSIONS`] are still represented.
  pub(crate) fn witnesses(&self) -> Vec<PathBuf> {
    match self {
      FilePattern::Extensions(exts) => exts.iter().map(|ext| sample_path(ext)).collect(),
      FilePattern::Suffix(suffix) => vec![sample_path(suffix)],
      FilePattern::Segment(segment) => {
        // A segment rule claims every file under that segment, so pair it
        // with the whole known alphabet plus one extension-less witness.
        let mut paths: Vec<PathBuf> = KNOWN_EXTENSIONS
          .iter()
          .map(|ext| PathBuf::from(format!("{}/sample{}", segment, ext)))
          .collect();
        paths.push(PathBuf::from(format!("{}/sample.asset", segment)));
        paths
      }
    }
  }
}

/// The witness alphabet for a rule set: one sample path per known extension,
/// a `.module.*` variant per style extension, plus every pattern's own
/// witnesses. Deterministically ordered and deduplicated.
pub(crate) fn witness_alphabet<'a>(patterns: impl Iterator<Item = &'a FilePattern>) -> Vec<PathBuf> {
  let mut paths: Vec<PathBuf> = KNOWN_EXTENSIONS.iter().map(|ext| sample_path(ext)).collect();
  paths.extend(STYLE_EXTENSIONS.iter().map(|ext| sample_path(&format!(".module{}", ext))));
  for pattern in patterns {
    paths.extend(pattern.witnesses());
  }
  paths.sort();
  paths.dedup();
  paths
}

fn sample_path(suffix: &str) -> PathBuf {
  if suffix.starts_with('.') {
    PathBuf::from(format!("src/sample{}", suffix))
  } else {
    PathBuf::from(format!("src/{}", suffix))
  }
}

fn file_name(path: &Path) -> Option<&str> {
  path.file_name().and_then(|n| n.to_str())
}
