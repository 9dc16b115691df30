//! Collaborator seams for the external build-execution engine.
//!
//! The resolver only produces a plan; discovery, transformation, chunking,
//! and emission are owned by whoever executes it. These traits fix the
//! boundaries. Real engines bring their own I/O, threading, and caching;
//! errors they raise pass through the planner untouched.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::descriptor::OutputConfig;
use crate::plan::OptimizationPolicy;
use crate::rule::Stage;

/// A transform stage failed on a specific file.
///
/// Raised by [`TransformEngine`] implementations during plan execution,
/// never during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stage '{stage}' failed on '{path}': {message}")]
pub struct TransformError {
  pub stage: String,
  pub path: PathBuf,
  pub message: String,
}

/// Enumerates candidate source files under a root, respecting ignore rules.
pub trait FileDiscovery {
  fn discover(&self, root: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Executes one named transform stage against file content.
pub trait TransformEngine {
  fn run(&self, stage: &Stage, path: &Path, content: Vec<u8>) -> Result<Vec<u8>, TransformError>;
}

/// A module's chunk-group assignment produced by the optimizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkAssignment {
  pub module: PathBuf,
  /// `None` puts the module in the entry chunk.
  pub group: Option<String>,
}

/// Consumes the optimization policy and groups modules into chunks.
pub trait Optimizer {
  fn assign(&self, policy: &OptimizationPolicy, modules: &[PathBuf]) -> Vec<ChunkAssignment>;
}

/// Writes an output file, substituting the content hash into the filename
/// template from [`OutputConfig`].
pub trait Emitter {
  fn emit(&self, output: &OutputConfig, content_hash: &str, content: &[u8]) -> io::Result<PathBuf>;
}
