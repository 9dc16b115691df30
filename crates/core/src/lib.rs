//! pack-core: descriptor model and plan resolution for pack.lua
//!
//! This crate provides the fundamental types used throughout pack.lua:
//! - `Descriptor`: the declarative build configuration (entry, rules, plugins)
//! - `Rule` / `Stage`: file-pattern to transform-chain mappings
//! - `ExecutionPlan`: the resolved, immutable plan handed to the build engine
//! - `resolve`: the pure function turning a descriptor plus mode into a plan
//!
//! Resolution performs no I/O. Everything that touches the filesystem lives
//! behind the collaborator traits in [`engine`].

pub mod engine;

mod descriptor;
mod error;
mod mode;
mod options;
mod pattern;
mod plan;
mod resolve;
mod rule;

pub use descriptor::{
  CONTENT_HASH_PLACEHOLDER, CacheGroup, Descriptor, Devtool, DevtoolConfig, OutputConfig, PluginDecl, SplitChunks,
};
pub use error::ConfigurationError;
pub use mode::{BuildMode, ModeGate};
pub use options::OptValue;
pub use pattern::FilePattern;
pub use plan::{ExecutionPlan, OptimizationPolicy, ResolvedRule};
pub use resolve::resolve;
pub use rule::{Rule, Stage};

/// Result type for resolution.
pub type Result<T> = std::result::Result<T, ConfigurationError>;
