//! pack-lua: Lua front end for pack.lua configuration
//!
//! The build descriptor is an executable config: a Lua file returning a
//! table describing entry, output, rules, plugins, and optimization. This
//! crate owns the Lua runtime, loads that file, and converts the returned
//! table into a validated `pack_core::Descriptor`.
//!
//! The build mode is deliberately not visible from Lua. Stages declare mode
//! gates (`mode = "production"`) instead of branching at evaluation time, so
//! a single evaluation serves both modes and resolution stays pure.

mod convert;
mod error;
mod eval;
mod runtime;

pub use error::EvalError;
pub use eval::{evaluate_chunk, evaluate_config};
pub use runtime::{create_runtime, load_file};
