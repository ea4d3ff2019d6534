//! Parsing and validation of `dice.toml` build plans.
//!
//! This crate reads the build plan file and produces a strongly-typed
//! [`BuildPlan`]: the ordered targets with their compile units and optional
//! link step, plus the asset packing and bundling steps.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_project_root, load_plan, load_plan_file, load_plan_from_str, CONFIG_FILE};
pub use types::*;
