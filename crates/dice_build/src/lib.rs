//! Incremental build orchestration for `dice.toml` build plans.
//!
//! Each target's stale compile units are launched concurrently and joined
//! at a barrier before the target's link step runs. After all targets, the
//! asset directory is packed into an archive and appended to the executable.
//! Rebuild decisions are derived from file modification times on every run;
//! no build state is persisted.

#![warn(missing_docs)]

pub mod builder;
pub mod bundle;
pub mod command;
pub mod error;
pub mod rebuild;
pub mod task;

pub use builder::{build_target, BuildReport, Builder, TargetOutcome};
pub use bundle::{append_to, bundle_executable, BundleOutcome};
pub use command::{expand_command, expand_inputs, Placeholders};
pub use error::BuildError;
pub use rebuild::needs_rebuild;
pub use task::{compile_unit_async, run_sync, wait_all, BuildTask, TaskStatus};
