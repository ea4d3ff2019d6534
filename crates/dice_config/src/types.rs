//! Build plan types deserialized from `dice.toml`.
//!
//! All paths are relative to the project root (the directory holding
//! `dice.toml`) unless they are absolute.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The top-level build plan parsed from `dice.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildPlan {
    /// Project metadata and directories to create before building.
    pub project: ProjectMeta,
    /// Targets, built in declaration order.
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetConfig>,
    /// Optional asset packing step.
    #[serde(default)]
    pub assets: Option<AssetsConfig>,
    /// Optional self-contained executable step.
    #[serde(default)]
    pub bundle: Option<BundleConfig>,
}

/// The `[project]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// Directory for intermediate outputs; created before building.
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
    /// Additional directories to create before building.
    #[serde(default)]
    pub extra_dirs: Vec<PathBuf>,
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

/// One `[[target]]`: a set of independent compile units and an optional
/// link step combining their outputs.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Target name, used in status output.
    pub name: String,
    /// Compile units. Each produces one output from one source.
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitConfig>,
    /// Optional combine step run after all units succeed.
    #[serde(default)]
    pub link: Option<LinkConfig>,
}

impl TargetConfig {
    /// Outputs of every unit, in declaration order.
    pub fn unit_outputs(&self) -> impl Iterator<Item = &Path> {
        self.units.iter().map(|u| u.output.as_path())
    }
}

/// A `[[target.unit]]`: one source compiled into one output.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitConfig {
    /// Unit name, unique within its target.
    pub name: String,
    /// The primary source file.
    pub source: PathBuf,
    /// Extra inputs (headers, configs) that also trigger a rebuild.
    #[serde(default)]
    pub deps: Vec<PathBuf>,
    /// The file this unit produces.
    pub output: PathBuf,
    /// Program and arguments. Supports `{source}` and `{output}`.
    pub command: Vec<String>,
}

impl UnitConfig {
    /// The source followed by every dependency.
    pub fn inputs(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.source.as_path()).chain(self.deps.iter().map(PathBuf::as_path))
    }
}

/// A `[target.link]` step.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    /// The combined output.
    pub output: PathBuf,
    /// Inputs beside the unit outputs. Directories expand to every file
    /// below them.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    /// Program and arguments. Supports `{output}`, `{objects}` and
    /// `{inputs}`.
    pub command: Vec<String>,
}

/// The `[assets]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    /// Directory packed into the archive.
    pub dir: PathBuf,
    /// Archive file to produce.
    pub package: PathBuf,
}

/// The `[bundle]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleConfig {
    /// Executable that receives the asset package.
    pub executable: PathBuf,
}
