//! Running a whole build plan.

use std::path::{Path, PathBuf};

use dice_archive::pack_dir;
use dice_config::{BuildPlan, TargetConfig};
use tracing::{debug, error, info, info_span};

use crate::bundle::{bundle_executable, BundleOutcome};
use crate::command::{expand_command, expand_inputs, Placeholders};
use crate::error::BuildError;
use crate::rebuild::needs_rebuild;
use crate::task::{compile_unit_async, run_sync, wait_all, BuildTask, TaskStatus};

/// What [`build_target`] did for one target.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TargetOutcome {
    /// Units that were recompiled.
    pub compiled: Vec<String>,
    /// Whether the link step ran.
    pub linked: bool,
}

/// Summary of a [`Builder::run`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Recompiled units as `target/unit`.
    pub compiled: Vec<String>,
    /// Targets whose link step ran.
    pub linked: Vec<String>,
    /// Whether the asset package was rewritten.
    pub package_rebuilt: bool,
    /// Bytes appended to the executable, if bundling happened.
    pub bundled_bytes: Option<u64>,
}

impl BuildReport {
    /// Returns `true` if the run found nothing to do.
    pub fn is_up_to_date(&self) -> bool {
        self.compiled.is_empty()
            && self.linked.is_empty()
            && !self.package_rebuilt
            && self.bundled_bytes.is_none()
    }
}

/// Builds one target rooted at `root`.
///
/// 1. Keeps the units whose output is stale.
/// 2. Launches all of them at once.
/// 3. Waits for every one; any failure fails the target.
/// 4. Runs the link step if a unit was rebuilt or the link output is stale
///    relative to the unit outputs and extra inputs.
pub fn build_target(target: &TargetConfig, root: &Path) -> Result<TargetOutcome, BuildError> {
    let _span = info_span!("target", name = %target.name).entered();
    let mut outcome = TargetOutcome::default();

    let mut stale = Vec::new();
    for unit in &target.units {
        let output = root.join(&unit.output);
        let inputs = expand_inputs(root, &unit.inputs().collect::<Vec<_>>())?;
        if needs_rebuild(&output, &inputs).map_err(|e| BuildError::io(&output, e))? {
            stale.push(unit);
        } else {
            debug!(unit = %unit.name, "up to date");
        }
    }

    if !stale.is_empty() {
        let mut tasks: Vec<BuildTask> = Vec::with_capacity(stale.len());
        let mut launch_error = None;
        for unit in &stale {
            if let Some(parent) = root.join(&unit.output).parent() {
                std::fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
            }
            match compile_unit_async(unit, root) {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    error!(unit = %unit.name, "{e}");
                    launch_error = Some(e);
                    break;
                }
            }
        }

        // Already-running siblings finish before any failure is reported.
        let all_ok = wait_all(&mut tasks);
        if let Some(e) = launch_error {
            return Err(e);
        }
        if !all_ok {
            return Err(BuildError::UnitsFailed {
                target: target.name.clone(),
                failed: tasks
                    .iter()
                    .filter(|t| t.status() != TaskStatus::Succeeded)
                    .map(|t| t.name().to_string())
                    .collect(),
            });
        }
        outcome.compiled = stale.iter().map(|u| u.name.clone()).collect();
    }

    if let Some(link) = &target.link {
        let output = root.join(&link.output);
        let objects: Vec<PathBuf> = target.unit_outputs().map(|p| root.join(p)).collect();
        let mut inputs = objects.clone();
        inputs.extend(expand_inputs(root, &link.inputs)?);

        let stale = !outcome.compiled.is_empty()
            || needs_rebuild(&output, &inputs).map_err(|e| BuildError::io(&output, e))?;
        if stale {
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
            }
            let vars = Placeholders {
                output: Some(&output),
                objects: Some(&objects),
                inputs: Some(&inputs),
                ..Default::default()
            };
            let step = format!("{} link", target.name);
            let argv = expand_command(&link.command, &vars, &step)?;
            run_sync(&argv, root, &step)?;
            outcome.linked = true;
        } else {
            debug!(output = %output.display(), "link output up to date");
        }
    }

    Ok(outcome)
}

/// Runs build plans rooted at a project directory.
pub struct Builder {
    root: PathBuf,
}

impl Builder {
    /// Creates a builder resolving plan paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs every target in declaration order, then the asset and bundle
    /// steps. Stops at the first failure.
    pub fn run(&self, plan: &BuildPlan) -> Result<BuildReport, BuildError> {
        let mut report = BuildReport::default();

        let dirs = std::iter::once(&plan.project.build_dir).chain(&plan.project.extra_dirs);
        for dir in dirs {
            let dir = self.root.join(dir);
            if !dir.is_dir() {
                std::fs::create_dir_all(&dir).map_err(|e| BuildError::io(&dir, e))?;
                info!(dir = %dir.display(), "created directory");
            }
        }

        for target in &plan.targets {
            let outcome = build_target(target, &self.root)?;
            report.compiled.extend(
                outcome
                    .compiled
                    .into_iter()
                    .map(|unit| format!("{}/{unit}", target.name)),
            );
            if outcome.linked {
                report.linked.push(target.name.clone());
            }
        }

        if let Some(assets) = &plan.assets {
            let dir = self.root.join(&assets.dir);
            let package = self.root.join(&assets.package);
            if !dir.is_dir() {
                return Err(BuildError::io(
                    &dir,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "asset directory not found"),
                ));
            }
            let files = expand_inputs(&self.root, std::slice::from_ref(&assets.dir))?;
            if needs_rebuild(&package, &files).map_err(|e| BuildError::io(&package, e))? {
                let summary = pack_dir(&dir, &package)?;
                info!(
                    entries = summary.entries,
                    bytes = summary.archive_size,
                    "packed assets"
                );
                report.package_rebuilt = true;
            }

            if let Some(bundle) = &plan.bundle {
                let executable = self.root.join(&bundle.executable);
                let relinked = plan.targets.iter().any(|t| {
                    report.linked.contains(&t.name)
                        && t.link
                            .as_ref()
                            .is_some_and(|l| self.root.join(&l.output) == executable)
                });
                // A package newer than the executable means an earlier run
                // packed it but never appended it.
                let force = relinked
                    || report.package_rebuilt
                    || needs_rebuild(&executable, std::slice::from_ref(&package))
                        .map_err(|e| BuildError::io(&executable, e))?;
                if let BundleOutcome::Appended { bytes, .. } =
                    bundle_executable(&executable, &package, force)?
                {
                    report.bundled_bytes = Some(bytes);
                }
            }
        }

        Ok(report)
    }
}
