//! Build plan loading and validation.

use crate::error::ConfigError;
use crate::types::BuildPlan;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Name of the build plan file at the project root.
pub const CONFIG_FILE: &str = "dice.toml";

/// Loads and validates `<project_dir>/dice.toml`.
pub fn load_plan(project_dir: &Path) -> Result<BuildPlan, ConfigError> {
    load_plan_file(&project_dir.join(CONFIG_FILE))
}

/// Loads and validates a build plan from an explicit file path.
pub fn load_plan_file(path: &Path) -> Result<BuildPlan, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_plan_from_str(&content)
}

/// Parses and validates a build plan from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_plan_from_str(content: &str) -> Result<BuildPlan, ConfigError> {
    let plan: BuildPlan =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_plan(&plan)?;
    Ok(plan)
}

/// Walks up from `start` looking for a directory containing `dice.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, ConfigError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(ConfigError::NotFound {
                start: start.to_path_buf(),
            });
        }
    }
}

/// Checks names, commands and output uniqueness across the whole plan.
fn validate_plan(plan: &BuildPlan) -> Result<(), ConfigError> {
    if plan.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }

    let mut target_names = HashSet::new();
    let mut outputs: HashSet<&Path> = HashSet::new();

    for (i, target) in plan.targets.iter().enumerate() {
        if target.name.is_empty() {
            return Err(ConfigError::MissingField(format!("target[{i}].name")));
        }
        if !target_names.insert(target.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate target name '{}'",
                target.name
            )));
        }
        if target.units.is_empty() && target.link.is_none() {
            return Err(ConfigError::ValidationError(format!(
                "target '{}' has neither units nor a link step",
                target.name
            )));
        }

        let mut unit_names = HashSet::new();
        for unit in &target.units {
            let owner = format!("target '{}' unit", target.name);
            if unit.name.is_empty() {
                return Err(ConfigError::MissingField(format!("{owner}.name")));
            }
            if !unit_names.insert(unit.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate unit name '{}' in target '{}'",
                    unit.name, target.name
                )));
            }
            let owner = format!("{owner} '{}'", unit.name);
            if unit.source.as_os_str().is_empty() {
                return Err(ConfigError::MissingField(format!("{owner}.source")));
            }
            if unit.command.is_empty() {
                return Err(ConfigError::MissingField(format!("{owner}.command")));
            }
            require_output(&unit.output, &owner)?;
            if !outputs.insert(unit.output.as_path()) {
                return Err(duplicate_output(&unit.output));
            }
        }

        if let Some(link) = &target.link {
            let owner = format!("target '{}' link", target.name);
            if link.command.is_empty() {
                return Err(ConfigError::MissingField(format!("{owner}.command")));
            }
            require_output(&link.output, &owner)?;
            if !outputs.insert(link.output.as_path()) {
                return Err(duplicate_output(&link.output));
            }
        }
    }

    if let Some(assets) = &plan.assets {
        if assets.dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("assets.dir".to_string()));
        }
        if assets.package.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("assets.package".to_string()));
        }
        if !outputs.insert(assets.package.as_path()) {
            return Err(duplicate_output(&assets.package));
        }
    }

    if let Some(bundle) = &plan.bundle {
        if bundle.executable.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("bundle.executable".to_string()));
        }
        if plan.assets.is_none() {
            return Err(ConfigError::ValidationError(
                "[bundle] requires an [assets] package to append".to_string(),
            ));
        }
    }

    Ok(())
}

fn require_output(path: &Path, owner: &str) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::MissingField(format!("{owner}.output")));
    }
    Ok(())
}

fn duplicate_output(path: &Path) -> ConfigError {
    ConfigError::ValidationError(format!(
        "output '{}' is produced by more than one step",
        path.display()
    ))
}
