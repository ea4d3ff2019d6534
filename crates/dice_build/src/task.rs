//! Launching external processes and joining them.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Child, Command, ExitStatus};

use dice_config::UnitConfig;
use tracing::{error, info};

use crate::command::{expand_command, Placeholders};
use crate::error::BuildError;

/// State of a launched process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    /// The process has been spawned and not yet waited on.
    Running,
    /// The process exited with a success status.
    Succeeded,
    /// The process exited unsuccessfully, was killed, or could not be waited on.
    Failed,
}

/// Handle to one running compile unit.
#[derive(Debug)]
pub struct BuildTask {
    name: String,
    child: Child,
    status: TaskStatus,
}

impl BuildTask {
    /// The unit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current status. `Running` until [`wait_all`] observes the exit.
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Blocks until the process exits and records its status.
    fn wait(&mut self) -> TaskStatus {
        if self.status != TaskStatus::Running {
            return self.status;
        }
        self.status = match self.child.wait() {
            Ok(status) if status.success() => TaskStatus::Succeeded,
            Ok(status) => {
                error!(unit = %self.name, "compile unit {}", describe(status));
                TaskStatus::Failed
            }
            Err(e) => {
                error!(unit = %self.name, error = %e, "failed to wait for process");
                TaskStatus::Failed
            }
        };
        self.status
    }
}

/// Launches the compiler for `unit` without waiting for it.
///
/// Paths in the unit are resolved against `root`, which is also the
/// working directory of the process.
pub fn compile_unit_async(unit: &UnitConfig, root: &Path) -> Result<BuildTask, BuildError> {
    let source = root.join(&unit.source);
    let output = root.join(&unit.output);
    let vars = Placeholders {
        source: Some(&source),
        output: Some(&output),
        ..Default::default()
    };
    let argv = expand_command(&unit.command, &vars, &unit.name)?;
    let child = spawn(&argv, root)?;
    Ok(BuildTask {
        name: unit.name.clone(),
        child,
        status: TaskStatus::Running,
    })
}

/// Waits for every task, in order, and returns `true` only if all of them
/// succeeded.
///
/// Tasks are never cancelled: a failure is only reported once every
/// sibling has finished.
pub fn wait_all(tasks: &mut [BuildTask]) -> bool {
    let mut ok = true;
    for task in tasks.iter_mut() {
        ok &= task.wait() == TaskStatus::Succeeded;
    }
    ok
}

/// Runs `argv` to completion in `root`. `step` names it in errors.
pub fn run_sync(argv: &[OsString], root: &Path, step: &str) -> Result<(), BuildError> {
    let status = spawn(argv, root)?.wait().map_err(|source| BuildError::Wait {
        name: step.to_string(),
        source,
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(BuildError::StepFailed {
            step: step.to_string(),
            status: describe(status),
        })
    }
}

fn spawn(argv: &[OsString], root: &Path) -> Result<Child, BuildError> {
    let Some((program, args)) = argv.split_first() else {
        return Err(BuildError::Spawn {
            program: String::new(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        });
    };
    info!("CMD: {}", render(argv));
    Command::new(program)
        .args(args)
        .current_dir(root)
        .spawn()
        .map_err(|source| BuildError::Spawn {
            program: program.to_string_lossy().into_owned(),
            source,
        })
}

fn render(argv: &[OsString]) -> String {
    argv.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with code {code}"),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn unit(name: &str, script: &str) -> UnitConfig {
        UnitConfig {
            name: name.to_string(),
            source: PathBuf::from(format!("{name}.c")),
            deps: Vec::new(),
            output: PathBuf::from(format!("{name}.o")),
            command: vec!["sh".into(), "-c".into(), script.into()],
        }
    }

    #[test]
    fn compile_unit_async_substitutes_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mut u = unit("a", "");
        u.command = vec![
            "sh".into(),
            "-c".into(),
            "cp \"$1\" \"$2\"".into(),
            "sh".into(),
            "{source}".into(),
            "{output}".into(),
        ];
        std::fs::write(dir.path().join("a.c"), "int x;").unwrap();

        let mut tasks = vec![compile_unit_async(&u, dir.path()).unwrap()];
        assert_eq!(tasks[0].status(), TaskStatus::Running);
        assert!(wait_all(&mut tasks));
        assert_eq!(tasks[0].status(), TaskStatus::Succeeded);
        assert_eq!(std::fs::read_to_string(dir.path().join("a.o")).unwrap(), "int x;");
    }

    #[test]
    fn wait_all_runs_every_task_despite_failure() {
        let dir = tempfile::tempdir().unwrap();
        let units = [
            unit("fails", "exit 3"),
            unit("slow", "sleep 0.2; touch slow.o"),
            unit("ok", "touch ok.o"),
        ];
        let mut tasks: Vec<_> = units
            .iter()
            .map(|u| compile_unit_async(u, dir.path()).unwrap())
            .collect();

        assert!(!wait_all(&mut tasks));
        let statuses: Vec<_> = tasks.iter().map(BuildTask::status).collect();
        assert_eq!(
            statuses,
            [TaskStatus::Failed, TaskStatus::Succeeded, TaskStatus::Succeeded]
        );
        assert!(dir.path().join("slow.o").exists());
        assert!(dir.path().join("ok.o").exists());
    }

    #[test]
    fn wait_all_on_empty_set_succeeds() {
        assert!(wait_all(&mut []));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut u = unit("x", "");
        u.command = vec!["./definitely-not-a-compiler".into()];
        assert!(matches!(
            compile_unit_async(&u, dir.path()),
            Err(BuildError::Spawn { .. })
        ));
    }

    #[test]
    fn run_sync_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        run_sync(&[OsString::from("true")], dir.path(), "ok").unwrap();
        let err = run_sync(
            &["sh", "-c", "exit 7"].map(OsString::from),
            dir.path(),
            "link",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "'link' failed: exited with code 7");
    }
}
