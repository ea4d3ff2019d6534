//! Command templates and input expansion.
//!
//! Commands in `dice.toml` are argument vectors with placeholders:
//!
//! | Placeholder | Expands to                                 | Position       |
//! |-------------|--------------------------------------------|----------------|
//! | `{source}`  | the unit's source                          | anywhere       |
//! | `{output}`  | the step's output                          | anywhere       |
//! | `{objects}` | every unit output of the target            | whole argument |
//! | `{inputs}`  | unit outputs, then the link's extra inputs | whole argument |

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::BuildError;

/// Values available to a command template.
#[derive(Debug, Default)]
pub struct Placeholders<'a> {
    /// Value of `{source}`; only compile units have one.
    pub source: Option<&'a Path>,
    /// Value of `{output}`.
    pub output: Option<&'a Path>,
    /// Value of `{objects}`; only link steps have it.
    pub objects: Option<&'a [PathBuf]>,
    /// Value of `{inputs}`; only link steps have it.
    pub inputs: Option<&'a [PathBuf]>,
}

/// Substitutes placeholders in `template` and returns the program and
/// its arguments.
///
/// `step` names the unit or link in errors.
pub fn expand_command(
    template: &[String],
    vars: &Placeholders<'_>,
    step: &str,
) -> Result<Vec<OsString>, BuildError> {
    let invalid = |arg: &str| BuildError::Placeholder {
        step: step.to_string(),
        arg: arg.to_string(),
    };

    let mut out = Vec::with_capacity(template.len());
    for arg in template {
        match arg.as_str() {
            "{objects}" => {
                let objects = vars.objects.ok_or_else(|| invalid(arg))?;
                out.extend(objects.iter().map(|p| p.as_os_str().to_owned()));
            }
            "{inputs}" => {
                let inputs = vars.inputs.ok_or_else(|| invalid(arg))?;
                out.extend(inputs.iter().map(|p| p.as_os_str().to_owned()));
            }
            "{source}" => out.push(vars.source.ok_or_else(|| invalid(arg))?.into()),
            "{output}" => out.push(vars.output.ok_or_else(|| invalid(arg))?.into()),
            _ => out.push(substitute(arg, vars).ok_or_else(|| invalid(arg))?.into()),
        }
    }
    Ok(out)
}

/// Replaces `{source}` and `{output}` embedded inside a larger argument.
/// List placeholders cannot be embedded.
fn substitute(arg: &str, vars: &Placeholders<'_>) -> Option<String> {
    if arg.contains("{objects}") || arg.contains("{inputs}") {
        return None;
    }
    let mut s = arg.to_string();
    for (key, value) in [("{source}", vars.source), ("{output}", vars.output)] {
        if s.contains(key) {
            s = s.replace(key, &value?.to_string_lossy());
        }
    }
    Some(s)
}

/// Resolves `paths` against `root`, replacing each directory with every
/// regular file below it (recursive, sorted by name).
///
/// Paths that do not exist are kept as-is so the staleness check can treat
/// them as missing.
pub fn expand_inputs<P: AsRef<Path>>(root: &Path, paths: &[P]) -> Result<Vec<PathBuf>, BuildError> {
    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let path = root.join(path);
        if !path.is_dir() {
            out.push(path);
            continue;
        }
        for entry in WalkDir::new(&path).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let at = e.path().unwrap_or(&path).to_path_buf();
                BuildError::io(at, e.into())
            })?;
            if entry.file_type().is_file() {
                out.push(entry.into_path());
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn os(v: &[&str]) -> Vec<OsString> {
        v.iter().map(OsString::from).collect()
    }

    #[test]
    fn unit_placeholders() {
        let vars = Placeholders {
            source: Some(Path::new("src/rcore.c")),
            output: Some(Path::new("build/rcore.o")),
            ..Default::default()
        };
        let cmd = expand_command(
            &args(&["cc", "-c", "-o", "{output}", "{source}", "-MF{output}.d"]),
            &vars,
            "rcore",
        )
        .unwrap();
        assert_eq!(
            cmd,
            os(&["cc", "-c", "-o", "build/rcore.o", "src/rcore.c", "-MFbuild/rcore.o.d"])
        );
    }

    #[test]
    fn link_placeholders_expand_to_many() {
        let objects = vec![PathBuf::from("a.o"), PathBuf::from("b.o")];
        let inputs = vec![
            PathBuf::from("a.o"),
            PathBuf::from("b.o"),
            PathBuf::from("lib.a"),
        ];
        let vars = Placeholders {
            output: Some(Path::new("out")),
            objects: Some(&objects),
            inputs: Some(&inputs),
            ..Default::default()
        };
        let cmd = expand_command(&args(&["ar", "-rcs", "{output}", "{objects}"]), &vars, "link")
            .unwrap();
        assert_eq!(cmd, os(&["ar", "-rcs", "out", "a.o", "b.o"]));

        let cmd = expand_command(&args(&["cc", "{inputs}", "-lm"]), &vars, "link").unwrap();
        assert_eq!(cmd, os(&["cc", "a.o", "b.o", "lib.a", "-lm"]));
    }

    #[test]
    fn empty_list_placeholder_vanishes() {
        let vars = Placeholders {
            output: Some(Path::new("out")),
            objects: Some(&[]),
            ..Default::default()
        };
        let cmd = expand_command(&args(&["ar", "{output}", "{objects}"]), &vars, "link").unwrap();
        assert_eq!(cmd, os(&["ar", "out"]));
    }

    #[test]
    fn source_in_link_step_is_rejected() {
        let vars = Placeholders {
            output: Some(Path::new("out")),
            ..Default::default()
        };
        let err = expand_command(&args(&["cc", "{source}"]), &vars, "link").unwrap_err();
        assert!(matches!(err, BuildError::Placeholder { .. }));
    }

    #[test]
    fn embedded_list_placeholder_is_rejected() {
        let objects = vec![PathBuf::from("a.o")];
        let vars = Placeholders {
            objects: Some(&objects),
            ..Default::default()
        };
        let err = expand_command(&args(&["--objs={objects}"]), &vars, "link").unwrap_err();
        assert!(matches!(err, BuildError::Placeholder { .. }));
    }

    #[test]
    fn other_braces_pass_through() {
        let cmd = expand_command(
            &args(&["sh", "-c", "echo ${HOME}"]),
            &Placeholders::default(),
            "x",
        )
        .unwrap();
        assert_eq!(cmd, os(&["sh", "-c", "echo ${HOME}"]));
    }

    #[test]
    fn directories_expand_recursively_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(src.join("ui")).unwrap();
        std::fs::write(src.join("main.c"), "").unwrap();
        std::fs::write(src.join("ui").join("panel.c"), "").unwrap();
        std::fs::write(dir.path().join("lib.a"), "").unwrap();

        let inputs = expand_inputs(dir.path(), &["src", "lib.a", "missing.h"]).unwrap();
        assert_eq!(
            inputs,
            vec![
                src.join("main.c"),
                src.join("ui").join("panel.c"),
                dir.path().join("lib.a"),
                dir.path().join("missing.h"),
            ]
        );
    }
}
