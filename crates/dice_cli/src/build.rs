//! `dice build`: runs the build plan and reports what changed.

use dice_build::Builder;

use crate::project::{load_plan, status};
use crate::GlobalArgs;

/// Runs the `dice build` command. Returns 0 on success, 1 if a step failed.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (root, plan) = load_plan(global)?;

    status(
        global,
        "Building",
        format_args!("{} ({} targets)", plan.project.name, plan.targets.len()),
    );

    let report = match Builder::new(&root).run(&plan) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(1);
        }
    };

    for unit in &report.compiled {
        status(global, "Compiled", unit);
    }
    for target in &report.linked {
        status(global, "Linked", target);
    }
    if report.package_rebuilt {
        if let Some(assets) = &plan.assets {
            status(global, "Packed", assets.package.display());
        }
    }
    if let (Some(bytes), Some(bundle)) = (report.bundled_bytes, &plan.bundle) {
        status(
            global,
            "Bundled",
            format_args!("{bytes} bytes into {}", bundle.executable.display()),
        );
    }

    if report.is_up_to_date() {
        status(global, "Finished", format_args!("{} is up to date", plan.project.name));
    } else {
        status(global, "Finished", &plan.project.name);
    }
    Ok(0)
}
