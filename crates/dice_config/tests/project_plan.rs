//! The plan shipped at the workspace root must stay valid.

use std::path::Path;

use dice_config::{find_project_root, load_plan};

#[test]
fn workspace_plan_loads() {
    let crate_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let root = find_project_root(crate_dir).unwrap();
    let plan = load_plan(&root).unwrap();

    assert_eq!(plan.project.name, "dice");
    let assets = plan.assets.as_ref().unwrap();
    assert!(root.join(&assets.dir).join("dots_1.txt").is_file());
    let bundle = plan.bundle.as_ref().unwrap();
    let link_outputs: Vec<_> = plan
        .targets
        .iter()
        .filter_map(|t| t.link.as_ref())
        .map(|l| l.output.clone())
        .collect();
    assert!(link_outputs.contains(&bundle.executable));
}
