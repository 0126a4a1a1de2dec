//! Single-tree commands: show, state, selected

use anyhow::{Context, Result};

use treelink::application::TreeInstance;
use treelink::config::Config;
use treelink::domain::value_objects::SelectionState;
use treelink::ui::{render_status_bar, render_tree};

use super::{fs_source, ignored_names, node_path, read_overlay, resolve_root, Output};
use crate::cli::TreeArgs;

/// Build the tree for `args` and apply the requested edits.
fn open(args: &TreeArgs, output: &Output) -> Result<TreeInstance> {
    let project_root = std::env::current_dir()?;
    let config = Config::load_or_default(Some(&project_root));
    let root = resolve_root(&args.path);

    let instance = TreeInstance::new("main", fs_source(&config.tree, args.no_files))
        .with_ignored_names(ignored_names(&config.tree, &args.ignore));
    instance.subscribe(output.tree_sink());

    let overlay = args.overlay.as_deref().map(read_overlay).transpose()?;
    instance.load(&root, overlay.as_ref());

    for node in &args.deselect {
        instance
            .set_selected(&node_path(&root, node), SelectionState::Unselected)
            .with_context(|| format!("cannot deselect '{node}'"))?;
    }
    for node in &args.collapse {
        instance
            .set_expanded(&node_path(&root, node), false, false)
            .with_context(|| format!("cannot collapse '{node}'"))?;
    }
    Ok(instance)
}

pub fn cmd_show(args: &TreeArgs, output: &Output) -> Result<()> {
    let instance = open(args, output)?;
    let roots = instance.roots();
    let roots = roots.borrow();

    if output.is_json() {
        return output.emit(serde_json::json!({
            "event": "data",
            "command": "show",
            "path": instance.path().map(|p| p.display().to_string()),
            "selected_nodes": roots.selected_node_count(),
            "total_nodes": roots.node_count(),
        }));
    }

    println!("{}", render_tree(&roots, output.unicode()));
    println!();
    println!(
        "{}",
        render_status_bar(
            roots.selected_node_count(),
            roots.node_count(),
            output.unicode()
        )
    );
    Ok(())
}

pub fn cmd_state(args: &TreeArgs, output: &Output) -> Result<()> {
    let instance = open(args, output)?;
    let overlay = instance.extract_state();

    if output.is_json() {
        return output.emit(serde_json::json!({
            "event": "data",
            "command": "state",
            "overlay": overlay,
        }));
    }

    println!("{}", overlay.to_json()?);
    Ok(())
}

pub fn cmd_selected(args: &TreeArgs, output: &Output) -> Result<()> {
    let instance = open(args, output)?;
    let paths = instance.selected_paths();

    if output.is_json() {
        return output.emit(serde_json::json!({
            "event": "data",
            "command": "selected",
            "paths": paths,
        }));
    }

    for path in paths {
        println!("{path}");
    }
    Ok(())
}
