//! Session command: every configured view, linked as saved

use std::path::Path;

use anyhow::{bail, Context, Result};

use treelink::application::{LinkCoordinator, TreeInstance};
use treelink::config::{self, Config};
use treelink::domain::value_objects::InstanceId;
use treelink::ui::{render_status_bar, render_tree, render_view_header};

use super::{fs_source, ignored_names, node_path, resolve_root, Output};

pub fn cmd_session(config_path: Option<&Path>, toggles: &[String], output: &Output) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            let (config, warnings) = config::load_with_warnings(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            for warning in warnings {
                tracing::warn!(
                    key = %warning.key,
                    line = ?warning.line,
                    suggestion = ?warning.suggestion,
                    "unknown configuration key"
                );
            }
            config.with_env_overrides()
        }
        None => Config::load_or_default(Some(&std::env::current_dir()?)),
    };
    if config.session.views.is_empty() {
        bail!("no views configured; add [[session.views]] entries with an id and a path");
    }

    let coordinator = LinkCoordinator::new();
    coordinator.subscribe(output.link_sink());
    let source = fs_source(&config.tree, false);
    let ignored = ignored_names(&config.tree, &[]);

    for view in &config.session.views {
        let instance = TreeInstance::new(view.id.clone(), source.clone())
            .with_ignored_names(ignored.clone());
        instance.subscribe(output.tree_sink());
        instance.load(&resolve_root(&view.path), None);
        coordinator.register(view.id.clone(), instance);
    }
    coordinator.load_groups(config.session.groups.clone())?;

    for toggle in toggles {
        let Some((view, node)) = toggle.split_once('=') else {
            bail!("invalid --toggle '{toggle}', expected VIEW=NODE");
        };
        let instance = coordinator.instance(&InstanceId::from(view))?;
        let Some(root) = instance.path() else {
            bail!("view '{view}' has no tree loaded");
        };
        instance
            .toggle(&node_path(&root, node))
            .with_context(|| format!("cannot toggle '{node}' in view '{view}'"))?;
    }

    let mut blocks = Vec::new();
    for view in &config.session.views {
        let instance = coordinator.instance(&view.id)?;
        let leader = coordinator.leader_of(&view.id);
        let roots = instance.roots();
        let roots = roots.borrow();

        if output.is_json() {
            output.emit(serde_json::json!({
                "event": "data",
                "command": "session",
                "view": view.id,
                "path": instance.path().map(|p| p.display().to_string()),
                "leader": leader,
                "peers": coordinator.linked_peers(&view.id),
                "selected_nodes": roots.selected_node_count(),
                "total_nodes": roots.node_count(),
            }))?;
            continue;
        }

        blocks.push(format!(
            "{}\n{}\n\n{}",
            render_view_header(
                &view.id,
                instance.path().as_deref(),
                leader.as_ref(),
                output.unicode()
            ),
            render_tree(&roots, output.unicode()),
            render_status_bar(
                roots.selected_node_count(),
                roots.node_count(),
                output.unicode()
            ),
        ));
    }

    if !blocks.is_empty() {
        println!("{}", blocks.join("\n\n"));
    }
    Ok(())
}
