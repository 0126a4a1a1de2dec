//! treelink CLI
//!
//! Usage: treelink <COMMAND>
//!
//! Commands:
//!   show      Render a folder tree with its selection state
//!   state     Print the selection overlay as JSON
//!   selected  Print the topmost fully selected paths
//!   session   Open the configured views and their links

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = commands::Output::new(cli.json, cli.ascii);
    match cli.command {
        Commands::Show(args) => commands::tree::cmd_show(&args, &output),
        Commands::State(args) => commands::tree::cmd_state(&args, &output),
        Commands::Selected(args) => commands::tree::cmd_selected(&args, &output),
        Commands::Session { config, toggle } => {
            commands::session::cmd_session(config.as_deref(), &toggle, &output)
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("treelink={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
