use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// treelink - tri-state folder tree selection with linked views
#[derive(Parser, Debug)]
#[command(name = "treelink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events and results on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Force ASCII icons
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a folder tree with its selection state
    Show(TreeArgs),

    /// Print the sparse selection/expansion overlay as JSON
    State(TreeArgs),

    /// Print the topmost fully selected paths
    Selected(TreeArgs),

    /// Open the views saved in the configuration, with their links
    Session {
        /// Configuration file (defaults to the usual lookup)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Toggle a node in one view (VIEW=NODE, NODE relative to the view root)
        #[arg(long, value_name = "VIEW=NODE")]
        toggle: Vec<String>,
    },
}

/// Options shared by the single-tree commands
#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// Root directory of the tree
    pub path: PathBuf,

    /// Deselect a node (relative to the root, repeatable)
    #[arg(long, value_name = "NODE")]
    pub deselect: Vec<String>,

    /// Collapse a node (relative to the root, repeatable)
    #[arg(long, value_name = "NODE")]
    pub collapse: Vec<String>,

    /// Apply a saved overlay (JSON) after building the tree
    #[arg(long, value_name = "FILE")]
    pub overlay: Option<PathBuf>,

    /// Extra directory name to skip (repeatable)
    #[arg(long, value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Directories only
    #[arg(long)]
    pub no_files: bool,
}
