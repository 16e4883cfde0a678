//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build configuration compiler for the Galaxy Community Hub
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site project root (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name, relative to root. `.json` files are read as JSON
    #[arg(short = 'C', long, default_value = "hub.toml")]
    pub config: PathBuf,

    /// Override the public host name
    #[arg(long)]
    pub host: Option<String>,

    /// Override the markdown content directory
    #[arg(long = "md-dir")]
    pub md_dir: Option<String>,

    /// Override the vue content directory
    #[arg(long = "vue-dir")]
    pub vue_dir: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile the config into the build engine manifest (JSON)
    Compile {
        /// Write the manifest here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Feed cut-off date (RFC 3339 or YYYY-MM-DD); defaults to now
        #[arg(long)]
        now: Option<String>,
    },

    /// Validate and compile the config without writing anything
    Check,

    /// Run the feed filter and projector over a JSON array of content nodes
    Feed {
        /// JSON file holding an array of nodes
        nodes: PathBuf,

        /// Feed cut-off date (RFC 3339 or YYYY-MM-DD); defaults to now
        #[arg(long)]
        now: Option<String>,

        /// Override [feed.max_items]
        #[arg(long)]
        max_items: Option<usize>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Resolve the URL of each node in a JSON array through a type's template
    Urls {
        /// Node type name, e.g. `Article` or a collection name
        type_name: String,

        /// JSON file holding an array of nodes
        nodes: PathBuf,
    },
}
