//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueHint};
use recordtree_core::TreeConfig;
use std::path::PathBuf;

/// Inspect and prune hierarchical record trees by positional address
#[derive(Parser, Debug)]
#[command(name = "recordtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data file; `.sqlite`, `.sqlite3` and `.db` select the SQLite store
    #[arg(long, global = true, env = "RECORDTREE_DATA_PATH", value_hint = ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// Document name inside a SQLite store
    #[arg(long, global = true, env = "RECORDTREE_DOCUMENT")]
    pub document: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "RECORDTREE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "RECORDTREE_LOG_DIR", value_hint = ValueHint::DirPath)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the addressed tree, or one record and its subtree
    Show {
        /// Dot-joined address of the record to print
        address: Option<String>,

        /// Emit addressed JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Delete one record and its subtree, then print the re-addressed tree
    Delete {
        /// Dot-joined address, e.g. `1.children.0`
        address: Option<String>,

        /// Emit addressed JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Resolves store and logging settings from flags (and their env fallbacks).
    pub fn config(&self) -> TreeConfig {
        let mut config = match &self.data {
            Some(path) => TreeConfig::for_data_path(path),
            None => TreeConfig::default(),
        };
        if let Some(document) = &self.document {
            config.document = document.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config.log_dir = self.log_dir.clone();
        config
    }
}
