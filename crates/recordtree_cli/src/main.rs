//! `recordtree` command-line entry point.
//!
//! # Responsibility
//! - Wire flags/env config to a tree store and the record tree service.
//! - Print addressed trees as text or JSON; report failures on stderr.

mod args;
mod output;

use args::{Cli, Commands};
use clap::Parser;
use log::info;
use recordtree_core::db::open_db;
use recordtree_core::{
    find, init_logging, Address, JsonFileTreeStore, Record, RecordTreeService, SqliteTreeStore,
    StoreBackend, TreeConfig, TreeStore,
};
use std::slice;

fn main() {
    let cli = Cli::parse();
    let config = cli.config();

    if let Some(log_dir) = config.log_dir.as_ref() {
        if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match execute(&cli.command, &config) {
        Ok(body) => print!("{body}"),
        Err(message) => {
            eprintln!("Error: {message}");
            std::process::exit(1);
        }
    }
}

fn execute(command: &Commands, config: &TreeConfig) -> Result<String, String> {
    info!(
        "event=cli_start module=cli status=start backend={:?} data_path={}",
        config.backend,
        config.data_path.display()
    );
    match config.backend {
        StoreBackend::JsonFile => run(command, JsonFileTreeStore::new(&config.data_path)),
        StoreBackend::Sqlite => {
            let conn =
                open_db(&config.data_path).map_err(|err| format!("tree DB open failed: {err}"))?;
            let store = SqliteTreeStore::try_new(&conn, config.document.as_str())
                .map_err(|err| format!("tree store init failed: {err}"))?;
            run(command, store)
        }
    }
}

/// Runs one command and returns the text destined for stdout.
fn run<S: TreeStore>(command: &Commands, store: S) -> Result<String, String> {
    let mut service = RecordTreeService::new(store);
    match command {
        Commands::Show { address, json } => {
            let tree = service.load_tree();
            match address.as_deref() {
                None => format_tree(&tree, *json),
                Some(raw) => {
                    let target =
                        Address::parse(raw).map_err(|err| format!("invalid address: {err}"))?;
                    let record = find(&tree, &target)
                        .ok_or_else(|| format!("no record at address {target}"))?;
                    format_tree(slice::from_ref(record), *json)
                }
            }
        }
        Commands::Delete { address, json } => {
            let outcome = service
                .delete_by_canonical(address.as_deref().unwrap_or_default())
                .map_err(|err| err.to_string())?;
            if outcome.removed == 0 {
                eprintln!("no record at that address; nothing deleted");
            } else {
                eprintln!("deleted {} record(s)", outcome.removed);
            }
            format_tree(&outcome.records, *json)
        }
    }
}

fn format_tree(records: &[Record], json: bool) -> Result<String, String> {
    if json {
        let body = serde_json::to_string_pretty(records)
            .map_err(|err| format!("failed to encode records: {err}"))?;
        Ok(format!("{body}\n"))
    } else {
        Ok(output::render_tree(records))
    }
}
