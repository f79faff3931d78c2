//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose record tree load/delete to Dart via FRB.
//! - Mirror the `{success, data, error}` envelope the table UI consumes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Load/delete cycles against the shared data file never overlap.
//! - `data_json` always carries addressed records (`__path` populated).

use log::warn;
use recordtree_core::config::ENV_DATA_PATH;
use recordtree_core::db::open_db;
use recordtree_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, JsonFileTreeStore,
    RecordTreeService, SqliteTreeStore, StoreBackend, Tree, TreeConfig, TreeServiceError,
    TreeStore,
};
use std::sync::{Mutex, OnceLock};

const FFI_DATA_FILE: &str = "recordtree-data.json";

static TREE_CONFIG: OnceLock<TreeConfig> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    "pong".to_string()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Envelope returned by tree load/delete calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Addressed tree as a JSON array; `"[]"` on failure.
    pub data_json: String,
    /// Error message when `success` is false.
    pub error: Option<String>,
}

impl TreeResponse {
    fn ok(records: &Tree) -> Self {
        match serde_json::to_string(records) {
            Ok(data_json) => Self {
                success: true,
                data_json,
                error: None,
            },
            Err(err) => Self::failure(format!("failed to encode records: {err}")),
        }
    }

    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data_json: "[]".to_string(),
            error: Some(error.into()),
        }
    }
}

/// Loads the addressed record tree.
///
/// # FFI contract
/// - Sync call, storage-backed execution.
/// - Unreadable storage reads as an empty tree, still `success = true`.
#[flutter_rust_bridge::frb(sync)]
pub fn tree_load() -> TreeResponse {
    load_with(resolve_config())
}

/// Deletes the record addressed by wire segments, with its subtree.
///
/// # FFI contract
/// - Sync call, storage-backed execution.
/// - Empty `address` fails with "address is required" and writes nothing.
/// - Unknown address succeeds and returns the unchanged tree.
/// - Save failures return `success = false`; no tree is returned.
#[flutter_rust_bridge::frb(sync)]
pub fn tree_delete(address: Vec<String>) -> TreeResponse {
    delete_with(resolve_config(), &address)
}

fn load_with(config: &TreeConfig) -> TreeResponse {
    match with_service(config, |service| Ok(service.load_tree())) {
        Ok(records) => TreeResponse::ok(&records),
        Err(err) => TreeResponse::failure(err),
    }
}

fn delete_with(config: &TreeConfig, address: &[String]) -> TreeResponse {
    if address.is_empty() {
        return TreeResponse::failure(TreeServiceError::AddressRequired.to_string());
    }
    match with_service(config, |service| {
        service
            .delete_by_wire(address)
            .map(|outcome| outcome.records)
    }) {
        Ok(records) => TreeResponse::ok(&records),
        Err(err) => TreeResponse::failure(err),
    }
}

fn resolve_config() -> &'static TreeConfig {
    TREE_CONFIG.get_or_init(|| config_from_lookup(|key| std::env::var(key).ok()))
}

/// Env-derived config, defaulting the data file into the temp dir.
///
/// A blank `RECORDTREE_DATA_PATH` counts as unset.
fn config_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TreeConfig {
    let data_path_set = lookup(ENV_DATA_PATH).is_some_and(|raw| !raw.trim().is_empty());
    let config = TreeConfig::from_lookup(lookup);
    if data_path_set {
        return config;
    }
    TreeConfig {
        data_path: std::env::temp_dir().join(FFI_DATA_FILE),
        ..config
    }
}

fn with_service<T>(
    config: &TreeConfig,
    f: impl FnOnce(&mut RecordTreeService<&dyn TreeStore>) -> Result<T, TreeServiceError>,
) -> Result<T, String> {
    let _guard = STORE_LOCK.lock().unwrap_or_else(|poisoned| {
        warn!("event=ffi_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    });

    match config.backend {
        StoreBackend::JsonFile => {
            let store = JsonFileTreeStore::new(&config.data_path);
            run(&store, f)
        }
        StoreBackend::Sqlite => {
            let conn =
                open_db(&config.data_path).map_err(|err| format!("tree DB open failed: {err}"))?;
            let store = SqliteTreeStore::try_new(&conn, config.document.as_str())
                .map_err(|err| format!("tree store init failed: {err}"))?;
            run(&store, f)
        }
    }
}

fn run<T>(
    store: &dyn TreeStore,
    f: impl FnOnce(&mut RecordTreeService<&dyn TreeStore>) -> Result<T, TreeServiceError>,
) -> Result<T, String> {
    let mut service = RecordTreeService::new(store);
    f(&mut service).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{
        config_from_lookup, core_version, delete_with, init_logging, load_with, ping,
        tree_delete, FFI_DATA_FILE,
    };
    use recordtree_core::config::ENV_DATA_PATH;
    use recordtree_core::{StoreBackend, TreeConfig};
    use serde_json::{json, Value};
    use std::path::PathBuf;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn init_logging_rejects_relative_dir() {
        let error = init_logging("info".to_string(), "tmp/logs".to_string());
        assert!(error.contains("absolute"));
    }

    #[test]
    fn tree_delete_requires_address() {
        let response = tree_delete(Vec::new());
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("address is required"));
        assert_eq!(response.data_json, "[]");
    }

    #[test]
    fn tree_delete_rejects_blank_segment() {
        let response = tree_delete(vec!["0".to_string(), String::new()]);
        assert!(!response.success);
        assert!(response.error.unwrap().starts_with("invalid address"));
    }

    #[test]
    fn blank_data_path_falls_back_to_temp_dir() {
        for raw in [None, Some("   ")] {
            let config = config_from_lookup(|key| {
                if key == ENV_DATA_PATH {
                    raw.map(str::to_string)
                } else {
                    None
                }
            });
            assert_eq!(config.data_path, std::env::temp_dir().join(FFI_DATA_FILE));
            assert_eq!(config.backend, StoreBackend::JsonFile);
        }

        let config = config_from_lookup(|key| {
            (key == ENV_DATA_PATH).then(|| "/srv/tree.sqlite".to_string())
        });
        assert_eq!(config.data_path, PathBuf::from("/srv/tree.sqlite"));
        assert_eq!(config.backend, StoreBackend::Sqlite);
    }

    #[test]
    fn tree_load_then_delete_round_trips_through_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = TreeConfig::for_data_path(dir.path().join("records.json"));
        std::fs::write(
            &config.data_path,
            r#"[{"data": {"ID": "a"}}, {"data": {"ID": "b"}, "children": {"x": {"records": [{"data": {"ID": "c"}}]}}}]"#,
        )
        .unwrap();

        let loaded = load_with(&config);
        assert!(loaded.success);
        let loaded: Value = serde_json::from_str(&loaded.data_json).unwrap();
        assert_eq!(loaded[1]["children"]["x"]["records"][0]["__path"], json!(["1", "x", "0"]));

        let deleted = delete_with(&config, &["1".to_string()]);
        assert!(deleted.success, "{:?}", deleted.error);
        let deleted: Value = serde_json::from_str(&deleted.data_json).unwrap();
        assert_eq!(deleted, json!([{"data": {"ID": "a"}, "__path": ["0"]}]));
    }
}
