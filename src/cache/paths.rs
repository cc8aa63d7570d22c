// Cache path utilities.
// Resolves where the project store lives when no explicit path is configured.

use std::path::PathBuf;

use directories::ProjectDirs;

const STORE_FILE: &str = "projects.json";

/// Get the base data directory (~/.local/share/porto-sync on Linux).
pub fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "porto-sync").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Default path of the project store.
pub fn default_store_path() -> PathBuf {
    data_dir()
        .unwrap_or_else(|| PathBuf::from("data"))
        .join(STORE_FILE)
}
