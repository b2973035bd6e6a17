//! Data directory layout.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PERSONA_DATA_DIR";

/// Resolve the data directory.
///
/// Priority: `PERSONA_DATA_DIR`, then `~/.persona`, then `./.persona`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".persona");
    }

    PathBuf::from(".persona")
}

/// Path of the SQLite database inside a data directory.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join("persona.db")
}

/// Path of `config.toml` inside a data directory.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}
