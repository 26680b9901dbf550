use std::path::PathBuf;

/// Tool configuration, loaded from environment variables.
pub struct Config {
    /// Directory of labeled sample images.
    pub faces_dir: PathBuf,
    /// Path to the authoritative row store.
    pub row_store: PathBuf,
    /// Path to the best-effort table mirror.
    pub table_store: PathBuf,
}

impl Config {
    /// Load configuration from `ROLLCALL_*` environment variables with
    /// defaults matching the stock layout.
    pub fn from_env() -> Self {
        Self {
            faces_dir: env_path("ROLLCALL_FACES_DIR", "known_faces"),
            row_store: env_path("ROLLCALL_ROW_STORE", "attendance.csv"),
            table_store: env_path("ROLLCALL_TABLE_STORE", "attendance.json"),
        }
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
