use std::path::{Path, PathBuf};

/// Environment variable overriding the default data directory.
pub const DATA_DIR_ENV: &str = "DOSEQUIZ_DATA_DIR";

pub const SUBSTANCES_FILE: &str = "drugs.json";
pub const SITUATIONS_FILE: &str = "situations.json";

/// Locations of the two collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub substances_path: PathBuf,
    pub situations_path: PathBuf,
}

impl StoreConfig {
    /// Both collections inside `dir`, under their standard file names.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        StoreConfig {
            substances_path: dir.join(SUBSTANCES_FILE),
            situations_path: dir.join(SITUATIONS_FILE),
        }
    }

    /// `$DOSEQUIZ_DATA_DIR` if set, otherwise `$HOME/Library/DrugsQuiz`.
    pub fn default_data_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        home.join("Library").join("DrugsQuiz")
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::from_data_dir(StoreConfig::default_data_dir())
    }
}
