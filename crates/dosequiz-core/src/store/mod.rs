pub mod forms;

use crate::config::StoreConfig;
use crate::error::QuizError;
use crate::model::{Situations, Substances};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Whole-collection access to the two JSON files.
///
/// Every load reads the file from scratch and every save replaces it.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        Store { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Create missing files with empty collections.
    pub fn ensure_files(&self) -> Result<(), QuizError> {
        ensure_file(&self.config.substances_path, "{}")?;
        ensure_file(&self.config.situations_path, "[]")
    }

    pub fn load_substances(&self) -> Result<Substances, QuizError> {
        let path = &self.config.substances_path;
        ensure_file(path, "{}")?;
        load_json(path)
    }

    pub fn save_substances(&self, substances: &Substances) -> Result<(), QuizError> {
        save_json(&self.config.substances_path, substances)?;
        tracing::debug!(count = substances.len(), "saved substances");
        Ok(())
    }

    pub fn load_situations(&self) -> Result<Situations, QuizError> {
        let path = &self.config.situations_path;
        ensure_file(path, "[]")?;
        load_json(path)
    }

    pub fn save_situations(&self, situations: &Situations) -> Result<(), QuizError> {
        save_json(&self.config.situations_path, situations)?;
        tracing::debug!(count = situations.len(), "saved situations");
        Ok(())
    }
}

fn persistence_error(path: &Path, reason: impl ToString) -> QuizError {
    QuizError::Persistence {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn ensure_parent(path: &Path) -> Result<(), QuizError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| persistence_error(parent, e))?;
    }
    Ok(())
}

fn ensure_file(path: &Path, empty: &str) -> Result<(), QuizError> {
    if path.exists() {
        return Ok(());
    }
    ensure_parent(path)?;
    std::fs::write(path, empty).map_err(|e| persistence_error(path, e))?;
    tracing::info!(path = %path.display(), "created empty collection file");
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, QuizError> {
    let content = std::fs::read_to_string(path).map_err(|e| persistence_error(path, e))?;
    serde_json::from_str(&content).map_err(|e| persistence_error(path, e))
}

fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), QuizError> {
    let json = serde_json::to_string_pretty(value)?;
    ensure_parent(path)?;
    std::fs::write(path, json).map_err(|e| persistence_error(path, e))
}
