use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("invalid number '{0}'. Use digits with '.' or ',' as decimal separator")]
    InvalidNumber(String),

    #[error("unknown unit '{unit}'. Available: {available}")]
    InvalidUnit { unit: String, available: String },

    #[error("substance '{0}' is not registered")]
    UnknownDrug(String),

    #[error("dose range of '{drug}' is too large to scale to {weight_kg} kg")]
    DoseOverflow { drug: String, weight_kg: u32 },

    #[error("no situation at position {index}, {count} registered")]
    UnknownSituation { index: usize, count: usize },

    #[error("no {0} registered. Please register some {0} first.")]
    EmptyCollection(&'static str),

    #[error("failed to access {path}: {reason}")]
    Persistence { path: PathBuf, reason: String },

    #[error("invalid form line {line}: {reason}")]
    InvalidForm { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuizError {
    /// True for errors caused by what the user typed, which a quiz session
    /// reports and then asks again for.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            QuizError::InvalidNumber(_) | QuizError::InvalidUnit { .. }
        )
    }
}
