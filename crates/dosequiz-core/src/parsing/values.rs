use crate::error::QuizError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a dose typed by the user or read from storage.
///
/// Handles formats like:
/// - "68" -> 68
/// - "37.5" -> 37.5
/// - "37,5" -> 37.5 (decimal comma)
/// - "1e-3" -> 0.001
pub fn parse_decimal(s: &str) -> Result<Decimal, QuizError> {
    let s = s.trim();
    let normalized = s.replace(',', ".");
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|_| QuizError::InvalidNumber(s.to_string()))
}
