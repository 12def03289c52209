use crate::model::Unit;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::fmt;

/// Result of grading one dose answer.
///
/// `Display` renders the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoseOutcome {
    /// Substance that was asked about.
    pub drug: String,
    /// Unit the answer was expected in.
    pub expected_unit: Unit,
    /// Whether the entered unit matched `expected_unit`.
    pub unit_correct: bool,
    /// Lower bound the dose was compared against (after weight scaling).
    pub min_dose: Decimal,
    /// Upper bound the dose was compared against (after weight scaling).
    pub max_dose: Decimal,
    /// Whether the entered dose fell inside `min_dose..=max_dose`.
    pub dose_correct: bool,
}

impl DoseOutcome {
    pub fn is_correct(&self) -> bool {
        self.unit_correct && self.dose_correct
    }
}

impl fmt::Display for DoseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.unit_correct {
            writeln!(f, "Wrong unit. The correct unit is {}", self.expected_unit)?;
        }
        if self.dose_correct {
            write!(f, "Correct dose!")
        } else {
            write!(
                f,
                "Wrong dose. Correct answer is between {} and {}",
                self.min_dose.normalize(),
                self.max_dose.normalize()
            )
        }
    }
}

/// Result of grading one situation answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SituationOutcome {
    Correct,
    Incorrect { expected: BTreeSet<String> },
}

impl SituationOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, SituationOutcome::Correct)
    }
}

impl fmt::Display for SituationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SituationOutcome::Correct => write!(f, "Correct!"),
            SituationOutcome::Incorrect { expected } => {
                let names: Vec<&str> = expected.iter().map(String::as_str).collect();
                write!(f, "Incorrect.\nCorrect answer is:\n\n{}", names.join("\n"))
            }
        }
    }
}
