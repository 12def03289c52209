pub mod config;
pub mod error;
pub mod grading;
pub mod model;
pub mod parsing;
pub mod quiz;
pub mod store;

pub use config::StoreConfig;
pub use error::QuizError;
pub use grading::{check_answer, check_situation_answer, DoseOutcome, SituationOutcome};
pub use model::{Situation, Situations, Substance, Substances, Unit};
pub use quiz::{
    draw_dose_question, generate_patient_weight, pick_random_situation, pick_random_substance,
    DoseQuestion, QuizMode,
};
pub use store::Store;

use std::collections::BTreeSet;

/// Grade a dose answer against the substances currently on disk.
///
/// Reads the collection fresh, so edits saved since the question was drawn
/// are taken into account.
pub fn grade_dose(
    store: &Store,
    question: &DoseQuestion,
    dose: &str,
    unit: &str,
) -> Result<DoseOutcome, QuizError> {
    let substances = store.load_substances()?;
    check_answer(&substances, &question.drug, question.weight_kg, dose, unit)
}

/// Grade a situation answer given as free-form selections.
///
/// Each selection is either a substance name or a 1-based position in
/// `choices`. Unrecognized selections are kept verbatim so they count as
/// wrong picks.
pub fn grade_situation(
    situation: &Situation,
    choices: &[String],
    selections: &[String],
) -> SituationOutcome {
    let selected: BTreeSet<String> = selections
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(n) if (1..=choices.len()).contains(&n) => choices[n - 1].clone(),
            _ => s.to_string(),
        })
        .collect();
    check_situation_answer(situation.drug_names(), &selected)
}
