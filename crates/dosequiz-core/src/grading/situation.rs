use crate::grading::outcome::SituationOutcome;
use std::collections::BTreeSet;

/// Grade a situation answer by exact set equality. There is no partial
/// credit for a subset or superset of the correct substances.
pub fn check_situation_answer(
    correct: &BTreeSet<String>,
    selected: &BTreeSet<String>,
) -> SituationOutcome {
    if correct == selected {
        SituationOutcome::Correct
    } else {
        SituationOutcome::Incorrect {
            expected: correct.clone(),
        }
    }
}
