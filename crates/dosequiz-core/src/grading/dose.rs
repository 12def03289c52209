use crate::error::QuizError;
use crate::grading::outcome::DoseOutcome;
use crate::model::{Substances, Unit};
use crate::parsing::parse_decimal;
use rust_decimal::Decimal;

/// Grade a dose answer for `drug` given the patient's weight.
///
/// The dose text is parsed first, then the substance is looked up, then
/// the unit text is parsed. The expected unit is the substance's unit with
/// any per-kilogram suffix removed. Bounds are multiplied by the weight
/// unless the *entered* unit is a rate unit, so a wrong unit can also move
/// the range the dose is compared against.
///
/// The unit text must be one of the labels in [`Unit::ALL`] (`ug` is taken
/// for `µg`); anything else is [`QuizError::InvalidUnit`], which quiz
/// sessions report before asking again. Bounds whose scaled value does not
/// fit a `Decimal` give [`QuizError::DoseOverflow`].
pub fn check_answer(
    substances: &Substances,
    drug: &str,
    weight_kg: u32,
    dose: &str,
    unit: &str,
) -> Result<DoseOutcome, QuizError> {
    let dose = parse_decimal(dose)?;

    let substance = substances
        .get(drug)
        .ok_or_else(|| QuizError::UnknownDrug(drug.to_string()))?;

    let entered_unit: Unit = unit.parse()?;
    let expected_unit = substance.unit.normalized();

    let (mut min_dose, mut max_dose) = (substance.min_dose, substance.max_dose);
    if !entered_unit.is_rate() {
        let weight = Decimal::from(weight_kg);
        let overflow = || QuizError::DoseOverflow {
            drug: drug.to_string(),
            weight_kg,
        };
        min_dose = min_dose.checked_mul(weight).ok_or_else(overflow)?;
        max_dose = max_dose.checked_mul(weight).ok_or_else(overflow)?;
    }

    let outcome = DoseOutcome {
        drug: drug.to_string(),
        expected_unit,
        unit_correct: entered_unit == expected_unit,
        min_dose,
        max_dose,
        dose_correct: min_dose <= dose && dose <= max_dose,
    };

    tracing::debug!(
        drug,
        weight_kg,
        %dose,
        unit = entered_unit.label(),
        unit_correct = outcome.unit_correct,
        dose_correct = outcome.dose_correct,
        "graded dose answer"
    );

    Ok(outcome)
}
