use crate::error::QuizError;
use crate::model::{Situation, Substances};
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use std::ops::RangeInclusive;

/// Patient weights drawn for dose questions, in kilograms.
pub const PATIENT_WEIGHT_KG: RangeInclusive<u32> = 40..=160;

/// How the substance for the next dose question is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizMode {
    /// A new random substance for every question.
    Random,
    /// The same substance for every question, with a fresh weight.
    Chosen(String),
}

/// One dose question: which substance, for how heavy a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoseQuestion {
    pub drug: String,
    pub weight_kg: u32,
}

pub fn pick_random_substance<'a, R: Rng + ?Sized>(
    substances: &'a Substances,
    rng: &mut R,
) -> Result<&'a str, QuizError> {
    substances
        .keys()
        .choose(rng)
        .map(String::as_str)
        .ok_or(QuizError::EmptyCollection("substances"))
}

pub fn pick_random_situation<'a, R: Rng + ?Sized>(
    situations: &'a [Situation],
    rng: &mut R,
) -> Result<&'a Situation, QuizError> {
    situations
        .choose(rng)
        .ok_or(QuizError::EmptyCollection("situations"))
}

pub fn generate_patient_weight<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(PATIENT_WEIGHT_KG)
}

/// Draw the next dose question. The weight is regenerated every time.
pub fn draw_dose_question<R: Rng + ?Sized>(
    substances: &Substances,
    mode: &QuizMode,
    rng: &mut R,
) -> Result<DoseQuestion, QuizError> {
    let drug = match mode {
        QuizMode::Random => pick_random_substance(substances, rng)?.to_string(),
        QuizMode::Chosen(name) => {
            if substances.is_empty() {
                return Err(QuizError::EmptyCollection("substances"));
            }
            if !substances.contains_key(name) {
                return Err(QuizError::UnknownDrug(name.clone()));
            }
            name.clone()
        }
    };
    let weight_kg = generate_patient_weight(rng);
    tracing::debug!(drug = %drug, weight_kg, "drew dose question");
    Ok(DoseQuestion { drug, weight_kg })
}
