use dosequiz_core::error::QuizError;
use dosequiz_core::{check_answer, grade_situation, Store};

pub fn dose(
    store: &Store,
    drug: &str,
    weight_kg: u32,
    dose: &str,
    unit: &str,
) -> Result<(), QuizError> {
    let substances = store.load_substances()?;
    let outcome = check_answer(&substances, drug, weight_kg, dose, unit)?;
    println!("{outcome}");
    Ok(())
}

pub fn situation(store: &Store, index: usize, answer: &str) -> Result<(), QuizError> {
    let situations = store.load_situations()?;
    if situations.is_empty() {
        return Err(QuizError::EmptyCollection("situations"));
    }
    let situation = index
        .checked_sub(1)
        .and_then(|i| situations.get(i))
        .ok_or(QuizError::UnknownSituation {
            index,
            count: situations.len(),
        })?;

    let choices: Vec<String> = store.load_substances()?.into_keys().collect();
    let selections: Vec<String> = answer.split(',').map(str::to_string).collect();
    println!("{}", grade_situation(situation, &choices, &selections));
    Ok(())
}
