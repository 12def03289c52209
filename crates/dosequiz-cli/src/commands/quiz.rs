use dosequiz_core::error::QuizError;
use dosequiz_core::{
    draw_dose_question, grade_dose, grade_situation, pick_random_situation, QuizMode, Store, Unit,
};
use rand::Rng;
use std::io::{BufRead, Write};

const NO_SUBSTANCES: &str = "No substances registered. Please register some substances first.";
const NO_SITUATIONS: &str = "No situations registered. Please register some situations first.";

/// Print `text` and read one trimmed line. `None` once input is exhausted.
fn prompt<I: BufRead, O: Write>(
    input: &mut I,
    out: &mut O,
    text: &str,
) -> Result<Option<String>, QuizError> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask whether to continue. Anything but "n"/"q" (or end of input) goes on.
fn next_question<I: BufRead, O: Write>(input: &mut I, out: &mut O) -> Result<bool, QuizError> {
    Ok(match prompt(input, out, "Next question? [Y/n] ")? {
        None => false,
        Some(a) => !(a.eq_ignore_ascii_case("n") || a.eq_ignore_ascii_case("q")),
    })
}

pub fn dose<I: BufRead, O: Write, R: Rng + ?Sized>(
    store: &Store,
    drug: Option<String>,
    count: Option<usize>,
    input: &mut I,
    out: &mut O,
    rng: &mut R,
) -> Result<(), QuizError> {
    let mode = match drug {
        Some(name) => QuizMode::Chosen(name),
        None => QuizMode::Random,
    };
    let units: Vec<&str> = Unit::ALL.iter().map(|u| u.label()).collect();
    let unit_prompt = format!("Unit ({}): ", units.join(", "));

    let (mut asked, mut correct) = (0usize, 0usize);
    loop {
        let substances = store.load_substances()?;
        let question = match draw_dose_question(&substances, &mode, rng) {
            Ok(q) => q,
            Err(QuizError::EmptyCollection(_)) => {
                writeln!(out, "{NO_SUBSTANCES}")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        writeln!(out)?;
        writeln!(out, "Substance:      {}", question.drug)?;
        writeln!(out, "Patient weight: {} kg", question.weight_kg)?;

        let outcome = loop {
            let Some(dose) = prompt(input, out, "Dose: ")? else {
                return finish(out, correct, asked);
            };
            let Some(unit) = prompt(input, out, &unit_prompt)? else {
                return finish(out, correct, asked);
            };
            match grade_dose(store, &question, &dose, &unit) {
                Ok(outcome) => break outcome,
                Err(e) if e.is_input_error() => writeln!(out, "{e}")?,
                Err(e) => return Err(e),
            }
        };

        writeln!(out, "{outcome}")?;
        asked += 1;
        if outcome.is_correct() {
            correct += 1;
        }

        if count.is_some_and(|n| asked >= n) || !next_question(input, out)? {
            break;
        }
    }
    finish(out, correct, asked)
}

pub fn situation<I: BufRead, O: Write, R: Rng + ?Sized>(
    store: &Store,
    count: Option<usize>,
    input: &mut I,
    out: &mut O,
    rng: &mut R,
) -> Result<(), QuizError> {
    let (mut asked, mut correct) = (0usize, 0usize);
    loop {
        let situations = store.load_situations()?;
        let situation = match pick_random_situation(&situations, rng) {
            Ok(s) => s,
            Err(QuizError::EmptyCollection(_)) => {
                writeln!(out, "{NO_SITUATIONS}")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let choices: Vec<String> = store.load_substances()?.into_keys().collect();

        writeln!(out)?;
        writeln!(out, "Situation: {}", situation.description())?;
        writeln!(out)?;
        for (i, name) in choices.iter().enumerate() {
            writeln!(out, "  {:>2}. {}", i + 1, name)?;
        }

        let Some(answer) = prompt(input, out, "Substances (numbers or names, comma-separated): ")?
        else {
            break;
        };
        let selections: Vec<String> = answer.split(',').map(str::to_string).collect();
        let outcome = grade_situation(situation, &choices, &selections);

        writeln!(out, "{outcome}")?;
        asked += 1;
        if outcome.is_correct() {
            correct += 1;
        }

        if count.is_some_and(|n| asked >= n) || !next_question(input, out)? {
            break;
        }
    }
    finish(out, correct, asked)
}

fn finish<O: Write>(out: &mut O, correct: usize, asked: usize) -> Result<(), QuizError> {
    if asked > 0 {
        writeln!(out)?;
        writeln!(out, "Score: {correct}/{asked}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosequiz_core::StoreConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn store(drugs: &str, situations: &str) -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::from_data_dir(dir.path());
        std::fs::write(&config.substances_path, drugs).unwrap();
        std::fs::write(&config.situations_path, situations).unwrap();
        (dir, Store::new(config))
    }

    fn run_dose(store: &Store, drug: Option<&str>, count: Option<usize>, input: &str) -> String {
        let mut out = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);
        dose(
            store,
            drug.map(String::from),
            count,
            &mut Cursor::new(input),
            &mut out,
            &mut rng,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_dose_quiz_empty_registry() {
        let (_dir, store) = store("{}", "[]");
        let out = run_dose(&store, None, None, "");
        assert!(out.contains(NO_SUBSTANCES));
    }

    #[test]
    fn test_dose_quiz_rate_unit() {
        // Rate unit entered, so the bounds are not weight-scaled.
        let (_dir, store) = store(
            r#"{"Noradrenalin":{"unit":"µg/kgKG/h","min_dose":"0,05","max_dose":"0,5"}}"#,
            "[]",
        );
        let out = run_dose(&store, None, Some(1), "0,1\nµg/kgKG/h\n");
        assert!(out.contains("Substance:      Noradrenalin"));
        assert!(out.contains("Correct dose!"));
        assert!(out.contains("Score: 1/1"));
    }

    #[test]
    fn test_dose_quiz_reasks_after_bad_number() {
        let (_dir, store) = store(
            r#"{"Naloxon":{"unit":"mg","min_dose":0,"max_dose":1000}}"#,
            "[]",
        );
        let out = run_dose(&store, Some("Naloxon"), Some(1), "lots\nmg\n0\nmg\n");
        assert!(out.contains("invalid number 'lots'"));
        assert!(out.contains("Correct dose!"));
    }

    #[test]
    fn test_dose_quiz_stops_on_no() {
        let (_dir, store) = store(
            r#"{"Naloxon":{"unit":"mg","min_dose":0,"max_dose":1000}}"#,
            "[]",
        );
        let out = run_dose(&store, None, None, "1\nml\nn\n");
        assert!(out.contains("Wrong unit. The correct unit is mg"));
        assert!(out.contains("Score: 0/1"));
        assert_eq!(out.matches("Substance:").count(), 1);
    }

    #[test]
    fn test_dose_quiz_ends_at_eof() {
        let (_dir, store) = store(
            r#"{"Naloxon":{"unit":"mg","min_dose":0,"max_dose":1000}}"#,
            "[]",
        );
        let out = run_dose(&store, None, None, "1\n");
        assert!(!out.contains("Score:"));
    }

    #[test]
    fn test_dose_quiz_unknown_chosen_drug() {
        let (_dir, store) = store(
            r#"{"Naloxon":{"unit":"mg","min_dose":0,"max_dose":1}}"#,
            "[]",
        );
        let mut rng = StdRng::seed_from_u64(1);
        let err = dose(
            &store,
            Some("Ghost".into()),
            None,
            &mut Cursor::new(""),
            &mut Vec::new(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, QuizError::UnknownDrug(_)));
    }

    #[test]
    fn test_situation_quiz() {
        let (_dir, store) = store(
            r#"{"Adrenalin":{"unit":"mg","min_dose":1,"max_dose":1},"Atropin":{"unit":"mg","min_dose":0.5,"max_dose":1}}"#,
            r#"[["Bradycardia",["Atropin"]]]"#,
        );
        let mut out = Vec::new();
        let mut rng = StdRng::seed_from_u64(2);
        situation(
            &store,
            None,
            &mut Cursor::new("1\ny\n2\nq\n"),
            &mut out,
            &mut rng,
        )
        .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Situation: Bradycardia"));
        assert!(out.contains("   1. Adrenalin"));
        assert!(out.contains("Incorrect.\nCorrect answer is:\n\nAtropin"));
        assert!(out.contains("Correct!"));
        assert!(out.contains("Score: 1/2"));
    }

    #[test]
    fn test_situation_quiz_empty() {
        let (_dir, store) = store("{}", "[]");
        let mut out = Vec::new();
        let mut rng = StdRng::seed_from_u64(2);
        situation(&store, None, &mut Cursor::new(""), &mut out, &mut rng).unwrap();
        assert!(String::from_utf8(out).unwrap().contains(NO_SITUATIONS));
    }
}
