//! End-to-end tests against an on-disk store in a temporary directory.

use dosequiz_core::store::forms;
use dosequiz_core::{
    check_answer, draw_dose_question, grade_dose, grade_situation, pick_random_situation,
    pick_random_substance, QuizError, QuizMode, Store, StoreConfig, Substances,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn store_with(drugs_json: &str, situations_json: &str) -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::from_data_dir(dir.path());
    std::fs::write(&config.substances_path, drugs_json).unwrap();
    std::fs::write(&config.situations_path, situations_json).unwrap();
    (dir, Store::new(config))
}

// ---------------------------------------------------------------------------
// Grading against a file written by hand, with string doses
// ---------------------------------------------------------------------------
#[test]
fn per_kg_substance_from_disk() {
    let (_dir, store) = store_with(
        r#"{"Drug":{"unit":"mg/kgKG","min_dose":"1","max_dose":"2"}}"#,
        "[]",
    );
    let substances = store.load_substances().unwrap();

    let correct = check_answer(&substances, "Drug", 70, "70", "mg").unwrap();
    assert_eq!(correct.to_string(), "Correct dose!");

    let wrong_unit = check_answer(&substances, "Drug", 70, "70", "mg/kgKG").unwrap();
    assert_eq!(
        wrong_unit.to_string(),
        "Wrong unit. The correct unit is mg\nCorrect dose!"
    );
}

#[test]
fn oversized_bounds_on_disk_are_an_error() {
    let (_dir, store) = store_with(
        r#"{"Drug":{"unit":"mg/kgKG","min_dose":"1e27","max_dose":"2e27"}}"#,
        "[]",
    );
    let substances = store.load_substances().unwrap();
    assert!(matches!(
        check_answer(&substances, "Drug", 160, "1", "mg"),
        Err(QuizError::DoseOverflow { weight_kg: 160, .. })
    ));
}

#[test]
fn comma_doses_on_disk_are_normalized() {
    let (_dir, store) = store_with(
        r#"{"Fentanyl":{"unit":"µg/kgKG","min_dose":"0,5","max_dose":1.5}}"#,
        "[]",
    );
    let question = dosequiz_core::DoseQuestion {
        drug: "Fentanyl".into(),
        weight_kg: 80,
    };
    let outcome = grade_dose(&store, &question, "40", "µg").unwrap();
    assert!(outcome.is_correct());
    let outcome = grade_dose(&store, &question, "121", "µg").unwrap();
    assert_eq!(
        outcome.to_string(),
        "Wrong dose. Correct answer is between 40 and 120"
    );
}

// ---------------------------------------------------------------------------
// Persistence round trip
// ---------------------------------------------------------------------------
#[test]
fn save_of_load_is_idempotent() {
    let (_dir, store) = store_with(
        r#"{"A":{"unit":"ml","min_dose":"2,5","max_dose":5},"B":{"unit":"mg/kgKG/h","min_dose":0.1,"max_dose":"0.3"}}"#,
        r#"[["Shock",["A","B"]],["Stale",["Gone"]]]"#,
    );
    let substances = store.load_substances().unwrap();
    let situations = store.load_situations().unwrap();

    store.save_substances(&substances).unwrap();
    store.save_situations(&situations).unwrap();

    assert_eq!(store.load_substances().unwrap(), substances);
    assert_eq!(store.load_situations().unwrap(), situations);

    let first = std::fs::read_to_string(&store.config().substances_path).unwrap();
    store.save_substances(&store.load_substances().unwrap()).unwrap();
    let second = std::fs::read_to_string(&store.config().substances_path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn malformed_file_surfaces_persistence_error() {
    let (_dir, store) = store_with("{}", "[[\"missing drugs\"]]");
    assert!(matches!(
        store.load_situations(),
        Err(QuizError::Persistence { .. })
    ));
}

// ---------------------------------------------------------------------------
// Registration through forms, then a quiz round
// ---------------------------------------------------------------------------
#[test]
fn register_then_quiz() {
    let dir = TempDir::new().unwrap();
    let store = Store::new(StoreConfig::from_data_dir(dir.path().join("quiz")));
    store.ensure_files().unwrap();

    let mut rng = StdRng::seed_from_u64(9);
    assert!(matches!(
        draw_dose_question(&store.load_substances().unwrap(), &QuizMode::Random, &mut rng),
        Err(QuizError::EmptyCollection(_))
    ));

    let form = "\
# edited by hand
Adrenalin;mg;1;1
Amiodaron;mg;300;300

Midazolam;mg/kgKG;0,1;0,2
";
    let rows = forms::parse_substance_form(form).unwrap();
    let substances = forms::build_substances(&rows).unwrap();
    store.save_substances(&substances).unwrap();

    let situation_form = "Cardiac arrest, shockable|Adrenalin;Amiodaron\n";
    let rows = forms::parse_situation_form(situation_form).unwrap();
    let situations = forms::build_situations(&rows, &substances);
    store.save_situations(&situations).unwrap();

    let substances = store.load_substances().unwrap();
    let name = pick_random_substance(&substances, &mut rng).unwrap();
    assert!(substances.contains_key(name));

    let question = draw_dose_question(
        &substances,
        &QuizMode::Chosen("Midazolam".into()),
        &mut rng,
    )
    .unwrap();
    // Exactly the lower bound, 0.1 mg per kg.
    let low = format!("{},{}", question.weight_kg / 10, question.weight_kg % 10);
    let outcome = grade_dose(&store, &question, &low, "mg").unwrap();
    assert!(outcome.is_correct(), "{outcome}");

    let situations = store.load_situations().unwrap();
    let situation = pick_random_situation(&situations, &mut rng).unwrap();
    let choices: Vec<String> = substances.keys().cloned().collect();
    let outcome = grade_situation(situation, &choices, &["Adrenalin".into()]);
    assert_eq!(
        outcome.to_string(),
        "Incorrect.\nCorrect answer is:\n\nAdrenalin\nAmiodaron"
    );
}

#[test]
fn deleting_a_row_removes_the_record() {
    let (_dir, store) = store_with(
        r#"{"A":{"unit":"mg","min_dose":1,"max_dose":2},"B":{"unit":"mg","min_dose":1,"max_dose":2}}"#,
        "[]",
    );
    let mut rows = forms::substance_rows(&store.load_substances().unwrap());
    rows.retain(|r| r.name != "A");
    store
        .save_substances(&forms::build_substances(&rows).unwrap())
        .unwrap();

    let substances: Substances = store.load_substances().unwrap();
    assert_eq!(substances.keys().collect::<Vec<_>>(), vec!["B"]);
}

#[test]
fn export_then_save_keeps_awkward_names() {
    let (_dir, store) = store_with(
        r##"{"#2 Drug":{"unit":"mg","min_dose":1,"max_dose":2},"A;B":{"unit":"ml","min_dose":3,"max_dose":4}}"##,
        r##"[["# Cardiac arrest\nshockable rhythm",["#2 Drug","A;B"]],["Pain | severe",[]]]"##,
    );
    let substances = store.load_substances().unwrap();
    let situations = store.load_situations().unwrap();

    let text = forms::render_substance_form(&forms::substance_rows(&substances));
    let rows = forms::parse_substance_form(&text).unwrap();
    store
        .save_substances(&forms::build_substances(&rows).unwrap())
        .unwrap();

    let text = forms::render_situation_form(&forms::situation_rows(&situations));
    let rows = forms::parse_situation_form(&text).unwrap();
    store
        .save_situations(&forms::build_situations(&rows, &substances))
        .unwrap();

    assert_eq!(store.load_substances().unwrap(), substances);
    assert_eq!(store.load_situations().unwrap(), situations);
}
