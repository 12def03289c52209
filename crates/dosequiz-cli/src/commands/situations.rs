use dosequiz_core::error::QuizError;
use dosequiz_core::store::forms;
use dosequiz_core::Store;
use std::path::{Path, PathBuf};

use crate::output;

pub fn list(store: &Store) -> Result<(), QuizError> {
    let situations = store.load_situations()?;
    if situations.is_empty() {
        println!("No situations registered.");
        return Ok(());
    }
    print!("{}", output::table::format_situations(&situations));
    Ok(())
}

pub fn export(store: &Store, out: Option<PathBuf>) -> Result<(), QuizError> {
    let situations = store.load_situations()?;
    let form = forms::render_situation_form(&forms::situation_rows(&situations));
    match out {
        Some(path) => {
            std::fs::write(&path, form)?;
            eprintln!(
                "Exported {} situation(s) to {}",
                situations.len(),
                path.display()
            );
        }
        None => print!("{form}"),
    }
    Ok(())
}

pub fn save(store: &Store, file: &Path) -> Result<(), QuizError> {
    let text = std::fs::read_to_string(file)?;
    let rows = forms::parse_situation_form(&text)?;
    let substances = store.load_substances()?;
    let situations = forms::build_situations(&rows, &substances);
    store.save_situations(&situations)?;
    eprintln!(
        "Saved {} situation(s) to {}",
        situations.len(),
        store.config().situations_path.display()
    );
    Ok(())
}
