use dosequiz_core::error::QuizError;
use dosequiz_core::store::forms;
use dosequiz_core::Store;
use std::path::{Path, PathBuf};

use crate::output;

pub fn list(store: &Store) -> Result<(), QuizError> {
    let substances = store.load_substances()?;
    if substances.is_empty() {
        println!("No substances registered.");
        return Ok(());
    }
    print!("{}", output::table::format_substances(&substances));
    Ok(())
}

pub fn export(store: &Store, out: Option<PathBuf>) -> Result<(), QuizError> {
    let substances = store.load_substances()?;
    let form = forms::render_substance_form(&forms::substance_rows(&substances));
    match out {
        Some(path) => {
            std::fs::write(&path, form)?;
            eprintln!(
                "Exported {} substance(s) to {}",
                substances.len(),
                path.display()
            );
        }
        None => print!("{form}"),
    }
    Ok(())
}

pub fn save(store: &Store, file: &Path) -> Result<(), QuizError> {
    let text = std::fs::read_to_string(file)?;
    let rows = forms::parse_substance_form(&text)?;
    let substances = forms::build_substances(&rows)?;
    store.save_substances(&substances)?;
    eprintln!(
        "Saved {} substance(s) to {}",
        substances.len(),
        store.config().substances_path.display()
    );
    Ok(())
}
