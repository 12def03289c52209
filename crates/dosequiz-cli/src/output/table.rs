use dosequiz_core::{Situations, Substances};

pub fn format_substances(substances: &Substances) -> String {
    let headers = ["Substance", "Unit", "Minimum dose", "Maximum dose"];

    let rows: Vec<[String; 4]> = substances
        .iter()
        .map(|(name, s)| {
            [
                name.clone(),
                s.unit.to_string(),
                s.min_dose.normalize().to_string(),
                s.max_dose.normalize().to_string(),
            ]
        })
        .collect();

    // Width in chars, not bytes, so "µg" lines up.
    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers.map(String::from), &widths);
    let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&format!("  {}\n", "-".repeat(total)));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
        .collect();
    out.push_str(&format!("  {}\n", line.join("  ").trim_end()));
}

pub fn format_situations(situations: &Situations) -> String {
    let mut out = String::new();
    for (i, situation) in situations.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("  {}. {}\n", i + 1, situation.description()));
        let names: Vec<&str> = situation.drug_names().iter().map(String::as_str).collect();
        if names.is_empty() {
            out.push_str("     -> (no substances)\n");
        } else {
            out.push_str(&format!("     -> {}\n", names.join(", ")));
        }
    }
    out
}
