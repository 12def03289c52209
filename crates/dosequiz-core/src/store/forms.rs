//! Editable renderings of whole collections.
//!
//! Collections are never edited record by record. Every record is rendered
//! as a row, the user edits the rows, and the complete set of rows is
//! submitted back to rebuild the collection. Rows whose name or description
//! is blank are dropped, which is how records get deleted.

use crate::error::QuizError;
use crate::model::{Situation, Situations, Substance, Substances, Unit};
use crate::parsing::parse_decimal;
use std::collections::BTreeSet;

/// One editable substance row. All fields hold raw text as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstanceRow {
    pub name: String,
    pub unit: String,
    pub min_dose: String,
    pub max_dose: String,
}

/// One editable situation row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SituationRow {
    pub description: String,
    pub drug_names: Vec<String>,
}

pub fn substance_rows(substances: &Substances) -> Vec<SubstanceRow> {
    substances
        .iter()
        .map(|(name, s)| SubstanceRow {
            name: name.clone(),
            unit: s.unit.label().to_string(),
            min_dose: s.min_dose.to_string(),
            max_dose: s.max_dose.to_string(),
        })
        .collect()
}

pub fn situation_rows(situations: &Situations) -> Vec<SituationRow> {
    situations
        .iter()
        .map(|s| SituationRow {
            description: s.description().to_string(),
            drug_names: s.drug_names().iter().cloned().collect(),
        })
        .collect()
}

/// Rebuild the substance collection from submitted rows.
pub fn build_substances(rows: &[SubstanceRow]) -> Result<Substances, QuizError> {
    let mut substances = Substances::new();
    for row in rows {
        let name = row.name.trim();
        if name.is_empty() {
            continue;
        }
        let substance = Substance {
            unit: row.unit.parse::<Unit>()?,
            min_dose: parse_decimal(&row.min_dose)?,
            max_dose: parse_decimal(&row.max_dose)?,
        };
        if substance.min_dose > substance.max_dose {
            tracing::warn!(
                substance = name,
                min = %substance.min_dose,
                max = %substance.max_dose,
                "minimum dose is above maximum dose"
            );
        }
        substances.insert(name.to_string(), substance);
    }
    Ok(substances)
}

/// Rebuild the situation collection from submitted rows.
///
/// Names not present in `known` are kept; they only produce a warning.
pub fn build_situations(rows: &[SituationRow], known: &Substances) -> Situations {
    let mut situations = Situations::new();
    for row in rows {
        let description = row.description.trim();
        if description.is_empty() {
            continue;
        }
        let drug_names: BTreeSet<String> = row
            .drug_names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
        for name in drug_names.iter().filter(|n| !known.contains_key(*n)) {
            tracing::warn!(situation = description, substance = %name, "unregistered substance");
        }
        situations.push(Situation(description.to_string(), drug_names));
    }
    situations
}

const SUBSTANCE_FORM_HEADER: &str = "\
# One substance per line: name;unit;min_dose;max_dose
# Units: mg, µg, mg/kgKG, µg/kgKG, mg/kgKG/h, µg/kgKG/h, ml, ml/kgKG
# Write \\; \\| \\# \\\\ for literal characters and \\n for a line break.
# Delete a line to remove the substance.
";

const SITUATION_FORM_HEADER: &str = "\
# One situation per line: description|substance;substance;...
# Write \\; \\| \\# \\\\ for literal characters and \\n for a line break.
# Delete a line to remove the situation.
";

/// Backslash-escape separators, comment markers and line breaks so any
/// name or description survives a render/parse cycle.
fn escape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' | ';' | '|' | '#' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Split at every `sep` not preceded by a backslash. Escapes are kept.
fn split_unescaped(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            parts.push(&text[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

fn field(raw: &str) -> String {
    unescape_field(raw.trim()).trim().to_string()
}

pub fn render_substance_form(rows: &[SubstanceRow]) -> String {
    let mut out = String::from(SUBSTANCE_FORM_HEADER);
    for row in rows {
        out.push_str(&format!(
            "{};{};{};{}\n",
            escape_field(&row.name),
            escape_field(&row.unit),
            escape_field(&row.min_dose),
            escape_field(&row.max_dose)
        ));
    }
    out
}

pub fn render_situation_form(rows: &[SituationRow]) -> String {
    let mut out = String::from(SITUATION_FORM_HEADER);
    for row in rows {
        let names: Vec<String> = row.drug_names.iter().map(|n| escape_field(n)).collect();
        out.push_str(&format!(
            "{}|{}\n",
            escape_field(&row.description),
            names.join(";")
        ));
    }
    out
}

/// Non-blank, non-comment lines with their 1-based line numbers. A line
/// starting with an escaped `\#` is content.
fn form_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

pub fn parse_substance_form(text: &str) -> Result<Vec<SubstanceRow>, QuizError> {
    form_lines(text)
        .map(|(line, content)| {
            let fields = split_unescaped(content, ';');
            match fields.as_slice() {
                [name, unit, min, max] => Ok(SubstanceRow {
                    name: field(name),
                    unit: field(unit),
                    min_dose: field(min),
                    max_dose: field(max),
                }),
                _ => Err(QuizError::InvalidForm {
                    line,
                    reason: format!("expected 4 fields separated by ';', found {}", fields.len()),
                }),
            }
        })
        .collect()
}

pub fn parse_situation_form(text: &str) -> Result<Vec<SituationRow>, QuizError> {
    form_lines(text)
        .map(|(line, content)| -> Result<SituationRow, QuizError> {
            let mut parts = split_unescaped(content, '|');
            // Unescaped bars before the last one stay in the description.
            let names = parts.pop().filter(|_| !parts.is_empty()).ok_or_else(|| {
                QuizError::InvalidForm {
                    line,
                    reason: "expected 'description|substances'".into(),
                }
            })?;
            let description: Vec<String> = parts.iter().map(|p| unescape_field(p)).collect();
            Ok(SituationRow {
                description: description.join("|").trim().to_string(),
                drug_names: split_unescaped(names, ';')
                    .into_iter()
                    .map(field)
                    .filter(|n| !n.is_empty())
                    .collect(),
            })
        })
        .collect()
}
