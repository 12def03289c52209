use crate::error::QuizError;
use crate::parsing::parse_decimal;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Dosing units a substance can be registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "mg")]
    Mg,
    #[serde(rename = "µg")]
    Ug,
    #[serde(rename = "mg/kgKG")]
    MgPerKg,
    #[serde(rename = "µg/kgKG")]
    UgPerKg,
    #[serde(rename = "mg/kgKG/h")]
    MgPerKgPerHour,
    #[serde(rename = "µg/kgKG/h")]
    UgPerKgPerHour,
    #[serde(rename = "ml")]
    Ml,
    #[serde(rename = "ml/kgKG")]
    MlPerKg,
}

impl Unit {
    /// All units in the order they are offered to the user.
    pub const ALL: [Unit; 8] = [
        Unit::Mg,
        Unit::Ug,
        Unit::MgPerKg,
        Unit::UgPerKg,
        Unit::MgPerKgPerHour,
        Unit::UgPerKgPerHour,
        Unit::Ml,
        Unit::MlPerKg,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Unit::Mg => "mg",
            Unit::Ug => "µg",
            Unit::MgPerKg => "mg/kgKG",
            Unit::UgPerKg => "µg/kgKG",
            Unit::MgPerKgPerHour => "mg/kgKG/h",
            Unit::UgPerKgPerHour => "µg/kgKG/h",
            Unit::Ml => "ml",
            Unit::MlPerKg => "ml/kgKG",
        }
    }

    /// Dose per kilogram body weight (label ends with `KG`).
    pub fn is_per_kilogram(&self) -> bool {
        self.label().ends_with("KG")
    }

    /// Dose per hour (label ends with `/h`).
    pub fn is_rate(&self) -> bool {
        self.label().ends_with("/h")
    }

    /// The unit an answer is expected in: per-kilogram units reduce to
    /// their base unit, everything else is returned as is.
    pub fn normalized(&self) -> Unit {
        match self {
            Unit::MgPerKg => Unit::Mg,
            Unit::UgPerKg => Unit::Ug,
            Unit::MlPerKg => Unit::Ml,
            other => *other,
        }
    }

    fn available() -> String {
        Unit::ALL
            .iter()
            .map(|u| u.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // "ug" is accepted as a keyboard-friendly spelling of "µg".
        let wanted = s.replace("ug", "µg");
        Unit::ALL
            .iter()
            .find(|u| u.label() == s || u.label() == wanted)
            .copied()
            .ok_or_else(|| QuizError::InvalidUnit {
                unit: s.to_string(),
                available: Unit::available(),
            })
    }
}

/// A registered substance. The name is the key of [`Substances`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substance {
    pub unit: Unit,
    #[serde(deserialize_with = "lenient_dose")]
    pub min_dose: Decimal,
    #[serde(deserialize_with = "lenient_dose")]
    pub max_dose: Decimal,
}

/// Substances keyed by unique name.
pub type Substances = BTreeMap<String, Substance>;

/// A clinical scenario and the substances considered correct for it.
///
/// Stored on disk as `[description, [names...]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Situation(pub String, pub BTreeSet<String>);

impl Situation {
    pub fn new(
        description: impl Into<String>,
        drug_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Situation(
            description.into(),
            drug_names.into_iter().map(Into::into).collect(),
        )
    }

    pub fn description(&self) -> &str {
        &self.0
    }

    pub fn drug_names(&self) -> &BTreeSet<String> {
        &self.1
    }
}

pub type Situations = Vec<Situation>;

/// Doses may be stored as JSON numbers or as strings with a decimal comma.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDose {
    Number(serde_json::Number),
    Text(String),
}

fn lenient_dose<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match RawDose::deserialize(deserializer)? {
        RawDose::Number(n) => n.to_string(),
        RawDose::Text(s) => s,
    };
    parse_decimal(&text).map_err(serde::de::Error::custom)
}
