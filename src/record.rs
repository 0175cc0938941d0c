//! Survey response rows as delivered by the spreadsheet API.

use serde::{Deserialize, Serialize};

/// One respondent's answers.
///
/// The sheet API returns each row as a flat JSON object keyed by the
/// original PascalCase column names. Every column is optional: an
/// unanswered question comes through as null or is absent entirely, and an
/// absent answer never matches any predicate. Columns not listed here are
/// ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct SurveyRecord {
    pub(crate) age_group: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) education: Option<String>,
    pub(crate) violence_familiarity: Option<String>,
    pub(crate) violence_against_women: Option<String>,
    pub(crate) violence_against_women_types: Option<MultiSelect>,
    pub(crate) physical_violence: Option<String>,
    pub(crate) physical_violence_location: Option<MultiSelect>,
    pub(crate) sexual_violence_barrier: Option<MultiSelect>,
}

/// A multi-select answer.
///
/// Depending on the export, the sheet delivers a multi-select question
/// either as one comma-joined cell (`"At home, At work"`) or as an array
/// of the chosen options. `contains` is substring containment for the
/// joined form and whole-option equality for the array form.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum MultiSelect {
    Joined(String),
    Options(Vec<String>),
}

impl MultiSelect {
    pub(crate) fn contains(&self, option: &str) -> bool {
        match self {
            MultiSelect::Joined(cell) => cell.contains(option),
            MultiSelect::Options(options) => options.iter().any(|chosen| chosen == option),
        }
    }
}
