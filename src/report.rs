//! The aggregation pipeline: filtering, the six chart tables, and the
//! generated insight sentences. Everything here is a pure function of the
//! loaded records and the viewer's filter selection.

use crate::record::{MultiSelect, SurveyRecord};

/// One selectable filter value: everything, or exactly one answer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Builds a selection from the value a dashboard client sends, where an
    /// omitted value or the literal `"All"` means no constraint.
    pub(crate) fn from_choice(choice: Option<String>) -> Self {
        match choice {
            None => Selection::All,
            Some(value) if value == "All" => Selection::All,
            Some(value) => Selection::Only(value),
        }
    }

    // Comparison is case-sensitive and codepoint-exact. The age bands carry
    // an en dash (U+2013) in the sheet data; a hyphen here matches nothing.
    fn admits(&self, answer: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(value) => answer == Some(value.as_str()),
        }
    }
}

/// The three filter values chosen by the dashboard viewer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct FilterSelection {
    pub(crate) age_group: Selection,
    pub(crate) location: Selection,
    pub(crate) education: Selection,
}

impl FilterSelection {
    /// Whether a record satisfies all three selections. An unanswered
    /// question fails any constrained selection.
    pub(crate) fn matches(&self, record: &SurveyRecord) -> bool {
        self.age_group.admits(record.age_group.as_deref())
            && self.location.admits(record.location.as_deref())
            && self.education.admits(record.education.as_deref())
    }
}

/// Keeps the records matching the selection. Order-preserving, no dedup.
pub(crate) fn filter<'a>(
    records: &'a [SurveyRecord],
    selection: &FilterSelection,
) -> Vec<&'a SurveyRecord> {
    records
        .iter()
        .filter(|record| selection.matches(record))
        .collect()
}

/// The count of filtered records in one fixed category; what a single pie
/// slice or bar renders.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CategoryCount {
    pub(crate) label: &'static str,
    pub(crate) count: usize,
}

/// One fixed category of a chart table.
struct Category {
    /// Chart label; may be a shortened form of the full answer text.
    label: &'static str,
    rule: Rule,
}

/// How a category decides whether a record belongs to it.
enum Rule {
    /// The single-answer question equals this exact text.
    Answer(fn(&SurveyRecord) -> Option<&str>, &'static str),
    /// The multi-select question includes this option.
    Chosen(fn(&SurveyRecord) -> Option<&MultiSelect>, &'static str),
}

impl Rule {
    fn matches(&self, record: &SurveyRecord) -> bool {
        match *self {
            Rule::Answer(field, answer) => field(record) == Some(answer),
            Rule::Chosen(field, option) => {
                field(record).is_some_and(|choices| choices.contains(option))
            }
        }
    }
}

fn age_group(record: &SurveyRecord) -> Option<&str> {
    record.age_group.as_deref()
}

fn violence_familiarity(record: &SurveyRecord) -> Option<&str> {
    record.violence_familiarity.as_deref()
}

fn physical_violence(record: &SurveyRecord) -> Option<&str> {
    record.physical_violence.as_deref()
}

fn violence_types(record: &SurveyRecord) -> Option<&MultiSelect> {
    record.violence_against_women_types.as_ref()
}

fn violence_location(record: &SurveyRecord) -> Option<&MultiSelect> {
    record.physical_violence_location.as_ref()
}

fn reporting_barrier(record: &SurveyRecord) -> Option<&MultiSelect> {
    record.sexual_violence_barrier.as_ref()
}

// The matched answers keep the sheet's en dash; the chart labels use a
// plain hyphen.
const AGE_DISTRIBUTION: &[Category] = &[
    Category {
        label: "Under 18",
        rule: Rule::Answer(age_group, "Under 18"),
    },
    Category {
        label: "18-24",
        rule: Rule::Answer(age_group, "18–24"),
    },
    Category {
        label: "25-34",
        rule: Rule::Answer(age_group, "25–34"),
    },
    Category {
        label: "35-44",
        rule: Rule::Answer(age_group, "35–44"),
    },
    Category {
        label: "45-54",
        rule: Rule::Answer(age_group, "45–54"),
    },
    Category {
        label: "55-64",
        rule: Rule::Answer(age_group, "55–64"),
    },
    Category {
        label: "65 and above",
        rule: Rule::Answer(age_group, "65 and above"),
    },
];

const VIOLENCE_FAMILIARITY: &[Category] = &[
    Category {
        label: "Very familiar",
        rule: Rule::Answer(violence_familiarity, "Very familiar"),
    },
    Category {
        label: "Somewhat familiar",
        rule: Rule::Answer(violence_familiarity, "Somewhat familiar"),
    },
    Category {
        label: "Not very familiar",
        rule: Rule::Answer(violence_familiarity, "Not very familiar"),
    },
    Category {
        label: "Not at all familiar",
        rule: Rule::Answer(violence_familiarity, "Not at all familiar"),
    },
];

const VIOLENCE_TYPES: &[Category] = &[
    Category {
        label: "Physical assault",
        rule: Rule::Chosen(violence_types, "Physical assault"),
    },
    Category {
        label: "Sexual assault",
        rule: Rule::Chosen(violence_types, "Sexual assault or rape"),
    },
    Category {
        label: "Verbal abuse",
        rule: Rule::Chosen(violence_types, "Verbal abuse or name-calling"),
    },
    Category {
        label: "Isolation",
        rule: Rule::Chosen(
            violence_types,
            "Isolating from friends/family, controlling finances",
        ),
    },
    Category {
        label: "Stalking",
        rule: Rule::Chosen(violence_types, "Stalking or persistent unwanted attention"),
    },
    Category {
        label: "Online harassment",
        rule: Rule::Chosen(violence_types, "Online harassment or cyberbullying"),
    },
];

const PHYSICAL_VIOLENCE_PREVALENCE: &[Category] = &[
    Category {
        label: "Very common",
        rule: Rule::Answer(physical_violence, "Very common"),
    },
    Category {
        label: "Somewhat common",
        rule: Rule::Answer(physical_violence, "Somewhat common"),
    },
    Category {
        label: "Not very common",
        rule: Rule::Answer(physical_violence, "Not very common"),
    },
    Category {
        label: "Not at all common",
        rule: Rule::Answer(physical_violence, "Not at all common"),
    },
    Category {
        label: "Unsure",
        rule: Rule::Answer(physical_violence, "Unsure"),
    },
];

const VIOLENCE_LOCATION: &[Category] = &[
    Category {
        label: "At home",
        rule: Rule::Chosen(violence_location, "At home"),
    },
    Category {
        label: "In public spaces",
        rule: Rule::Chosen(violence_location, "In public spaces"),
    },
    Category {
        label: "At work",
        rule: Rule::Chosen(violence_location, "At work"),
    },
    Category {
        label: "In educational institutions",
        rule: Rule::Chosen(violence_location, "In educational institutions"),
    },
];

const REPORTING_BARRIERS: &[Category] = &[
    Category {
        label: "Fear of retaliation",
        rule: Rule::Chosen(reporting_barrier, "Fear of retaliation"),
    },
    Category {
        label: "Shame or stigma",
        rule: Rule::Chosen(reporting_barrier, "Shame or stigma"),
    },
    Category {
        label: "Lack of trust in authorities",
        rule: Rule::Chosen(reporting_barrier, "Lack of trust in authorities"),
    },
    Category {
        label: "Fear of not being believed",
        rule: Rule::Chosen(reporting_barrier, "Fear of not being believed"),
    },
    Category {
        label: "Lack of awareness of rights",
        rule: Rule::Chosen(reporting_barrier, "Lack of awareness of rights and resources"),
    },
];

/// Counts the filtered records belonging to each category, one linear pass
/// per category.
fn tally(categories: &[Category], records: &[&SurveyRecord]) -> Vec<CategoryCount> {
    categories
        .iter()
        .map(|category| CategoryCount {
            label: category.label,
            count: records
                .iter()
                .filter(|record| category.rule.matches(record))
                .count(),
        })
        .collect()
}

/// Like [`tally`], then orders the categories by descending count.
/// `sort_by` is stable, so equal counts keep the fixed category order.
fn tally_ranked(categories: &[Category], records: &[&SurveyRecord]) -> Vec<CategoryCount> {
    let mut counts = tally(categories, records);
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The six chart-ready tables for one filtered view.
#[derive(Debug, PartialEq)]
pub(crate) struct Report {
    pub(crate) age_distribution: Vec<CategoryCount>,
    pub(crate) violence_familiarity: Vec<CategoryCount>,
    pub(crate) violence_types: Vec<CategoryCount>,
    pub(crate) physical_violence_prevalence: Vec<CategoryCount>,
    pub(crate) violence_location: Vec<CategoryCount>,
    pub(crate) reporting_barriers: Vec<CategoryCount>,
}

/// Computes all six tables. Each table is independent of the others.
pub(crate) fn aggregate(records: &[&SurveyRecord]) -> Report {
    Report {
        age_distribution: tally(AGE_DISTRIBUTION, records),
        violence_familiarity: tally(VIOLENCE_FAMILIARITY, records),
        violence_types: tally_ranked(VIOLENCE_TYPES, records),
        physical_violence_prevalence: tally(PHYSICAL_VIOLENCE_PREVALENCE, records),
        violence_location: tally_ranked(VIOLENCE_LOCATION, records),
        reporting_barriers: tally_ranked(REPORTING_BARRIERS, records),
    }
}

/// The headline and bullet sentences for one filtered view.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Insights {
    pub(crate) headline: String,
    pub(crate) bullets: Vec<String>,
}

/// A bullet reports the share of filtered records matching a predicate,
/// phrased as a fixed sentence.
struct Bullet {
    matches: fn(&SurveyRecord) -> bool,
    sentence: &'static str,
}

const BULLETS: &[Bullet] = &[
    Bullet {
        matches: |record| {
            matches!(
                record.physical_violence.as_deref(),
                Some("Very common" | "Somewhat common")
            )
        },
        sentence:
            "of respondents believe physical violence against women is common in their community.",
    },
    Bullet {
        matches: |record| {
            record
                .physical_violence_location
                .as_ref()
                .is_some_and(|choices| choices.contains("At home"))
        },
        sentence:
            "of participants identify the home as a common location for violence against women.",
    },
    Bullet {
        matches: |record| {
            record
                .sexual_violence_barrier
                .as_ref()
                .is_some_and(|choices| choices.contains("Fear of retaliation"))
        },
        sentence:
            "of respondents cite fear of retaliation as a major barrier to reporting sexual violence.",
    },
];

// An empty filtered set yields the literal "0", matching the guarded
// percentage in the dashboard rather than "NaN" or "0.0".
fn percent(matching: usize, total: usize) -> String {
    if total == 0 {
        return "0".to_string();
    }
    let share = matching as f64 / total as f64 * 100.0;
    format!("{share:.1}")
}

/// Generates the headline and the three bullet sentences.
pub(crate) fn insights(records: &[&SurveyRecord]) -> Insights {
    let total = records.len();
    let experienced = records
        .iter()
        .filter(|record| record.violence_against_women.as_deref() == Some("Yes"))
        .count();
    let headline = format!(
        "{}% of women surveyed have experienced some form of violence.",
        percent(experienced, total)
    );
    let bullets = BULLETS
        .iter()
        .map(|bullet| {
            let matching = records
                .iter()
                .filter(|record| (bullet.matches)(record))
                .count();
            format!("{}% {}", percent(matching, total), bullet.sentence)
        })
        .collect();
    Insights { headline, bullets }
}

#[cfg(test)]
mod tests {
    use super::{aggregate, filter, insights, FilterSelection, Selection};
    use crate::record::{MultiSelect, SurveyRecord};

    fn respondent(age: &str, location: &str, education: &str) -> SurveyRecord {
        SurveyRecord {
            age_group: Some(age.to_string()),
            location: Some(location.to_string()),
            education: Some(education.to_string()),
            ..Default::default()
        }
    }

    fn with_types(options: &[&str]) -> SurveyRecord {
        SurveyRecord {
            violence_against_women_types: Some(MultiSelect::Options(
                options.iter().map(ToString::to_string).collect(),
            )),
            ..Default::default()
        }
    }

    fn only(value: &str) -> Selection {
        Selection::Only(value.to_string())
    }

    #[test]
    fn unconstrained_filter_keeps_every_record() {
        let records = vec![
            respondent("18–24", "Urban", "Primary Education"),
            respondent("25–34", "Rural", "Bachelor's Degree"),
            SurveyRecord::default(),
        ];
        let kept = filter(&records, &FilterSelection::default());
        assert_eq!(kept.len(), records.len());
        for (kept, original) in kept.iter().zip(&records) {
            assert_eq!(*kept, original);
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = vec![
            respondent("18–24", "Urban", "Primary Education"),
            respondent("18–24", "Rural", "Primary Education"),
            respondent("25–34", "Urban", "Primary Education"),
        ];
        let selection = FilterSelection {
            age_group: only("18–24"),
            ..Default::default()
        };
        let once = filter(&records, &selection);
        let twice: Vec<&SurveyRecord> = once
            .iter()
            .copied()
            .filter(|record| selection.matches(record))
            .collect();
        assert_eq!(twice, once);
    }

    #[test]
    fn age_band_filters_partition_the_records() {
        let records = vec![
            respondent("18–24", "Urban", "Primary Education"),
            respondent("18–24", "Rural", "Primary Education"),
            respondent("65 and above", "Urban", "Primary Education"),
            SurveyRecord::default(),
            respondent("not a band", "Urban", "Primary Education"),
        ];
        let bands = [
            "Under 18",
            "18–24",
            "25–34",
            "35–44",
            "45–54",
            "55–64",
            "65 and above",
        ];
        let claimed: usize = bands
            .iter()
            .map(|band| {
                let selection = FilterSelection {
                    age_group: only(band),
                    ..Default::default()
                };
                filter(&records, &selection).len()
            })
            .sum();
        let unmatched = records
            .iter()
            .filter(|record| {
                !bands.contains(&record.age_group.as_deref().unwrap_or_default())
            })
            .count();
        assert_eq!(claimed, 3);
        assert_eq!(unmatched, 2);
        assert_eq!(claimed + unmatched, records.len());
    }

    #[test]
    fn hyphenated_band_matches_nothing() {
        let records = vec![respondent("18–24", "Urban", "Primary Education")];
        let selection = FilterSelection {
            age_group: only("18-24"),
            ..Default::default()
        };
        assert!(filter(&records, &selection).is_empty());
    }

    #[test]
    fn age_distribution_counts_each_band_once() {
        let records = vec![
            respondent("18–24", "Urban", "Primary Education"),
            respondent("18–24", "Rural", "Primary Education"),
            respondent("25–34", "Urban", "Primary Education"),
            respondent("Under 18", "Urban", "Primary Education"),
        ];
        let kept = filter(&records, &FilterSelection::default());
        let report = aggregate(&kept);
        let counts: Vec<(&str, usize)> = report
            .age_distribution
            .iter()
            .map(|c| (c.label, c.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("Under 18", 1),
                ("18-24", 2),
                ("25-34", 1),
                ("35-44", 0),
                ("45-54", 0),
                ("55-64", 0),
                ("65 and above", 0),
            ]
        );
    }

    #[test]
    fn exact_match_tables_sum_to_record_count() {
        let records = vec![
            SurveyRecord {
                violence_familiarity: Some("Very familiar".to_string()),
                physical_violence: Some("Unsure".to_string()),
                ..respondent("18–24", "Urban", "Primary Education")
            },
            SurveyRecord {
                violence_familiarity: Some("Not at all familiar".to_string()),
                physical_violence: Some("Very common".to_string()),
                ..respondent("45–54", "Rural", "Bachelor's Degree")
            },
            SurveyRecord {
                violence_familiarity: Some("Somewhat familiar".to_string()),
                physical_violence: Some("Somewhat common".to_string()),
                ..respondent("65 and above", "Semi-Urban", "Master's Degree or Higher")
            },
        ];
        let kept = filter(&records, &FilterSelection::default());
        let report = aggregate(&kept);
        for table in [
            &report.age_distribution,
            &report.violence_familiarity,
            &report.physical_violence_prevalence,
        ] {
            assert_eq!(table.iter().map(|c| c.count).sum::<usize>(), kept.len());
        }
    }

    #[test]
    fn tied_violence_types_keep_fixed_category_order() {
        let records = vec![
            with_types(&["Verbal abuse or name-calling"]),
            with_types(&[
                "Physical assault",
                "Stalking or persistent unwanted attention",
            ]),
            with_types(&[]),
        ];
        let kept = filter(&records, &FilterSelection::default());
        let report = aggregate(&kept);
        let counts: Vec<(&str, usize)> = report
            .violence_types
            .iter()
            .map(|c| (c.label, c.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("Physical assault", 1),
                ("Verbal abuse", 1),
                ("Stalking", 1),
                ("Sexual assault", 0),
                ("Isolation", 0),
                ("Online harassment", 0),
            ]
        );
    }

    #[test]
    fn ranked_tables_are_deterministic() {
        let records = vec![
            with_types(&["Physical assault"]),
            with_types(&["Verbal abuse or name-calling", "Physical assault"]),
            SurveyRecord {
                physical_violence_location: Some(MultiSelect::Joined(
                    "At home, In public spaces".to_string(),
                )),
                sexual_violence_barrier: Some(MultiSelect::Joined(
                    "Shame or stigma".to_string(),
                )),
                ..Default::default()
            },
        ];
        let kept = filter(&records, &FilterSelection::default());
        assert_eq!(aggregate(&kept), aggregate(&kept));
    }

    #[test]
    fn insights_survive_an_empty_filter() {
        let generated = insights(&[]);
        assert_eq!(
            generated.headline,
            "0% of women surveyed have experienced some form of violence."
        );
        assert_eq!(generated.bullets.len(), 3);
        for bullet in &generated.bullets {
            assert!(bullet.starts_with("0% "), "unexpected bullet: {bullet}");
        }
    }

    #[test]
    fn insights_format_with_one_decimal() {
        let records = vec![
            SurveyRecord {
                violence_against_women: Some("Yes".to_string()),
                physical_violence: Some("Very common".to_string()),
                physical_violence_location: Some(MultiSelect::Joined("At home".to_string())),
                sexual_violence_barrier: Some(MultiSelect::Joined(
                    "Fear of retaliation".to_string(),
                )),
                ..Default::default()
            },
            SurveyRecord {
                violence_against_women: Some("Yes".to_string()),
                physical_violence: Some("Somewhat common".to_string()),
                ..Default::default()
            },
            SurveyRecord {
                violence_against_women: Some("No".to_string()),
                physical_violence: Some("Unsure".to_string()),
                ..Default::default()
            },
            SurveyRecord::default(),
        ];
        let kept = filter(&records, &FilterSelection::default());
        let generated = insights(&kept);
        assert_eq!(
            generated.headline,
            "50.0% of women surveyed have experienced some form of violence."
        );
        assert_eq!(
            generated.bullets,
            vec![
                "50.0% of respondents believe physical violence against women is common in their community.",
                "25.0% of participants identify the home as a common location for violence against women.",
                "25.0% of respondents cite fear of retaliation as a major barrier to reporting sexual violence.",
            ]
        );
    }
}
