use async_graphql::{Context, InputObject, Object, Result, SimpleObject};

use crate::{
    database::Database,
    report::{self, FilterSelection, Selection},
};

/// The dashboard's three category filters. Omitting a field, or sending the
/// literal "All", leaves that field unconstrained.
#[derive(InputObject, Debug)]
pub(crate) struct RespondentFilter {
    /// Filter by age band, e.g. "18–24". The bands use an en dash.
    age_group: Option<String>,
    /// Filter by location: "Urban", "Semi-Urban" or "Rural".
    location: Option<String>,
    /// Filter by education level, e.g. "Bachelor's Degree".
    education: Option<String>,
}

impl From<RespondentFilter> for FilterSelection {
    fn from(filter: RespondentFilter) -> Self {
        FilterSelection {
            age_group: Selection::from_choice(filter.age_group),
            location: Selection::from_choice(filter.location),
            education: Selection::from_choice(filter.education),
        }
    }
}

/// The count of filtered records in one fixed category.
#[derive(SimpleObject)]
struct CategoryCount {
    /// Chart label for the category.
    label: String,
    /// Number of filtered records in the category.
    count: usize,
}

fn to_counts(counts: Vec<report::CategoryCount>) -> Vec<CategoryCount> {
    counts
        .into_iter()
        .map(|c| CategoryCount {
            label: c.label.to_string(),
            count: c.count,
        })
        .collect()
}

/// Everything one render cycle of the dashboard needs for its charts.
#[derive(SimpleObject)]
struct SurveyStat {
    /// The number of loaded records.
    total_count: usize,

    /// The number of records matching the filter.
    filtered_count: usize,

    /// Respondents per age band, in fixed band order.
    age_distribution: Vec<CategoryCount>,

    /// Familiarity with violence against women, in fixed level order.
    violence_familiarity: Vec<CategoryCount>,

    /// Recognized forms of violence, most recognized first.
    violence_types: Vec<CategoryCount>,

    /// Perceived prevalence of physical violence, in fixed level order.
    physical_violence_prevalence: Vec<CategoryCount>,

    /// Common locations of violence, most cited first.
    violence_location: Vec<CategoryCount>,

    /// Barriers to reporting sexual violence, most cited first.
    reporting_barriers: Vec<CategoryCount>,
}

#[derive(Default)]
pub(super) struct SurveyStatQuery {}

#[Object]
impl SurveyStatQuery {
    #[allow(clippy::unused_async)]
    async fn survey_stat(
        &self,
        ctx: &Context<'_>,
        filter: RespondentFilter,
    ) -> Result<SurveyStat> {
        let db = ctx.data::<Database>()?;
        let records = db.records();
        let filtered = report::filter(&records, &filter.into());
        let tables = report::aggregate(&filtered);

        Ok(SurveyStat {
            total_count: records.len(),
            filtered_count: filtered.len(),
            age_distribution: to_counts(tables.age_distribution),
            violence_familiarity: to_counts(tables.violence_familiarity),
            violence_types: to_counts(tables.violence_types),
            physical_violence_prevalence: to_counts(tables.physical_violence_prevalence),
            violence_location: to_counts(tables.violence_location),
            reporting_barriers: to_counts(tables.reporting_barriers),
        })
    }
}
