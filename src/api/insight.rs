use async_graphql::{Context, Object, Result, SimpleObject};

use crate::{database::Database, report};

use super::survey_stat::RespondentFilter;

/// The generated narrative for one filtered view.
#[derive(SimpleObject)]
struct Insight {
    /// The headline statistic.
    headline: String,

    /// Three supporting percentage sentences.
    bullets: Vec<String>,
}

#[derive(Default)]
pub(super) struct InsightQuery {}

#[Object]
impl InsightQuery {
    #[allow(clippy::unused_async)]
    async fn insights(&self, ctx: &Context<'_>, filter: RespondentFilter) -> Result<Insight> {
        let db = ctx.data::<Database>()?;
        let records = db.records();
        let filtered = report::filter(&records, &filter.into());
        let generated = report::insights(&filtered);

        Ok(Insight {
            headline: generated.headline,
            bullets: generated.bullets,
        })
    }
}
