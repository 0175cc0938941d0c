mod insight;
mod status;
mod survey_stat;

use async_graphql::{EmptyMutation, EmptySubscription, MergedObject};

use crate::database::Database;

/// A set of queries defined in the schema.
///
/// This is exposed only for [`Schema`], and not used directly.
#[derive(Default, MergedObject)]
pub(crate) struct Query(
    insight::InsightQuery,
    status::StatusQuery,
    survey_stat::SurveyStatQuery,
);

pub(crate) type Schema = async_graphql::Schema<Query, EmptyMutation, EmptySubscription>;

pub(crate) fn schema(database: Database) -> Schema {
    Schema::build(Query::default(), EmptyMutation, EmptySubscription)
        .data(database)
        .finish()
}

#[cfg(test)]
struct TestSchema {
    db: Database,
    schema: Schema,
}

#[cfg(test)]
impl TestSchema {
    fn new() -> Self {
        let db = Database::new();
        let schema = schema(db.clone());
        Self { db, schema }
    }

    async fn execute(&self, query: &str) -> async_graphql::Response {
        let request: async_graphql::Request = query.into();
        self.schema.execute(request).await
    }
}
