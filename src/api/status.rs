use async_graphql::{Context, Enum, Object, Result, SimpleObject};

use crate::database::{Database, LoadState};

/// Message shown by the dashboard when the fetch failed.
const LOAD_FAILED_MESSAGE: &str = "Please try again later.";

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
enum LoadStatus {
    Pending,
    Loaded,
    Failed,
}

impl From<LoadState> for LoadStatus {
    fn from(state: LoadState) -> Self {
        match state {
            LoadState::Pending => Self::Pending,
            LoadState::Loaded => Self::Loaded,
            LoadState::Failed => Self::Failed,
        }
    }
}

/// Whether the one-shot survey load has completed.
#[derive(SimpleObject)]
struct DataStatus {
    status: LoadStatus,

    /// User-visible message when the load failed.
    message: Option<String>,
}

#[derive(Default)]
pub(super) struct StatusQuery {}

#[Object]
impl StatusQuery {
    #[allow(clippy::unused_async)]
    async fn load_status(&self, ctx: &Context<'_>) -> Result<DataStatus> {
        let db = ctx.data::<Database>()?;
        let state = db.load_state();
        let message = matches!(state, LoadState::Failed).then(|| LOAD_FAILED_MESSAGE.to_string());

        Ok(DataStatus {
            status: state.into(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::api::TestSchema;

    const QUERY: &str = r"
    {
        loadStatus {
            status
            message
        }
    }";

    #[tokio::test]
    async fn starts_pending() {
        let schema = TestSchema::new();
        let data = schema.execute(QUERY).await.data.into_json().unwrap();
        assert_eq!(data["loadStatus"]["status"], "PENDING");
        assert_eq!(data["loadStatus"]["message"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn loaded_after_records_arrive() {
        let schema = TestSchema::new();
        schema.db.set_records(Vec::new());
        let data = schema.execute(QUERY).await.data.into_json().unwrap();
        assert_eq!(data["loadStatus"]["status"], "LOADED");
    }

    #[tokio::test]
    async fn failed_load_carries_the_user_message() {
        let schema = TestSchema::new();
        schema.db.set_load_failed();
        let data = schema.execute(QUERY).await.data.into_json().unwrap();
        assert_eq!(data["loadStatus"]["status"], "FAILED");
        assert_eq!(data["loadStatus"]["message"], "Please try again later.");
    }
}
