//! One-shot fetch of the survey rows from the spreadsheet API.

use reqwest::Client;
use thiserror::Error;

use crate::record::SurveyRecord;

const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// The one failure the loader reports. Transport errors, non-success
/// statuses, and malformed bodies all collapse into it; the dashboard only
/// ever learns that the fetch failed.
#[derive(Debug, Error)]
#[error("fetch failed")]
pub(crate) struct LoadError(#[from] reqwest::Error);

/// Fetches every survey row. One request, no retry; the endpoint returns
/// the full sheet as a JSON array.
pub(crate) async fn load(endpoint: &str) -> Result<Vec<SurveyRecord>, LoadError> {
    let client = Client::builder().user_agent(APP_USER_AGENT).build()?;
    let rows = client
        .get(endpoint)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(rows)
}
