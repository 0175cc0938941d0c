mod api;
mod database;
mod outbound;
mod record;
mod report;
mod settings;
mod web;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use crate::database::Database;
use crate::settings::{Args, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt::init();

    let settings = Settings::load(args.config.as_deref())
        .context("problem while loading configuration")?;

    let database = Database::new();
    let schema = api::schema(database.clone());

    tokio::spawn(load_survey(settings.survey.endpoint, database));

    info!("listening on {}", settings.web.address);
    web::serve(schema, settings.web.address).await;
    Ok(())
}

/// Fetches the survey rows once at startup. There is no retry; a failed
/// load leaves the store empty and the failure visible to clients.
async fn load_survey(endpoint: String, database: Database) {
    match outbound::load(&endpoint).await {
        Ok(records) => {
            info!("loaded {} survey responses", records.len());
            database.set_records(records);
        }
        Err(error) => {
            error!("problem while loading survey responses. {error}");
            database.set_load_failed();
        }
    }
}
