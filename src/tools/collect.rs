use std::sync::Arc;
use std::time::Instant;

use crate::collector::{Collector, Mode, RunReport};
use crate::config::ApiConfig;
use crate::db;
use crate::openweather::OpenWeather;
use crate::store::PgStorage;

pub async fn exec(database_url: &str, mode: Mode) -> anyhow::Result<()> {
    let api_config = ApiConfig::from_env()?;
    let pool = db::pool(database_url).await?;
    run_with(pool, &api_config, mode).await?;
    Ok(())
}

/// Wires the live API client and storage into a collector and runs it once,
/// logging wall-clock time and the stored/attempted tally.
pub async fn run_with(
    pool: db::Pool,
    api_config: &ApiConfig,
    mode: Mode,
) -> anyhow::Result<RunReport> {
    let api = Arc::new(OpenWeather::new(api_config));
    let storage = Arc::new(PgStorage::new(pool));
    let collector = Collector::new(api, storage, mode);

    log::info!("starting {} run", mode.label());
    let started = Instant::now();
    let report = collector.run().await?;
    log::info!(
        "{} run finished in {:.2?}: {}/{} cities stored",
        mode.label(),
        started.elapsed(),
        report.succeeded(),
        report.attempted(),
    );
    Ok(report)
}
