use std::time::Instant;

use crate::collector::Mode;
use crate::config::ApiConfig;
use crate::db;
use crate::tools::collect;

/// Runs one full collection per execution mode, thread first, and logs the
/// wall-clock comparison. Every run appends rows like a normal one.
pub async fn exec(database_url: &str) -> anyhow::Result<()> {
    let api_config = ApiConfig::from_env()?;
    let pool = db::pool(database_url).await?;

    for mode in [Mode::Thread, Mode::Sequential] {
        let started = Instant::now();
        let report = collect::run_with(pool.clone(), &api_config, mode).await?;
        log::info!(
            "benchmark {}: {:.2?} over {} cities ({} stored)",
            mode.label(),
            started.elapsed(),
            report.attempted(),
            report.succeeded(),
        );
    }
    Ok(())
}
