use async_trait::async_trait;

use crate::collector::Storage;
use crate::db;
use crate::models::{Location, WeatherObservation};
use crate::repos;

/// PostgreSQL-backed [`Storage`]. Every persist call checks out its own
/// pooled connection and transaction, so concurrent unit tasks never share
/// session state.
pub struct PgStorage {
    pool: db::Pool,
}

impl PgStorage {
    pub fn new(pool: db::Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn list_cities(&self) -> anyhow::Result<Vec<Location>> {
        let client = self.pool.get().await?;
        repos::cities::list(&client).await
    }

    async fn store_observation(&self, observation: &WeatherObservation) -> anyhow::Result<()> {
        let mut client = self.pool.get().await?;
        // Commit only after the insert succeeds; dropping the transaction on
        // an earlier error rolls it back.
        let tx = client.transaction().await?;
        repos::observations::create(&tx, observation).await?;
        tx.commit().await?;
        Ok(())
    }
}
