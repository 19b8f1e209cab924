use bb8_postgres::PostgresConnectionManager;
use tokio_postgres::NoTls;

pub type Pool = bb8::Pool<PostgresConnectionManager<NoTls>>;
pub type Client<'a> = bb8::PooledConnection<'a, PostgresConnectionManager<NoTls>>;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

pub async fn pool(database_url: &str) -> anyhow::Result<Pool> {
    let mgr = PostgresConnectionManager::new(database_url.parse()?, NoTls);
    let pool = bb8::Pool::builder().build(mgr).await?;
    Ok(pool)
}

pub async fn migrate(database_url: &str) -> anyhow::Result<()> {
    let pool = pool(database_url).await?;
    let mut conn = pool.dedicated_connection().await?;

    log::info!("running migrations");
    embedded::migrations::runner().run_async(&mut conn).await?;
    Ok(())
}

/// Drops everything and rebuilds the schema from the embedded migrations.
pub async fn reset(database_url: &str) -> anyhow::Result<()> {
    let pool = pool(database_url).await?;
    {
        let client = pool.get().await?;
        client
            .batch_execute("DROP SCHEMA public CASCADE; CREATE SCHEMA public;")
            .await?;
    }
    migrate(database_url).await
}
