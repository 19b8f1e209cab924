use tokio_postgres::Transaction;

use crate::db;
use crate::models::WeatherObservation;

/// Appends one observation row. `recorded_at` is left to the column default.
pub async fn create(tx: &Transaction<'_>, observation: &WeatherObservation) -> anyhow::Result<()> {
    tx.execute(
        "INSERT INTO weather_observations \
         (country_name, city_name, temperature, humidity, pressure, rain, description) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
        &[
            &observation.country_name,
            &observation.city_name,
            &observation.temperature,
            &observation.humidity,
            &observation.pressure,
            &observation.rain,
            &observation.description,
        ],
    )
    .await?;
    Ok(())
}

pub async fn count<'a>(client: &db::Client<'a>) -> anyhow::Result<i64> {
    let row = client
        .query_one("SELECT count(*) FROM weather_observations", &[])
        .await?;
    Ok(row.get(0))
}
