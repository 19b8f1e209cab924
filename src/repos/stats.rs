use chrono::{DateTime, Utc};
use tokio_postgres::Row;

use crate::db;

/// Row of the `rainfall_counts` view: rain accumulated per city over a
/// reporting window.
#[derive(Clone, Debug)]
pub struct RainfallCount {
    pub city_name: String,
    pub time_frame: String,
    pub total_rain: f64,
}

impl TryFrom<&Row> for RainfallCount {
    type Error = tokio_postgres::Error;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(RainfallCount {
            city_name: row.try_get("city_name")?,
            time_frame: row.try_get("time_frame")?,
            total_rain: row.try_get("total_rain")?,
        })
    }
}

/// Row of the `temperature_extremes` view: hottest and coldest city per
/// hourly, daily or weekly bucket.
#[derive(Clone, Debug)]
pub struct TemperatureExtreme {
    pub time_frame: DateTime<Utc>,
    pub bucket: String,
    pub hottest_city: String,
    pub highest_temperature: f64,
    pub coldest_city: String,
    pub lowest_temperature: f64,
}

impl TryFrom<&Row> for TemperatureExtreme {
    type Error = tokio_postgres::Error;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(TemperatureExtreme {
            time_frame: row.try_get("time_frame")?,
            bucket: row.try_get("bucket")?,
            hottest_city: row.try_get("hottest_city")?,
            highest_temperature: row.try_get("highest_temperature")?,
            coldest_city: row.try_get("coldest_city")?,
            lowest_temperature: row.try_get("lowest_temperature")?,
        })
    }
}

pub async fn rainfall_counts<'a>(client: &db::Client<'a>) -> anyhow::Result<Vec<RainfallCount>> {
    let rows = client
        .query(
            "SELECT city_name, time_frame, total_rain::float8 AS total_rain \
             FROM rainfall_counts",
            &[],
        )
        .await?;
    let counts = super::from_rows(rows)?;
    Ok(counts)
}

pub async fn temperature_extremes<'a>(
    client: &db::Client<'a>,
    limit: i64,
) -> anyhow::Result<Vec<TemperatureExtreme>> {
    let rows = client
        .query(
            "SELECT time_frame, bucket, hottest_city, highest_temperature, \
                    coldest_city, lowest_temperature \
             FROM temperature_extremes LIMIT $1",
            &[&limit],
        )
        .await?;
    let extremes = super::from_rows(rows)?;
    Ok(extremes)
}
