use tokio_postgres::Row;

/// A (city, country) pair tracked in the `cities` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub city_name: String,
    pub country_name: String,
}

// SQL derivation
impl TryFrom<&Row> for Location {
    type Error = tokio_postgres::Error;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Location {
            city_name: row.try_get("city_name")?,
            country_name: row.try_get("country_name")?,
        })
    }
}

/// Geographic position of a city, resolved once per collection run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// One weather measurement for a city, ready to be appended to storage.
/// `recorded_at` is assigned by the database on insert.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherObservation {
    pub country_name: String,
    pub city_name: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub rain: f64,
    pub description: String,
}
