use crate::db;
use crate::models::Location;

pub async fn list<'a>(client: &db::Client<'a>) -> anyhow::Result<Vec<Location>> {
    let rows = client
        .query(
            "SELECT city_name, country_name FROM cities ORDER BY city_name",
            &[],
        )
        .await?;
    let cities = super::from_rows(rows)?;
    Ok(cities)
}

pub async fn create<'a>(client: &db::Client<'a>, location: &Location) -> anyhow::Result<()> {
    client
        .execute(
            "INSERT INTO cities (city_name, country_name) VALUES ($1, $2)",
            &[&location.city_name, &location.country_name],
        )
        .await?;
    Ok(())
}
