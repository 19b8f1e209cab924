use crate::db;
use crate::repos;

pub async fn exec(database_url: &str) -> anyhow::Result<()> {
    let pool = db::pool(database_url).await?;
    let client = pool.get().await?;

    let total = repos::observations::count(&client).await?;
    println!("{total} observations stored");

    println!("\nRainfall totals:");
    let counts = repos::stats::rainfall_counts(&client).await?;
    if counts.is_empty() {
        println!("  (none)");
    }
    for row in counts {
        println!(
            "  {:<20} {:<26} {:>8.2} mm",
            row.city_name, row.time_frame, row.total_rain
        );
    }

    println!("\nTemperature extremes:");
    let extremes = repos::stats::temperature_extremes(&client, 20).await?;
    if extremes.is_empty() {
        println!("  (none)");
    }
    for row in extremes {
        println!(
            "  {:<7} {}  hottest {} ({:.1} K)  coldest {} ({:.1} K)",
            row.bucket,
            row.time_frame.format("%Y-%m-%d %H:%M"),
            row.hottest_city,
            row.highest_temperature,
            row.coldest_city,
            row.lowest_temperature,
        );
    }
    Ok(())
}
