use crate::cli::CitySubCommand;
use crate::db;
use crate::models::Location;
use crate::repos;

pub async fn exec(database_url: &str, cmd: CitySubCommand) -> anyhow::Result<()> {
    let pool = db::pool(database_url).await?;
    let client = pool.get().await?;

    match cmd {
        CitySubCommand::Add { city, country } => {
            let location = Location {
                city_name: city,
                country_name: country,
            };
            repos::cities::create(&client, &location).await?;
            println!("tracking {}, {}", location.city_name, location.country_name);
        }
        CitySubCommand::List => {
            let cities = repos::cities::list(&client).await?;
            if cities.is_empty() {
                println!("no cities tracked");
            }
            for location in cities {
                println!("{}, {}", location.city_name, location.country_name);
            }
        }
    }
    Ok(())
}
