use clap::Parser;
use cli::{Cli, Command};

mod cli;
mod collector;
mod config;
mod db;
mod models;
mod openweather;
mod repos;
mod store;
mod tools;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Cli::parse();

    match args.cmd {
        Command::Run { mode } => {
            tools::collect::exec(&args.database_url, mode).await.unwrap();
        }
        Command::Bench => {
            tools::bench::exec(&args.database_url).await.unwrap();
        }
        Command::Db(db_cmd) => match db_cmd.cmd {
            cli::DbSubCommand::Migrate => {
                db::migrate(&args.database_url).await.unwrap();
            }
            cli::DbSubCommand::Reset => {
                let confirmed = dialoguer::Confirm::new()
                    .with_prompt("Drop all weather data and re-run migrations?")
                    .default(false)
                    .interact()
                    .unwrap();
                if confirmed {
                    db::reset(&args.database_url).await.unwrap();
                }
            }
        },
        Command::City(city_cmd) => {
            tools::cities::exec(&args.database_url, city_cmd.cmd).await.unwrap();
        }
        Command::Stats => {
            tools::stats::exec(&args.database_url).await.unwrap();
        }
    }
}
