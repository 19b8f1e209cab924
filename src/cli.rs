use clap::{Parser, Subcommand};

use crate::collector::Mode;

#[derive(Debug, Parser)]
#[command(about = "Nimbus city weather collector.")]
pub struct Cli {
    #[arg(env = "NIMBUS_DATABASE_URL", short, long)]
    pub database_url: String,
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and store one observation per known city.
    Run {
        /// Execution mode for the per-city unit steps.
        #[arg(env = "NIMBUS_MODE", long, value_enum, default_value_t = Mode::Thread)]
        mode: Mode,
    },
    /// Time both execution modes over the current city set.
    Bench,
    Db(DbCommand),
    City(CityCommand),
    /// Print rainfall totals and temperature extremes.
    Stats,
}

#[derive(Debug, Parser)]
pub struct DbCommand {
    #[command(subcommand)]
    pub cmd: DbSubCommand,
}

#[derive(Debug, Subcommand)]
pub enum DbSubCommand {
    Migrate,
    Reset,
}

#[derive(Debug, Parser)]
pub struct CityCommand {
    #[command(subcommand)]
    pub cmd: CitySubCommand,
}

#[derive(Debug, Subcommand)]
pub enum CitySubCommand {
    /// Start tracking a city.
    Add { city: String, country: String },
    /// List tracked cities.
    List,
}
