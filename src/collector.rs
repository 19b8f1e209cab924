//! The collection pipeline: list known cities, geocode them, then fetch and
//! persist one observation per city under the configured execution mode.
//!
//! A failure stays confined to its city. Only an unreadable city list fails
//! the run as a whole.

use std::sync::Arc;

use async_trait::async_trait;
use clap::ValueEnum;
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::models::{Coordinate, Location, WeatherObservation};
use crate::openweather::CurrentWeather;

/// Upper bound on in-flight unit tasks in [`Mode::Thread`]. The current value
/// puts no practical limit on fan-out, which holds up for city counts in the
/// tens; lower it to cap fan-out without touching the orchestration.
const MAX_IN_FLIGHT_UNITS: usize = Semaphore::MAX_PERMITS;

/// External weather API: geocoding plus current conditions.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn coordinates(&self, location: &Location) -> anyhow::Result<Coordinate>;
    async fn current_weather(&self, coordinate: Coordinate) -> anyhow::Result<CurrentWeather>;
}

/// Relational storage consumed by the collector.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn list_cities(&self) -> anyhow::Result<Vec<Location>>;
    async fn store_observation(&self, observation: &WeatherObservation) -> anyhow::Result<()>;
}

/// How unit steps (fetch-then-persist, one per city) are scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// One concurrent task per city, joined before the run completes.
    Thread,
    /// Cities processed strictly one after another.
    Sequential,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Thread => "thread",
            Mode::Sequential => "sequential",
        }
    }
}

#[derive(Debug, Error)]
pub enum CollectError {
    /// The city list could not be read; nothing can run.
    #[error("city storage unavailable: {0}")]
    StorageUnavailable(anyhow::Error),
    #[error("geocoding lookup failed: {0}")]
    Geocode(anyhow::Error),
    #[error("weather lookup failed: {0}")]
    Weather(anyhow::Error),
    #[error("observation persist failed: {0}")]
    Persist(anyhow::Error),
}

/// Outcome of one city within a run.
#[derive(Debug)]
pub struct CityOutcome {
    pub location: Location,
    pub result: Result<(), CollectError>,
}

/// Everything a finished run reports: one outcome per known city, whether it
/// was stored or skipped.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<CityOutcome>,
}

impl RunReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }
}

pub struct Collector<A, S> {
    api: Arc<A>,
    storage: Arc<S>,
    mode: Mode,
}

impl<A, S> Collector<A, S>
where
    A: WeatherApi + 'static,
    S: Storage + 'static,
{
    pub fn new(api: Arc<A>, storage: Arc<S>, mode: Mode) -> Self {
        Self { api, storage, mode }
    }

    /// Collects one observation per known city and reports per-city outcomes.
    pub async fn run(&self) -> Result<RunReport, CollectError> {
        let cities = self
            .storage
            .list_cities()
            .await
            .map_err(CollectError::StorageUnavailable)?;

        if cities.is_empty() {
            log::info!("no cities to process");
            return Ok(RunReport::default());
        }

        let (resolved, mut outcomes) = self.resolve(cities).await;

        let unit_outcomes = match self.mode {
            Mode::Sequential => self.run_sequential(resolved).await,
            Mode::Thread => self.run_threaded(resolved).await,
        };
        outcomes.extend(unit_outcomes);

        Ok(RunReport { outcomes })
    }

    /// Geocodes every city, splitting the set into resolved pairs and failed
    /// outcomes. A city with no match never blocks the rest.
    async fn resolve(
        &self,
        cities: Vec<Location>,
    ) -> (Vec<(Location, Coordinate)>, Vec<CityOutcome>) {
        let mut resolved = Vec::with_capacity(cities.len());
        let mut failed = Vec::new();

        for location in cities {
            match self.api.coordinates(&location).await {
                Ok(coordinate) => resolved.push((location, coordinate)),
                Err(err) => {
                    log::warn!(
                        "skipping {}, {}: {err}",
                        location.city_name,
                        location.country_name
                    );
                    failed.push(CityOutcome {
                        location,
                        result: Err(CollectError::Geocode(err)),
                    });
                }
            }
        }

        (resolved, failed)
    }

    async fn run_sequential(&self, resolved: Vec<(Location, Coordinate)>) -> Vec<CityOutcome> {
        let mut outcomes = Vec::with_capacity(resolved.len());
        for (location, coordinate) in resolved {
            let result = collect_one(&*self.api, &*self.storage, &location, coordinate).await;
            outcomes.push(CityOutcome { location, result });
        }
        outcomes
    }

    async fn run_threaded(&self, resolved: Vec<(Location, Coordinate)>) -> Vec<CityOutcome> {
        let semaphore = Arc::new(Semaphore::new(MAX_IN_FLIGHT_UNITS));

        let handles: Vec<_> = resolved
            .into_iter()
            .map(|(location, coordinate)| {
                let api = Arc::clone(&self.api);
                let storage = Arc::clone(&self.storage);
                let semaphore = Arc::clone(&semaphore);
                tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .expect("unit semaphore closed");
                    let result = collect_one(&*api, &*storage, &location, coordinate).await;
                    CityOutcome { location, result }
                })
            })
            .collect();

        // Join barrier: outcomes travel back through the handles, so tasks
        // share no mutable state.
        futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.expect("unit task panicked"))
            .collect()
    }
}

/// The unit step for one resolved city: fetch current conditions, persist the
/// observation. A single attempt, no retries.
async fn collect_one<A, S>(
    api: &A,
    storage: &S,
    location: &Location,
    coordinate: Coordinate,
) -> Result<(), CollectError>
where
    A: WeatherApi,
    S: Storage,
{
    let result = fetch_and_store(api, storage, location, coordinate).await;
    match &result {
        Ok(()) => log::info!("stored weather for {}", location.city_name),
        Err(err) => log::error!("failed to store weather for {}: {err}", location.city_name),
    }
    result
}

async fn fetch_and_store<A, S>(
    api: &A,
    storage: &S,
    location: &Location,
    coordinate: Coordinate,
) -> Result<(), CollectError>
where
    A: WeatherApi,
    S: Storage,
{
    let payload = api
        .current_weather(coordinate)
        .await
        .map_err(CollectError::Weather)?;
    let observation = payload
        .into_observation(&location.city_name)
        .map_err(CollectError::Weather)?;
    storage
        .store_observation(&observation)
        .await
        .map_err(CollectError::Persist)?;
    Ok(())
}
