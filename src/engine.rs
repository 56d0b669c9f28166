//! The main entry point of the weather intelligence engine.
//!
//! A [`WeatherScope`] owns the city registry, the geocoder, the forecast
//! fetcher and the snapshot cache, and wires them into the refresh cycle:
//! registry mutation changes the snapshot key, the cache decides whether a
//! fresh fetch is needed, fetch-and-partition runs per city, and the result
//! is assembled into presentation-ready [`CityWeather`] records.

use crate::cache::SnapshotCache;
use crate::error::WeatherScopeError;
use crate::forecast::fetch::ForecastFetcher;
use crate::geocode::client::GeocoderClient;
use crate::registry::city_registry::CityRegistry;
use crate::registry::error::RegistryError;
use crate::types::location::Location;
use crate::types::snapshot::{CityWeather, WeatherSnapshot};
use bon::bon;
use chrono::{NaiveDate, Utc};
use futures_util::future::join_all;
use log::{info, warn};
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_HISTORY_DAYS: u32 = 10;
const DEFAULT_FORECAST_DAYS: u32 = 7;
const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// The engine: a user-editable set of named cities plus the fetch, partition,
/// aggregation and caching discipline around it.
///
/// Create one per session with [`WeatherScope::builder()`]. All mutation goes
/// through [`add_city`](Self::add_city),
/// [`add_city_by_search`](Self::add_city_by_search) and
/// [`remove_cities`](Self::remove_cities); there is no other way to touch the
/// registry, so cache consistency follows from the snapshot key alone.
///
/// # Examples
///
/// ```no_run
/// use weatherscope::{Metric, WeatherScope, WeatherScopeError};
///
/// # async fn run() -> Result<(), WeatherScopeError> {
/// // Default seed cities, 10 historical + 7 forecast days, 10 minute TTL.
/// let engine = WeatherScope::builder().build()?;
/// let feed = engine.refresh().call().await;
/// for city in &feed {
///     println!("{}: {:.1} °C now", city.name, city.metric(Metric::Current));
/// }
/// # Ok(())
/// # }
/// ```
pub struct WeatherScope {
    registry: CityRegistry,
    geocoder: GeocoderClient,
    fetcher: ForecastFetcher,
    cache: SnapshotCache,
    history_days: u32,
    forecast_days: u32,
}

#[bon]
impl WeatherScope {
    /// Builds an engine.
    ///
    /// # Arguments
    ///
    /// * `.cities(Vec<Location>)`: Optional. Initial registry contents,
    ///   validated like any other add. Defaults to
    ///   [`default_cities`](crate::default_cities); pass an empty vector for
    ///   an empty registry.
    /// * `.history_days(u32)`: Optional. Days before "now" in the fetch
    ///   window. Defaults to `10`.
    /// * `.forecast_days(u32)`: Optional. Days from "now" (inclusive) in the
    ///   fetch window. Defaults to `7`.
    /// * `.ttl(Duration)`: Optional. Maximum age of a cached refresh.
    ///   Defaults to 600 seconds.
    /// * `.forecast_url(String)` / `.geocoding_url(String)`: Optional
    ///   endpoint overrides for tests or self-hosted providers.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherScopeError::Registry`] when an initial city violates
    /// the registry invariants, and the client-build variants of
    /// [`GeocodeError`](crate::GeocodeError) /
    /// [`ForecastError`](crate::ForecastError) when an HTTP client cannot be
    /// constructed.
    #[builder]
    pub fn new(
        cities: Option<Vec<Location>>,
        history_days: Option<u32>,
        forecast_days: Option<u32>,
        ttl: Option<Duration>,
        forecast_url: Option<String>,
        geocoding_url: Option<String>,
    ) -> Result<Self, WeatherScopeError> {
        let registry = match cities {
            Some(list) => {
                let mut registry = CityRegistry::new();
                for city in list {
                    registry.add(city.name, city.lat, city.lon)?;
                }
                registry
            }
            None => CityRegistry::seeded(),
        };
        let geocoder = match geocoding_url {
            Some(url) => GeocoderClient::with_base_url(url)?,
            None => GeocoderClient::new()?,
        };
        let fetcher = match forecast_url {
            Some(url) => ForecastFetcher::with_base_url(url)?,
            None => ForecastFetcher::new()?,
        };
        Ok(Self {
            registry,
            geocoder,
            fetcher,
            cache: SnapshotCache::new(ttl.unwrap_or(DEFAULT_TTL)),
            history_days: history_days.unwrap_or(DEFAULT_HISTORY_DAYS),
            forecast_days: forecast_days.unwrap_or(DEFAULT_FORECAST_DAYS),
        })
    }

    /// Adds a city with explicit coordinates.
    ///
    /// # Errors
    ///
    /// See [`CityRegistry::add`].
    pub fn add_city(
        &mut self,
        name: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Result<Location, RegistryError> {
        self.registry.add(name, lat, lon)
    }

    /// Resolves a free-text query through the geocoder and adds the first
    /// candidate under its canonical name.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherScopeError::Geocode`] when the query cannot be
    /// resolved (including `LocationNotFound` for an empty result set) and
    /// [`WeatherScopeError::Registry`] when the resolved name is already
    /// registered.
    pub async fn add_city_by_search(&mut self, query: &str) -> Result<Location, WeatherScopeError> {
        let place = self.geocoder.resolve(query).await?;
        info!(
            "Geocoded '{}' to '{}' at ({}, {})",
            query, place.name, place.lat, place.lon
        );
        Ok(self.registry.add(place.name, place.lat, place.lon)?)
    }

    /// Removes the named cities; absent names are skipped. Returns the
    /// number actually removed.
    pub fn remove_cities<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.registry.remove(names)
    }

    /// The registry's current ordered contents.
    pub fn cities(&self) -> &[Location] {
        self.registry.snapshot()
    }

    /// Produces the presentation feed, fetching from the provider only when
    /// the cache has no live entry for the current registry snapshot and
    /// evaluation date.
    ///
    /// Fetches for distinct cities run concurrently. A city whose fetch
    /// fails is logged and simply absent from the feed for this refresh;
    /// one provider failure never aborts the batch. Records come back in
    /// registry order.
    ///
    /// # Arguments
    ///
    /// * `.force(bool)`: Optional. Treat the cache as expired for this call
    ///   only. Defaults to `false`.
    /// * `.now(NaiveDate)`: Optional. Pins the evaluation date that splits
    ///   historical from forecast readings. Defaults to today (UTC).
    #[builder]
    pub async fn refresh(&self, force: Option<bool>, now: Option<NaiveDate>) -> Vec<CityWeather> {
        let force = force.unwrap_or(false);
        let now = now.unwrap_or_else(|| Utc::now().date_naive());
        let cities = self.registry.snapshot();
        let key = SnapshotCache::key(cities, now);

        let data = self
            .cache
            .get_or_fetch(key, force, || self.fetch_all(cities, now))
            .await;

        cities
            .iter()
            .filter_map(|city| {
                data.get(&city.name)
                    .cloned()
                    .map(|snapshot| CityWeather::from_snapshot(city, snapshot))
            })
            .collect()
    }

    /// Fetches every city concurrently and merges the successes.
    async fn fetch_all(
        &self,
        cities: &[Location],
        now: NaiveDate,
    ) -> HashMap<String, WeatherSnapshot> {
        let fetches = cities.iter().map(|city| async move {
            let result = self
                .fetcher
                .fetch(city, self.history_days, self.forecast_days, now)
                .await;
            (city.name.clone(), result)
        });

        let mut merged = HashMap::new();
        for (name, result) in join_all(fetches).await {
            match result {
                Ok(snapshot) => {
                    merged.insert(name, snapshot);
                }
                Err(e) => {
                    // Best-effort batch: the city is absent from this
                    // refresh, downstream treats absence as "no data now".
                    warn!("Dropping '{}' from this refresh: {}", name, e);
                }
            }
        }
        info!(
            "Refreshed {}/{} cities for {}",
            merged.len(),
            cities.len(),
            now
        );
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_seeds_default_cities() {
        let engine = WeatherScope::builder().build().unwrap();
        assert_eq!(engine.cities().len(), 5);
        assert_eq!(engine.cities()[0].name, "Mumbai");
    }

    #[test]
    fn test_builder_accepts_explicit_city_list() {
        let engine = WeatherScope::builder()
            .cities(vec![Location::new("Pune", 18.5204, 73.8567)])
            .build()
            .unwrap();
        assert_eq!(engine.cities().len(), 1);
    }

    #[test]
    fn test_builder_rejects_invalid_seed_city() {
        let result = WeatherScope::builder()
            .cities(vec![Location::new("Nowhere", 123.0, 0.0)])
            .build();
        assert!(matches!(
            result,
            Err(WeatherScopeError::Registry(
                RegistryError::InvalidCoordinate { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_refresh_on_empty_registry_is_empty_and_offline() {
        // No cities means no provider calls; an unroutable URL proves it.
        let engine = WeatherScope::builder()
            .cities(vec![])
            .forecast_url("http://127.0.0.1:1/forecast".to_string())
            .build()
            .unwrap();
        let feed = engine.refresh().call().await;
        assert!(feed.is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetches_leave_cities_absent() {
        // Unroutable provider: every fetch fails, the batch still completes.
        let engine = WeatherScope::builder()
            .forecast_url("http://127.0.0.1:1/forecast".to_string())
            .build()
            .unwrap();
        let feed = engine.refresh().call().await;
        assert!(feed.is_empty());
        assert_eq!(engine.cities().len(), 5);
    }

    #[test]
    fn test_mutations_route_through_the_registry() {
        let mut engine = WeatherScope::builder()
            .cities(vec![])
            .build()
            .unwrap();
        engine.add_city("Pune", 18.5204, 73.8567).unwrap();
        assert!(matches!(
            engine.add_city("Pune", 18.5204, 73.8567),
            Err(RegistryError::DuplicateName(_))
        ));
        assert_eq!(engine.remove_cities(["Pune", "Nagpur"]), 1);
        assert!(engine.cities().is_empty());
    }
}
