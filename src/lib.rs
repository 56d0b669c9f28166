mod cache;
mod engine;
mod error;
mod forecast;
mod geocode;
mod registry;
mod types;

pub use error::WeatherScopeError;
pub use engine::*;

pub use cache::SnapshotCache;
pub use registry::city_registry::{default_cities, CityRegistry};
pub use registry::error::RegistryError;

pub use geocode::client::{GeocodedPlace, GeocoderClient};
pub use geocode::error::GeocodeError;

pub use forecast::error::ForecastError;
pub use forecast::fetch::ForecastFetcher;

pub use types::location::Location;
pub use types::metric::{Metric, UnknownMetric};
pub use types::reading::{DailyReading, Segment};
pub use types::snapshot::{CityWeather, WeatherSnapshot};
