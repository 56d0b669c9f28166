//! Per-location fetch results and the outbound presentation record.

use crate::types::location::Location;
use crate::types::metric::Metric;
use crate::types::reading::DailyReading;
use serde::{Deserialize, Serialize};

/// The result of one successful forecast fetch for one location.
///
/// `avg_max` and `avg_min` are arithmetic means over the *entire* fetched
/// window (historical and forecast days combined), not one segment.
/// A snapshot is computed fresh on each fetch and replaced wholesale; it is
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Current-instant temperature from the provider's live reading.
    pub current_temp: f64,
    /// Chronologically ordered daily readings, historical then forecast.
    pub daily_series: Vec<DailyReading>,
    /// Mean of all `max_temp` values in `daily_series`.
    pub avg_max: f64,
    /// Mean of all `min_temp` values in `daily_series`.
    pub avg_min: f64,
}

/// One record of the engine's outbound feed, ready for a map or chart
/// renderer: the location joined with its summary scalars and series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityWeather {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub current: f64,
    pub avg_max: f64,
    pub avg_min: f64,
    pub series: Vec<DailyReading>,
}

impl CityWeather {
    /// Joins a registry location with its fetched snapshot.
    pub fn from_snapshot(location: &Location, snapshot: WeatherSnapshot) -> Self {
        Self {
            name: location.name.clone(),
            lat: location.lat,
            lon: location.lon,
            current: snapshot.current_temp,
            avg_max: snapshot.avg_max,
            avg_min: snapshot.avg_min,
            series: snapshot.daily_series,
        }
    }

    /// The scalar driving the color scale for the selected [`Metric`].
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Current => self.current,
            Metric::AvgMax => self.avg_max,
            Metric::AvgMin => self.avg_min,
        }
    }
}
