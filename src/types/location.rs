//! Defines the named coordinate pair tracked by the city registry.

use serde::{Deserialize, Serialize};

/// A named geographic point tracked by the [`CityRegistry`](crate::CityRegistry).
///
/// The registry guarantees that `name` is non-empty and unique (case-sensitive)
/// within it, and that the coordinates are in range: `lat ∈ [-90, 90]`,
/// `lon ∈ [-180, 180]`. Construct through
/// [`CityRegistry::add`](crate::CityRegistry::add) to get those checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display name, unique within a registry (e.g. "Mumbai").
    pub name: String,
    /// Latitude in decimal degrees (positive for North, negative for South).
    pub lat: f64,
    /// Longitude in decimal degrees (positive for East, negative for West).
    pub lon: f64,
}

impl Location {
    /// Creates a `Location` without range or uniqueness checks.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }
}
