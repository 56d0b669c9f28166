//! The ordered, uniquely-named set of cities the engine tracks.
//!
//! The registry is the single owner of the city list: it is mutated only
//! through [`CityRegistry::add`] and [`CityRegistry::remove`], and read
//! through [`CityRegistry::snapshot`]. Every successful mutation changes the
//! snapshot, which is what keys the engine's cache, so mutation implicitly
//! invalidates any cached fetch results.

use crate::registry::error::RegistryError;
use crate::types::location::Location;
use std::collections::HashSet;

/// The seed list the engine starts from when no explicit city list is given.
///
/// Matches the feed's default map view over the Indian subcontinent.
pub fn default_cities() -> Vec<Location> {
    vec![
        Location::new("Mumbai", 19.0760, 72.8777),
        Location::new("Delhi", 28.6139, 77.2090),
        Location::new("Bengaluru", 12.9716, 77.5946),
        Location::new("Kolkata", 22.5726, 88.3639),
        Location::new("Chennai", 13.0827, 80.2707),
    ]
}

/// An insertion-ordered sequence of uniquely-named [`Location`]s.
///
/// # Examples
///
/// ```
/// use weatherscope::CityRegistry;
///
/// let mut registry = CityRegistry::new();
/// registry.add("Pune", 18.5204, 73.8567)?;
/// assert_eq!(registry.snapshot().len(), 1);
/// assert_eq!(registry.remove(["Pune", "Nagpur"]), 1);
/// assert!(registry.snapshot().is_empty());
/// # Ok::<(), weatherscope::RegistryError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CityRegistry {
    cities: Vec<Location>,
}

impl CityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with [`default_cities`].
    pub fn seeded() -> Self {
        Self {
            cities: default_cities(),
        }
    }

    /// Adds a city, validating the name and coordinate invariants.
    ///
    /// The registry is left unchanged on failure.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] for a blank name,
    /// [`RegistryError::InvalidCoordinate`] when `lat`/`lon` are out of range,
    /// and [`RegistryError::DuplicateName`] when the name (case-sensitive) is
    /// already present.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Result<Location, RegistryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(RegistryError::InvalidCoordinate { lat, lon });
        }
        if self.contains(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        let location = Location { name, lat, lon };
        self.cities.push(location.clone());
        Ok(location)
    }

    /// Removes every named city that is present and returns how many were
    /// removed. Names not in the registry are skipped, not errors.
    pub fn remove<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let doomed: HashSet<String> = names
            .into_iter()
            .map(|n| n.as_ref().to_string())
            .collect();
        let before = self.cities.len();
        self.cities.retain(|c| !doomed.contains(&c.name));
        before - self.cities.len()
    }

    /// The current ordered contents, used as the cache key material.
    pub fn snapshot(&self) -> &[Location] {
        &self.cities
    }

    /// Whether a city with this exact name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.cities.iter().any(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_snapshot_contains_city() {
        let mut registry = CityRegistry::new();
        let added = registry.add("Jaipur", 26.9124, 75.7873).unwrap();
        assert_eq!(added.name, "Jaipur");
        assert_eq!(registry.snapshot(), &[added]);
    }

    #[test]
    fn test_duplicate_name_fails_and_leaves_length_unchanged() {
        let mut registry = CityRegistry::new();
        registry.add("Jaipur", 26.9124, 75.7873).unwrap();
        let err = registry.add("Jaipur", 0.0, 0.0).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(n) if n == "Jaipur"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_name_uniqueness_is_case_sensitive() {
        let mut registry = CityRegistry::new();
        registry.add("Jaipur", 26.9124, 75.7873).unwrap();
        assert!(registry.add("jaipur", 26.9124, 75.7873).is_ok());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_out_of_range_coordinates_fail() {
        let mut registry = CityRegistry::new();
        assert!(matches!(
            registry.add("North of north", 90.1, 0.0),
            Err(RegistryError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            registry.add("Past the antimeridian", 0.0, -180.5),
            Err(RegistryError::InvalidCoordinate { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_boundary_coordinates_are_valid() {
        let mut registry = CityRegistry::new();
        assert!(registry.add("South pole", -90.0, 0.0).is_ok());
        assert!(registry.add("Antimeridian", 0.0, 180.0).is_ok());
    }

    #[test]
    fn test_empty_name_fails() {
        let mut registry = CityRegistry::new();
        assert!(matches!(
            registry.add("   ", 10.0, 10.0),
            Err(RegistryError::EmptyName)
        ));
    }

    #[test]
    fn test_remove_counts_only_present_names() {
        let mut registry = CityRegistry::new();
        registry.add("Jaipur", 26.9124, 75.7873).unwrap();
        let removed = registry.remove(["Jaipur", "Lucknow"]);
        assert_eq!(removed, 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut registry = CityRegistry::seeded();
        registry.add("Pune", 18.5204, 73.8567).unwrap();
        let names: Vec<&str> = registry.snapshot().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["Mumbai", "Delhi", "Bengaluru", "Kolkata", "Chennai", "Pune"]
        );
    }
}
