//! Forward geocoding: resolve a free-text place name to a coordinate via the
//! Open-Meteo geocoding endpoint. Free, no API key required.

use crate::geocode::error::GeocodeError;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

/// The first (and only requested) candidate for a geocoding query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    /// The provider's canonical place name (e.g. "Pune" for "pune india").
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Country name, when the provider reports one.
    pub country: Option<String>,
}

/// Stateless client for name → coordinate lookups.
///
/// Requests exactly one candidate and performs a single attempt; there is no
/// retry or ranking logic. Transport failures surface as
/// [`GeocodeError::NetworkRequest`] / [`GeocodeError::HttpStatus`].
#[derive(Debug, Clone)]
pub struct GeocoderClient {
    client: Client,
    base_url: String,
}

impl GeocoderClient {
    /// Creates a client against the public Open-Meteo geocoding endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::ClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self, GeocodeError> {
        Self::with_base_url(GEOCODING_URL.to_string())
    }

    /// Creates a client against a custom endpoint (tests, self-hosted
    /// Open-Meteo instances).
    pub fn with_base_url(base_url: String) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(GeocodeError::ClientBuild)?;
        Ok(Self { client, base_url })
    }

    /// Resolves a free-text query to its best coordinate match.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::LocationNotFound`] when the provider has no
    /// candidate for the query, and the network/decode variants on transport
    /// or response-shape failures.
    pub async fn resolve(&self, query: &str) -> Result<GeocodedPlace, GeocodeError> {
        let url = format!(
            "{}?name={}&count=1&language=en&format=json",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!("Geocoding '{}' via {}", query, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeocodeError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("Geocoding HTTP error for '{}': {:?}", query, e);
                return Err(if let Some(status) = e.status() {
                    GeocodeError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    GeocodeError::NetworkRequest(url, e)
                });
            }
        };

        let body: GeocodingResponse = response.json().await.map_err(|e| GeocodeError::Decode {
            url: url.clone(),
            source: e,
        })?;

        // The provider omits `results` entirely when nothing matches.
        let first = body
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::LocationNotFound(query.to_string()))?;

        Ok(GeocodedPlace {
            name: first.name,
            lat: first.latitude,
            lon: first.longitude,
            country: first.country,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Hits the live Open-Meteo endpoint. Run with: cargo test -- --ignored
    async fn test_resolve_live() {
        let client = GeocoderClient::new().unwrap();
        let place = client.resolve("Mumbai").await.unwrap();
        assert!((place.lat - 19.07).abs() < 0.5);
        assert!((place.lon - 72.88).abs() < 0.5);
    }
}
