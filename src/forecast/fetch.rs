//! Fetches a combined historical+forecast daily series from the Open-Meteo
//! forecast endpoint and partitions it into labeled segments.
//!
//! One call covers `history_days` days before the evaluation date through
//! `forecast_days` days from it (the evaluation day included), plus a
//! current-instant reading. Each returned day is labeled
//! [`Segment::Historical`] or [`Segment::Forecast`] strictly by comparing its
//! date to the evaluation date, never by its position in the response, so a
//! provider returning more or fewer days than requested is tolerated.

use crate::forecast::error::ForecastError;
use crate::types::location::Location;
use crate::types::reading::{DailyReading, Segment};
use crate::types::snapshot::WeatherSnapshot;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<NaiveDate>,
    // Open-Meteo reports individual days as null when a value is unavailable.
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
}

/// Per-location client for the Open-Meteo forecast endpoint.
#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    client: Client,
    base_url: String,
}

impl ForecastFetcher {
    /// Creates a fetcher against the public Open-Meteo forecast endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::ClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self, ForecastError> {
        Self::with_base_url(FORECAST_URL.to_string())
    }

    /// Creates a fetcher against a custom endpoint (tests, self-hosted
    /// Open-Meteo instances).
    pub fn with_base_url(base_url: String) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(ForecastError::ClientBuild)?;
        Ok(Self { client, base_url })
    }

    /// Fetches and partitions the daily window for one location.
    ///
    /// # Errors
    ///
    /// Returns the network/decode variants on transport failure,
    /// [`ForecastError::MalformedResponse`] when the `daily` or
    /// `current_weather` block is absent, and [`ForecastError::EmptySeries`]
    /// when no usable daily reading remains.
    pub async fn fetch(
        &self,
        location: &Location,
        history_days: u32,
        forecast_days: u32,
        evaluated_on: NaiveDate,
    ) -> Result<WeatherSnapshot, ForecastError> {
        let url = format!(
            "{}?latitude={}&longitude={}&daily=temperature_2m_max,temperature_2m_min\
             &past_days={}&forecast_days={}&current_weather=true&timezone=auto",
            self.base_url, location.lat, location.lon, history_days, forecast_days
        );
        debug!("Fetching forecast for '{}' via {}", location.name, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ForecastError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("Forecast HTTP error for '{}': {:?}", location.name, e);
                return Err(if let Some(status) = e.status() {
                    ForecastError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ForecastError::NetworkRequest(url, e)
                });
            }
        };

        let body: ForecastResponse =
            response.json().await.map_err(|e| ForecastError::Decode {
                url: url.clone(),
                source: e,
            })?;

        snapshot_from_response(body, &location.name, evaluated_on)
    }
}

/// Assembles a [`WeatherSnapshot`] out of a decoded provider response.
fn snapshot_from_response(
    body: ForecastResponse,
    name: &str,
    evaluated_on: NaiveDate,
) -> Result<WeatherSnapshot, ForecastError> {
    let current = body
        .current_weather
        .ok_or_else(|| ForecastError::MalformedResponse {
            name: name.to_string(),
            block: "current_weather",
        })?;
    let daily = body.daily.ok_or_else(|| ForecastError::MalformedResponse {
        name: name.to_string(),
        block: "daily",
    })?;

    let daily_series = build_series(&daily, name, evaluated_on);
    let (avg_max, avg_min) =
        window_averages(&daily_series).ok_or_else(|| ForecastError::EmptySeries {
            name: name.to_string(),
        })?;

    Ok(WeatherSnapshot {
        current_temp: current.temperature,
        daily_series,
        avg_max,
        avg_min,
    })
}

/// Zips the provider's parallel arrays into labeled readings, preserving
/// provider (chronological) order. Days with a null max or min are dropped.
fn build_series(daily: &DailyBlock, name: &str, evaluated_on: NaiveDate) -> Vec<DailyReading> {
    daily
        .time
        .iter()
        .enumerate()
        .filter_map(|(i, &date)| {
            let max = daily.temperature_2m_max.get(i).copied().flatten();
            let min = daily.temperature_2m_min.get(i).copied().flatten();
            match (max, min) {
                (Some(max_temp), Some(min_temp)) => Some(DailyReading {
                    date,
                    max_temp,
                    min_temp,
                    segment: Segment::for_date(date, evaluated_on),
                }),
                _ => {
                    debug!("Dropping null daily reading for '{}' on {}", name, date);
                    None
                }
            }
        })
        .collect()
}

/// Arithmetic means of max and min over the whole series, or `None` when the
/// series is empty (so the caller can fail instead of producing NaN).
fn window_averages(series: &[DailyReading]) -> Option<(f64, f64)> {
    if series.is_empty() {
        return None;
    }
    let n = series.len() as f64;
    let max_sum: f64 = series.iter().map(|r| r.max_temp).sum();
    let min_sum: f64 = series.iter().map(|r| r.min_temp).sum();
    Some((max_sum / n, min_sum / n))
}
