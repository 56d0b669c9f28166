//! The metric variants that drive map coloring and ranking, and their
//! projection onto a fetched snapshot.

use crate::types::snapshot::WeatherSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a metric string from a UI or config does not name one of the
/// three known metrics. There is deliberately no default: an unrecognized
/// selection must surface instead of silently falling back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric '{0}', expected one of: current, avg_max, avg_min")]
pub struct UnknownMetric(pub String);

/// Which per-location scalar drives the presentation layer's color scale.
///
/// The set is closed, so [`Metric::select`] is an exhaustive projection and
/// cannot fail. Parsing user-facing strings happens through [`FromStr`],
/// which fails with [`UnknownMetric`] for anything else.
///
/// # Examples
///
/// ```
/// use weatherscope::Metric;
///
/// let metric: Metric = "avg_max".parse().unwrap();
/// assert_eq!(metric, Metric::AvgMax);
/// assert!("humidity".parse::<Metric>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// The current-instant temperature.
    Current,
    /// Mean daily maximum over the fetched window.
    AvgMax,
    /// Mean daily minimum over the fetched window.
    AvgMin,
}

impl Metric {
    /// Projects the selected scalar out of a snapshot.
    pub fn select(&self, snapshot: &WeatherSnapshot) -> f64 {
        match self {
            Self::Current => snapshot.current_temp,
            Self::AvgMax => snapshot.avg_max,
            Self::AvgMin => snapshot.avg_min,
        }
    }

    /// Short label for legends and popups.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::AvgMax => "Avg Max",
            Self::AvgMin => "Avg Min",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both the snake_case serde names and the variant names
        // themselves ("avg_max", "AvgMax", ...).
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "current" => Ok(Self::Current),
            "avgmax" => Ok(Self::AvgMax),
            "avgmin" => Ok(Self::AvgMin),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}
