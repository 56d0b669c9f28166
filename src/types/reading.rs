//! Daily temperature readings and their historical/forecast labeling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which side of the evaluation date a daily reading falls on.
///
/// A reading is `Historical` when its date is strictly before the evaluation
/// date, `Forecast` otherwise (the evaluation day itself counts as forecast).
/// The label is derived from the date at fetch time, never from the reading's
/// position in the provider's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Historical,
    Forecast,
}

impl Segment {
    /// Labels a reading date relative to the evaluation date.
    pub fn for_date(date: NaiveDate, evaluated_on: NaiveDate) -> Self {
        if date < evaluated_on {
            Self::Historical
        } else {
            Self::Forecast
        }
    }
}

/// One day of provider data: calendar date plus max/min temperature,
/// labeled with the [`Segment`] it belonged to when fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReading {
    pub date: NaiveDate,
    pub max_temp: f64,
    pub min_temp: f64,
    pub segment: Segment,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_day_before_is_historical() {
        assert_eq!(
            Segment::for_date(d(2026, 8, 24), d(2026, 8, 25)),
            Segment::Historical
        );
    }

    #[test]
    fn test_evaluation_day_is_forecast() {
        assert_eq!(
            Segment::for_date(d(2026, 8, 25), d(2026, 8, 25)),
            Segment::Forecast
        );
    }

    #[test]
    fn test_day_after_is_forecast() {
        assert_eq!(
            Segment::for_date(d(2026, 8, 26), d(2026, 8, 25)),
            Segment::Forecast
        );
    }
}
