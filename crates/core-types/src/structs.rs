use crate::filter::weekday_name;
use crate::session::TimeOfDay;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// A single traded price. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub timestamp: NaiveDateTime,
    pub price: f64,
}

impl PriceObservation {
    pub fn new(timestamp: NaiveDateTime, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// A futures contract and its observations, strictly ordered by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    /// The contract symbol (e.g., "TUZ5").
    pub symbol: String,
    pub observations: Vec<PriceObservation>,
}

impl Ticker {
    pub fn new(symbol: impl Into<String>, observations: Vec<PriceObservation>) -> Self {
        Self {
            symbol: symbol.into(),
            observations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Formats a trading day the way the dashboard labels its traces,
/// e.g. `2025-10-01 - Wednesday`.
pub fn day_label(day: NaiveDate) -> String {
    format!("{} - {}", day.format("%Y-%m-%d"), weekday_name(day.weekday()))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: TimeOfDay,
    pub value: f64,
}

/// One trading day's prices rebased against the day's first print.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    pub trading_day: NaiveDate,
    pub points: Vec<SeriesPoint>,
}

impl NormalizedSeries {
    pub fn empty(trading_day: NaiveDate) -> Self {
        Self {
            trading_day,
            points: Vec::new(),
        }
    }

    pub fn weekday(&self) -> Weekday {
        self.trading_day.weekday()
    }

    pub fn label(&self) -> String {
        day_label(self.trading_day)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Mean and standard deviation of one time-of-day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatePoint {
    pub time: TimeOfDay,
    pub mean: f64,
    pub sd: f64,
    /// Number of days that contributed a value to this bucket.
    pub count: usize,
}

impl AggregatePoint {
    /// `mean + sd`, the top of the ±1 SD band.
    pub fn upper(&self) -> f64 {
        self.mean + self.sd
    }

    /// `mean - sd`, the bottom of the ±1 SD band.
    pub fn lower(&self) -> f64 {
        self.mean - self.sd
    }
}

/// Per-time-of-day statistics across several trading days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSeries {
    /// Legend label, e.g. "Selected Mean".
    pub label: String,
    /// Number of trading days that contributed.
    pub days: usize,
    pub points: Vec<AggregatePoint>,
}
