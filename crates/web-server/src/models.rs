use crate::error::AppError;
use analytics::Summary;
use chrono::{NaiveDate, NaiveTime};
use core_types::{
    AggregatePoint, AggregateSeries, AggregationMode, DateFilter, NormalizedSeries, SeriesPoint,
    WeekdaySet,
};
use serde::{Deserialize, Serialize};

/// Query string shared by the price, series, aggregate and chart endpoints.
///
/// Fields stay as raw strings so that a malformed value becomes a JSON 400 from
/// `AppError` rather than axum's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub weekdays: Option<String>,
    pub mode: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!("Invalid {field} date '{value}' (expected YYYY-MM-DD)"))
    })
}

impl ChartQuery {
    pub fn date_filter(&self) -> Result<DateFilter, AppError> {
        let start = non_blank(&self.start).map(|s| parse_date("start", s)).transpose()?;
        let end = non_blank(&self.end).map(|s| parse_date("end", s)).transpose()?;
        let weekdays = match non_blank(&self.weekdays) {
            Some(list) => WeekdaySet::parse_list(list)?,
            None => WeekdaySet::empty(),
        };
        Ok(DateFilter::new(start, end, weekdays)?)
    }

    pub fn mode(&self) -> Result<AggregationMode, AppError> {
        match non_blank(&self.mode) {
            Some(mode) => Ok(mode.parse()?),
            None => Ok(AggregationMode::default()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TickersResponse {
    pub tickers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SeriesPointResponse {
    pub time: NaiveTime,
    pub offset_secs: u32,
    pub value: f64,
}

impl From<&SeriesPoint> for SeriesPointResponse {
    fn from(point: &SeriesPoint) -> Self {
        Self {
            time: point.time.time,
            offset_secs: point.time.offset_secs,
            value: point.value,
        }
    }
}

/// One trace on the dashboard chart.
#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub trading_day: NaiveDate,
    pub label: String,
    pub points: Vec<SeriesPointResponse>,
}

impl From<&NormalizedSeries> for SeriesResponse {
    fn from(series: &NormalizedSeries) -> Self {
        Self {
            trading_day: series.trading_day,
            label: series.label(),
            points: series.points.iter().map(SeriesPointResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AggregatePointResponse {
    pub time: NaiveTime,
    pub offset_secs: u32,
    pub mean: f64,
    pub sd: f64,
    pub upper: f64,
    pub lower: f64,
    pub count: usize,
}

impl From<&AggregatePoint> for AggregatePointResponse {
    fn from(point: &AggregatePoint) -> Self {
        Self {
            time: point.time.time,
            offset_secs: point.time.offset_secs,
            mean: point.mean,
            sd: point.sd,
            upper: point.upper(),
            lower: point.lower(),
            count: point.count,
        }
    }
}

/// The mean line and its ±1 SD band.
#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub label: String,
    pub days: usize,
    pub points: Vec<AggregatePointResponse>,
}

impl From<&AggregateSeries> for AggregateResponse {
    fn from(series: &AggregateSeries) -> Self {
        Self {
            label: series.label.clone(),
            days: series.days,
            points: series.points.iter().map(AggregatePointResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub ticker: String,
    pub days: Vec<SeriesResponse>,
    pub aggregate: Option<AggregateResponse>,
    pub summary: Summary,
}
