use crate::aggregate::AggregateOutcome;
use chrono::NaiveDate;
use core_types::{AggregateSeries, AggregationMode, DateFilter, NormalizedSeries, WeekdaySet};
use serde::Serialize;

const NO_DATA: &str = "No data available for selected criteria";

/// Everything the dashboard needs to draw one chart.
///
/// This struct is the final output of the `AnalyticsEngine` and serves as the data
/// transfer object between the analytics and web layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartReport {
    /// One normalized series per selected trading day, oldest first.
    pub days: Vec<NormalizedSeries>,
    /// `None` when the mode is `none`, the selection is empty, or the mode cannot be
    /// applied to the selection.
    pub aggregate: Option<AggregateSeries>,
    pub summary: Summary,
}

/// The status line shown above the chart, with the numbers behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub mode: AggregationMode,
    pub selection: String,
    pub selected_days: usize,
    pub aggregated_days: usize,
    /// Mean of every value in the aggregate, pooled across time-of-day buckets.
    pub mean: Option<f64>,
    /// Standard deviation of the same pooled values.
    pub sd: Option<f64>,
    pub description: String,
}

impl ChartReport {
    /// A report for a selection that matched no trading day.
    pub fn empty(mode: AggregationMode, filter: &DateFilter) -> Self {
        Self {
            days: Vec::new(),
            aggregate: None,
            summary: Summary {
                mode,
                selection: filter.to_string(),
                selected_days: 0,
                aggregated_days: 0,
                mean: None,
                sd: None,
                description: NO_DATA.to_string(),
            },
        }
    }

    pub fn new(mode: AggregationMode, filter: &DateFilter, outcome: AggregateOutcome) -> Self {
        if outcome.series.is_empty() {
            return Self::empty(mode, filter);
        }

        let selection = filter.to_string();
        let selected_days = outcome.series.len();
        let aggregated_days = outcome.aggregate.as_ref().map_or(0, |a| a.days);

        let description = match (mode, &outcome.pooled) {
            (AggregationMode::None, _) => {
                format!("Showing {selected_days} individual day(s) | Selection: {selection}")
            }
            (_, Some(pooled)) => format!(
                "Mode: {} | Selection: {} | Days: {} | Avg Relative Price: {:.4} | SD: {:.4}",
                mode.title(),
                selection,
                selected_days,
                pooled.mean,
                pooled.sd
            ),
            (_, None) => format!("Selected {selected_days} day(s)"),
        };

        Self {
            days: outcome.series,
            aggregate: outcome.aggregate,
            summary: Summary {
                mode,
                selection,
                selected_days,
                aggregated_days,
                mean: outcome.pooled.map(|p| p.mean),
                sd: outcome.pooled.map(|p| p.sd),
                description,
            },
        }
    }
}

/// Date coverage of a ticker, used to bound the dashboard's date pickers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerOverview {
    pub ticker: String,
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
    pub trading_days: usize,
    /// Weekdays that occur among the trading days.
    pub weekdays: WeekdaySet,
    pub observations: usize,
}
