use crate::aggregate::Aggregator;
use crate::error::AnalyticsError;
use crate::filter::RowFilter;
use crate::relative::{normalize_days, split_trading_days};
use crate::report::{ChartReport, TickerOverview};
use chrono::Datelike;
use core_types::{
    AggregateSeries, AggregationMode, DateFilter, NormalizedSeries, PriceObservation, RelativeMode,
    SdConvention, Ticker, TradingSession, WeekdaySet,
};

/// A stateless calculator for the dashboard's chart data.
///
/// It holds only configuration; every call works on the `Ticker` it is given.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    session: TradingSession,
    relative_mode: RelativeMode,
    aggregator: Aggregator,
}

impl AnalyticsEngine {
    pub fn new(session: TradingSession, relative_mode: RelativeMode, sd_convention: SdConvention) -> Self {
        Self {
            session,
            relative_mode,
            aggregator: Aggregator::new(sd_convention),
        }
    }

    /// The raw observations of the ticker that pass `filter`.
    pub fn filter_rows<'a>(
        &self,
        ticker: &'a Ticker,
        filter: &DateFilter,
    ) -> Result<RowFilter<'a>, AnalyticsError> {
        RowFilter::new(&ticker.observations, filter, &self.session)
    }

    /// One normalized series per trading day that passes `filter`.
    pub fn daily_series(
        &self,
        ticker: &Ticker,
        filter: &DateFilter,
    ) -> Result<Vec<NormalizedSeries>, AnalyticsError> {
        let rows: Vec<PriceObservation> = self.filter_rows(ticker, filter)?.copied().collect();
        normalize_days(&rows, self.relative_mode, &self.session)
    }

    /// The main entry point: filters, normalizes and aggregates a ticker.
    ///
    /// # Arguments
    ///
    /// * `ticker` - The ticker's full observation history.
    /// * `filter` - Which trading days are selected.
    /// * `mode` - How the selected days are combined.
    pub fn chart(
        &self,
        ticker: &Ticker,
        filter: &DateFilter,
        mode: AggregationMode,
    ) -> Result<ChartReport, AnalyticsError> {
        let selected = self.daily_series(ticker, filter)?;
        if selected.is_empty() {
            tracing::debug!(ticker = %ticker.symbol, %filter, "No trading days matched the filter.");
            return Ok(ChartReport::empty(mode, filter));
        }

        let history = if mode.uses_history() {
            normalize_days(&ticker.observations, self.relative_mode, &self.session)?
        } else {
            Vec::new()
        };

        let outcome = self.aggregator.aggregate(mode, selected, &history);
        Ok(ChartReport::new(mode, filter, outcome))
    }

    /// Only the aggregate of `chart`.
    pub fn aggregate(
        &self,
        ticker: &Ticker,
        filter: &DateFilter,
        mode: AggregationMode,
    ) -> Result<Option<AggregateSeries>, AnalyticsError> {
        Ok(self.chart(ticker, filter, mode)?.aggregate)
    }

    pub fn overview(&self, ticker: &Ticker) -> TickerOverview {
        let days: Vec<_> = split_trading_days(&ticker.observations, &self.session)
            .map(|(day, _)| day)
            .collect();
        let weekdays: WeekdaySet = days.iter().map(|day| day.weekday()).collect();

        TickerOverview {
            ticker: ticker.symbol.clone(),
            first_day: days.first().copied(),
            last_day: days.last().copied(),
            trading_days: days.len(),
            weekdays,
            observations: ticker.observations.len(),
        }
    }
}
