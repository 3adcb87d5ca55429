use crate::stats::{mean_sd, MeanSd};
use core_types::{
    weekday_name, AggregatePoint, AggregateSeries, AggregationMode, NormalizedSeries, SdConvention,
    TimeOfDay,
};
use std::collections::BTreeMap;

/// The individual day series, untouched, plus the aggregate the mode asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOutcome {
    pub series: Vec<NormalizedSeries>,
    pub aggregate: Option<AggregateSeries>,
    /// Mean/SD of every value that entered the aggregate, pooled across buckets.
    pub pooled: Option<MeanSd>,
}

/// Combines normalized day series into per-time-of-day mean and standard deviation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    convention: SdConvention,
}

impl Aggregator {
    pub fn new(convention: SdConvention) -> Self {
        Self { convention }
    }

    /// Applies an aggregation mode.
    ///
    /// * `selected` - One series per day chosen by the caller.
    /// * `history` - Every day available for the ticker. Only read by
    ///   `AggregationMode::Total` and `AggregationMode::Weekday`.
    pub fn aggregate(
        &self,
        mode: AggregationMode,
        selected: Vec<NormalizedSeries>,
        history: &[NormalizedSeries],
    ) -> AggregateOutcome {
        let combined = match mode {
            AggregationMode::None => None,
            AggregationMode::Selected => self.combine("Selected Mean", selected.iter()),
            AggregationMode::Total => self.combine("Total Mean", history.iter()),
            AggregationMode::Weekday => match selected.as_slice() {
                [only] => {
                    let weekday = only.weekday();
                    self.combine(
                        format!("{} Mean", weekday_name(weekday)),
                        history.iter().filter(|day| day.weekday() == weekday),
                    )
                }
                _ => None,
            },
        };

        let (aggregate, pooled) = match combined {
            Some((aggregate, pooled)) => (Some(aggregate), Some(pooled)),
            None => (None, None),
        };
        AggregateOutcome {
            series: selected,
            aggregate,
            pooled,
        }
    }

    /// Groups values by time of day across `days`. Buckets are the union of the keys
    /// present in any day; keys without values never appear. Returns `None` when no
    /// day contributes a value.
    pub fn combine<'a, I>(&self, label: impl Into<String>, days: I) -> Option<(AggregateSeries, MeanSd)>
    where
        I: IntoIterator<Item = &'a NormalizedSeries>,
    {
        let mut buckets: BTreeMap<TimeOfDay, Vec<f64>> = BTreeMap::new();
        let mut all_values = Vec::new();
        let mut contributing_days = 0usize;

        for day in days.into_iter().filter(|day| !day.is_empty()) {
            contributing_days += 1;
            for point in &day.points {
                buckets.entry(point.time).or_default().push(point.value);
                all_values.push(point.value);
            }
        }

        let pooled = mean_sd(&all_values, self.convention)?;
        let points = buckets
            .into_iter()
            .filter_map(|(time, values)| {
                mean_sd(&values, self.convention).map(|stats| AggregatePoint {
                    time,
                    mean: stats.mean,
                    sd: stats.sd,
                    count: stats.count,
                })
            })
            .collect();

        Some((
            AggregateSeries {
                label: label.into(),
                days: contributing_days,
                points,
            },
            pooled,
        ))
    }
}
