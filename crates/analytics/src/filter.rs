use crate::error::AnalyticsError;
use core_types::{DateFilter, PriceObservation, TradingSession};
use std::slice;

/// A lazy view over the observations whose trading day passes a `DateFilter`.
///
/// Cloning the iterator restarts it from the clone's position, so a fresh clone taken
/// before iteration can be replayed any number of times.
#[derive(Debug, Clone)]
pub struct RowFilter<'a> {
    rows: slice::Iter<'a, PriceObservation>,
    filter: DateFilter,
    session: TradingSession,
}

impl<'a> RowFilter<'a> {
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidRange` if the filter's start is after its end.
    pub fn new(
        rows: &'a [PriceObservation],
        filter: &DateFilter,
        session: &TradingSession,
    ) -> Result<Self, AnalyticsError> {
        filter.validate()?;
        Ok(Self {
            rows: rows.iter(),
            filter: *filter,
            session: *session,
        })
    }
}

impl<'a> Iterator for RowFilter<'a> {
    type Item = &'a PriceObservation;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = &self.filter;
        let session = &self.session;
        self.rows
            .by_ref()
            .find(|row| filter.matches_day(session.trading_day(row.timestamp)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.rows.size_hint().1)
    }
}

/// Returns the rows whose trading day falls within the filter's range and weekdays.
pub fn filter_rows<'a>(
    rows: &'a [PriceObservation],
    filter: &DateFilter,
    session: &TradingSession,
) -> Result<RowFilter<'a>, AnalyticsError> {
    RowFilter::new(rows, filter, session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Weekday};
    use core_types::WeekdaySet;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    /// Two prints per calendar day for the first two weeks of October 2025.
    fn rows() -> Vec<PriceObservation> {
        (1..=14)
            .flat_map(|d| {
                [(9, 30), (15, 0)].map(|(h, m)| {
                    PriceObservation::new(date(d).and_hms_opt(h, m, 0).unwrap(), 100.0 + d as f64)
                })
            })
            .collect()
    }

    #[test]
    fn test_output_is_ordered_subset_matching_predicate() {
        let rows = rows();
        let weekdays: WeekdaySet = [Weekday::Mon, Weekday::Wed].into_iter().collect();
        let filter = DateFilter::new(Some(date(2)), Some(date(10)), weekdays).unwrap();
        let session = TradingSession::midnight();

        let kept: Vec<_> = filter_rows(&rows, &filter, &session).unwrap().collect();

        assert!(!kept.is_empty());
        assert!(kept.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        for row in &kept {
            assert!(rows.contains(row));
            let day = row.timestamp.date();
            assert!(day >= date(2) && day <= date(10));
            assert!(matches!(day.weekday(), Weekday::Mon | Weekday::Wed));
        }
        // Wed 8th, Mon 6th; the 1st is outside the range.
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn test_empty_match_is_not_an_error() {
        let rows = rows();
        let filter = DateFilter::new(Some(date(20)), Some(date(25)), WeekdaySet::empty()).unwrap();
        let kept = filter_rows(&rows, &filter, &TradingSession::midnight()).unwrap();
        assert_eq!(kept.count(), 0);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let rows = rows();
        let filter = DateFilter {
            start: Some(date(5)),
            end: Some(date(1)),
            weekdays: WeekdaySet::empty(),
        };
        let err = filter_rows(&rows, &filter, &TradingSession::midnight()).unwrap_err();
        assert_eq!(err, AnalyticsError::InvalidRange { start: date(5), end: date(1) });
    }

    #[test]
    fn test_filter_is_restartable() {
        let rows = rows();
        let filter = DateFilter::new(Some(date(3)), None, WeekdaySet::empty()).unwrap();
        let view = filter_rows(&rows, &filter, &TradingSession::midnight()).unwrap();

        let first: Vec<_> = view.clone().collect();
        let second: Vec<_> = view.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_filters_by_trading_day_not_calendar_day() {
        let rows = rows();
        // With an 18:00 open, the 09:30 print on the 2nd belongs to the session of the 1st.
        let filter = DateFilter::new(Some(date(1)), None, WeekdaySet::empty()).unwrap();
        let kept: Vec<_> = filter_rows(&rows, &filter, &TradingSession::default())
            .unwrap()
            .collect();
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|row| row.timestamp.date() == date(2)));
    }
}
