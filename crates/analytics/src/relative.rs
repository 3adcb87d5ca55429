use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::{NormalizedSeries, PriceObservation, RelativeMode, SeriesPoint, TradingSession};

fn rebase(value: f64, reference: f64, mode: RelativeMode) -> f64 {
    match mode {
        RelativeMode::Difference => value - reference,
        RelativeMode::Ratio => value / reference,
    }
}

fn check_reference(reference: f64, mode: RelativeMode, day: NaiveDate) -> Result<(), AnalyticsError> {
    if mode == RelativeMode::Ratio && reference == 0.0 {
        return Err(AnalyticsError::DivisionByZero(format!("ratio against a zero reference on {day}")));
    }
    Ok(())
}

/// Rebases one trading day's observations against the day's first price.
///
/// An empty day yields an empty series.
pub fn normalize_day<'a, I>(
    trading_day: NaiveDate,
    rows: I,
    mode: RelativeMode,
    session: &TradingSession,
) -> Result<NormalizedSeries, AnalyticsError>
where
    I: IntoIterator<Item = &'a PriceObservation>,
{
    let mut rows = rows.into_iter().peekable();
    let Some(reference) = rows.peek().map(|row| row.price) else {
        return Ok(NormalizedSeries::empty(trading_day));
    };
    check_reference(reference, mode, trading_day)?;

    let points = rows
        .map(|row| SeriesPoint {
            time: session.time_of_day(row.timestamp),
            value: rebase(row.price, reference, mode),
        })
        .collect();

    Ok(NormalizedSeries { trading_day, points })
}

/// Re-applies the transform to an already normalized series, using its own first
/// value as the reference. For a series produced by `normalize_day` with the same mode
/// this returns the series unchanged.
pub fn renormalize(series: &NormalizedSeries, mode: RelativeMode) -> Result<NormalizedSeries, AnalyticsError> {
    let Some(first) = series.points.first() else {
        return Ok(series.clone());
    };
    let reference = first.value;
    check_reference(reference, mode, series.trading_day)?;

    let points = series
        .points
        .iter()
        .map(|point| SeriesPoint {
            time: point.time,
            value: rebase(point.value, reference, mode),
        })
        .collect();
    Ok(NormalizedSeries {
        trading_day: series.trading_day,
        points,
    })
}

/// Splits timestamp-ordered observations into per-trading-day runs.
///
/// Trading day never decreases as timestamps increase, so each day is contiguous.
pub fn split_trading_days<'a>(
    rows: &'a [PriceObservation],
    session: &'a TradingSession,
) -> impl Iterator<Item = (NaiveDate, &'a [PriceObservation])> + 'a {
    rows.chunk_by(move |a, b| session.trading_day(a.timestamp) == session.trading_day(b.timestamp))
        .filter_map(move |day| day.first().map(|row| (session.trading_day(row.timestamp), day)))
}

/// Normalizes every trading day present in `rows`, oldest first.
pub fn normalize_days(
    rows: &[PriceObservation],
    mode: RelativeMode,
    session: &TradingSession,
) -> Result<Vec<NormalizedSeries>, AnalyticsError> {
    split_trading_days(rows, session)
        .map(|(day, day_rows)| normalize_day(day, day_rows, mode, session))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveTime;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    fn obs(d: u32, h: u32, m: u32, price: f64) -> PriceObservation {
        PriceObservation::new(
            NaiveDate::from_ymd_opt(2025, 10, d).unwrap().and_hms_opt(h, m, 0).unwrap(),
            price,
        )
    }

    #[test]
    fn test_difference_against_first_print() {
        let rows = [obs(1, 9, 30, 100.0), obs(1, 9, 31, 101.0), obs(1, 9, 32, 99.0)];
        let session = TradingSession::midnight();
        let series = normalize_day(day(), &rows, RelativeMode::Difference, &session).unwrap();

        let values: Vec<f64> = series.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 1.0, -1.0]);
        assert_eq!(series.points[0].time.time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(series.points[2].time.time, NaiveTime::from_hms_opt(9, 32, 0).unwrap());
    }

    #[test]
    fn test_ratio_against_first_print() {
        let rows = [obs(1, 9, 30, 100.0), obs(1, 9, 31, 101.0)];
        let series =
            normalize_day(day(), &rows, RelativeMode::Ratio, &TradingSession::midnight()).unwrap();
        assert_relative_eq!(series.points[0].value, 1.0);
        assert_relative_eq!(series.points[1].value, 1.01);
    }

    #[test]
    fn test_empty_day_is_empty_series() {
        let rows: [PriceObservation; 0] = [];
        let series =
            normalize_day(day(), &rows, RelativeMode::Difference, &TradingSession::default()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.trading_day, day());
    }

    #[test]
    fn test_ratio_rejects_zero_reference() {
        let rows = [obs(1, 9, 30, 0.0), obs(1, 9, 31, 1.0)];
        let err = normalize_day(day(), &rows, RelativeMode::Ratio, &TradingSession::midnight()).unwrap_err();
        assert!(matches!(err, AnalyticsError::DivisionByZero(_)));
    }

    #[test]
    fn test_renormalize_is_idempotent() {
        let rows = [obs(1, 9, 30, 100.0), obs(1, 9, 31, 101.5), obs(1, 9, 32, 99.25)];
        let session = TradingSession::midnight();
        for mode in [RelativeMode::Difference, RelativeMode::Ratio] {
            let once = normalize_day(day(), &rows, mode, &session).unwrap();
            let twice = renormalize(&once, mode).unwrap();
            assert_eq!(once, twice);
        }

        let once = normalize_day(day(), &rows, RelativeMode::Difference, &session).unwrap();
        assert_eq!(renormalize(&once, RelativeMode::Difference).unwrap().points[0].value, 0.0);
    }

    #[test]
    fn test_split_follows_trading_sessions() {
        // Session opens at 18:00: the evening of the 1st and morning of the 2nd are one day.
        let rows = [
            obs(1, 18, 0, 100.0),
            obs(1, 23, 0, 100.5),
            obs(2, 9, 30, 101.0),
            obs(2, 18, 0, 102.0),
            obs(3, 8, 0, 101.0),
        ];
        let session = TradingSession::default();
        let days: Vec<_> = split_trading_days(&rows, &session)
            .map(|(d, r)| (d, r.len()))
            .collect();
        assert_eq!(
            days,
            vec![
                (NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(), 3),
                (NaiveDate::from_ymd_opt(2025, 10, 2).unwrap(), 2),
            ]
        );

        let series = normalize_days(&rows, RelativeMode::Difference, &session).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].points.iter().map(|p| p.value).collect::<Vec<_>>(), vec![0.0, 0.5, 1.0]);
        assert_eq!(series[1].points.iter().map(|p| p.value).collect::<Vec<_>>(), vec![0.0, -1.0]);
    }
}
