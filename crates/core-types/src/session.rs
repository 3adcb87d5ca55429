use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

const SECS_PER_DAY: u32 = 86_400;

/// The overnight trading session of a bond futures contract.
///
/// A session opens at `open` (18:00 exchange time by default) and runs until just before
/// the same time on the next calendar day. Each session is labelled with the date on
/// which it opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingSession {
    pub open: NaiveTime,
}

impl Default for TradingSession {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl TradingSession {
    pub const fn new(open: NaiveTime) -> Self {
        Self { open }
    }

    /// A session aligned with the calendar day. Trading day equals calendar date.
    pub const fn midnight() -> Self {
        Self {
            open: NaiveTime::MIN,
        }
    }

    /// Returns the trading day a timestamp belongs to.
    pub fn trading_day(&self, timestamp: NaiveDateTime) -> NaiveDate {
        let date = timestamp.date();
        if timestamp.time() >= self.open {
            date
        } else {
            date.pred_opt().unwrap_or(date)
        }
    }

    /// Returns the session-relative time-of-day key of a timestamp.
    pub fn time_of_day(&self, timestamp: NaiveDateTime) -> TimeOfDay {
        TimeOfDay::in_session(timestamp.time(), self)
    }
}

/// A time-of-day bucket, ordered by how far into the session it falls.
///
/// With an 18:00 open, 18:00 sorts first and 17:59 last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    /// Seconds elapsed since the session opened.
    pub offset_secs: u32,
    pub time: NaiveTime,
}

impl TimeOfDay {
    pub fn in_session(time: NaiveTime, session: &TradingSession) -> Self {
        let secs = time.num_seconds_from_midnight();
        let open = session.open.num_seconds_from_midnight();
        Self {
            offset_secs: (secs + SECS_PER_DAY - open) % SECS_PER_DAY,
            time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: (i32, u32, u32), hms: (u32, u32, u32)) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_opt(hms.0, hms.1, hms.2)
            .unwrap()
    }

    #[test]
    fn test_evening_prints_belong_to_same_day() {
        let session = TradingSession::default();
        let ts = at((2025, 10, 1), (18, 0, 0));
        assert_eq!(session.trading_day(ts), NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
    }

    #[test]
    fn test_morning_prints_belong_to_previous_evening() {
        let session = TradingSession::default();
        let ts = at((2025, 10, 2), (9, 30, 0));
        assert_eq!(session.trading_day(ts), NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        let ts = at((2025, 10, 2), (17, 59, 0));
        assert_eq!(session.trading_day(ts), NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
    }

    #[test]
    fn test_midnight_session_uses_calendar_date() {
        let session = TradingSession::midnight();
        let ts = at((2025, 10, 2), (0, 0, 0));
        assert_eq!(session.trading_day(ts), NaiveDate::from_ymd_opt(2025, 10, 2).unwrap());
        assert_eq!(session.time_of_day(ts).offset_secs, 0);
    }

    #[test]
    fn test_time_of_day_orders_by_session_offset() {
        let session = TradingSession::default();
        let open = session.time_of_day(at((2025, 10, 1), (18, 0, 0)));
        let late = session.time_of_day(at((2025, 10, 1), (23, 30, 0)));
        let morning = session.time_of_day(at((2025, 10, 2), (9, 30, 0)));
        let close = session.time_of_day(at((2025, 10, 2), (17, 59, 0)));

        assert_eq!(open.offset_secs, 0);
        assert_eq!(morning.offset_secs, (15 * 60 + 30) * 60);
        assert!(open < late && late < morning && morning < close);
    }
}
