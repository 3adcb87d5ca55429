use crate::error::CoreError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Serialize, Serializer};
use std::fmt;

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday, as shown in day labels.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A set of weekdays. An empty set places no restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, weekday: Weekday) {
        self.0 |= 1 << weekday.num_days_from_monday();
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_monday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// True when the set is empty or contains `weekday`.
    pub fn allows(&self, weekday: Weekday) -> bool {
        self.is_empty() || self.contains(weekday)
    }

    /// Iterates Monday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_WEEKDAYS.into_iter().filter(|day| self.contains(*day))
    }

    /// Parses a comma-separated list of weekday names ("Monday", "mon") or indices
    /// (0 = Monday .. 6 = Sunday). Blank entries are ignored.
    pub fn parse_list(list: &str) -> Result<Self, CoreError> {
        let mut set = Self::empty();
        for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            set.insert(parse_weekday(token)?);
        }
        Ok(set)
    }
}

fn parse_weekday(token: &str) -> Result<Weekday, CoreError> {
    let invalid = || CoreError::InvalidInput("weekdays".to_string(), format!("unknown weekday '{token}'"));
    if let Ok(index) = token.parse::<u8>() {
        return Weekday::try_from(index).map_err(|_| invalid());
    }
    token.parse::<Weekday>().map_err(|_| invalid())
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(weekday_name).collect();
        f.write_str(&names.join(", "))
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(weekday_name))
    }
}

/// Selects trading days by inclusive date range and allowed weekdays.
///
/// A missing bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub weekdays: WeekdaySet,
}

impl DateFilter {
    /// Builds a validated filter. When only `start` is given the range covers that
    /// single day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRange` if start > end.
    pub fn new(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        weekdays: WeekdaySet,
    ) -> Result<Self, CoreError> {
        let end = end.or(start);
        let filter = Self { start, end, weekdays };
        filter.validate()?;
        Ok(filter)
    }

    /// A filter that matches every day.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => Err(CoreError::InvalidRange { start, end }),
            _ => Ok(()),
        }
    }

    pub fn matches_day(&self, day: NaiveDate) -> bool {
        self.start.is_none_or(|start| day >= start)
            && self.end.is_none_or(|end| day <= end)
            && self.weekdays.allows(day.weekday())
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = match (self.start, self.end) {
            (Some(start), Some(end)) if start == end => Some(format!("Calendar {start}")),
            (Some(start), Some(end)) => Some(format!("Calendar {start} to {end}")),
            (Some(start), None) => Some(format!("Calendar from {start}")),
            (None, Some(end)) => Some(format!("Calendar until {end}")),
            (None, None) => None,
        };
        let weekdays = (!self.weekdays.is_empty()).then(|| format!("Weekday ({})", self.weekdays));
        match (range, weekdays) {
            (Some(r), Some(w)) => write!(f, "{r}, {w}"),
            (Some(r), None) => f.write_str(&r),
            (None, Some(w)) => f.write_str(&w),
            (None, None) => f.write_str("All days"),
        }
    }
}
