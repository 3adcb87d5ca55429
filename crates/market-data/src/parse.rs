use crate::error::FieldError;
use chrono::{DurationRound, NaiveDate, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Layouts tried in order before falling back to an Excel serial day number.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Parses a timestamp cell.
///
/// Accepts ISO-like and US layouts, or an Excel serial number (days since
/// 1899-12-30 with the time of day in the fraction).
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, FieldError> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| raw.parse::<f64>().ok().and_then(from_excel_serial))
        .ok_or_else(|| FieldError::Timestamp(raw.to_string()))
}

fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * MILLIS_PER_DAY).round() as i64;
    epoch.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}

/// Rounds a timestamp to the nearest whole minute.
pub fn round_to_minute(timestamp: NaiveDateTime) -> Result<NaiveDateTime, FieldError> {
    timestamp
        .duration_round(TimeDelta::minutes(1))
        .map_err(|_| FieldError::Timestamp(timestamp.to_string()))
}

/// Parses a price cell.
///
/// Plain decimals (`112.515625`) and Treasury 32nds quotes (`112-16½`) are supported.
/// A 32nds quote is `WHOLE-TICKS` optionally followed by a fractional tick glyph;
/// `+` is accepted as a half tick.
pub fn parse_price(raw: &str) -> Result<Decimal, FieldError> {
    let raw = raw.trim();
    match raw.split_once('-') {
        Some((whole, rest)) if !whole.is_empty() => parse_32nds(raw, whole, rest),
        _ => Decimal::from_str(raw).map_err(|_| FieldError::Price(raw.to_string())),
    }
}

fn parse_32nds(raw: &str, whole: &str, rest: &str) -> Result<Decimal, FieldError> {
    let invalid = || FieldError::Price(raw.to_string());

    let whole: u32 = whole.trim().parse().map_err(|_| invalid())?;
    let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let (ticks, glyphs) = rest.split_at(digits_end);

    let ticks: u32 = if ticks.is_empty() {
        0
    } else {
        ticks.parse().map_err(|_| invalid())?
    };
    if ticks >= 32 {
        return Err(FieldError::TicksOutOfRange(raw.to_string(), ticks));
    }

    let mut fraction = Decimal::ZERO;
    for glyph in glyphs.trim().chars() {
        fraction += tick_fraction(glyph).ok_or_else(invalid)?;
    }

    Ok(Decimal::from(whole) + (Decimal::from(ticks) + fraction) / dec!(32))
}

fn tick_fraction(glyph: char) -> Option<Decimal> {
    match glyph {
        '½' | '+' => Some(dec!(0.5)),
        '¼' => Some(dec!(0.25)),
        '¾' => Some(dec!(0.75)),
        '⅛' => Some(dec!(0.125)),
        '⅜' => Some(dec!(0.375)),
        '⅝' => Some(dec!(0.625)),
        '⅞' => Some(dec!(0.875)),
        _ => None,
    }
}
