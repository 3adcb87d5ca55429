use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Controls whether and how the selected trading days are statistically combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// Individual day series only.
    None,
    /// Mean/SD across the days matched by the filter.
    #[default]
    Selected,
    /// Mean/SD across every trading day in the ticker's history.
    Total,
    /// Mean/SD across every historical day that shares the weekday of the single
    /// selected day.
    Weekday,
}

impl AggregationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMode::None => "none",
            AggregationMode::Selected => "selected",
            AggregationMode::Total => "total",
            AggregationMode::Weekday => "weekday",
        }
    }

    /// True when the mode draws on days outside the selection.
    pub fn uses_history(&self) -> bool {
        matches!(self, AggregationMode::Total | AggregationMode::Weekday)
    }

    /// The capitalised name used in the dashboard's status line.
    pub fn title(&self) -> &'static str {
        match self {
            AggregationMode::None => "None",
            AggregationMode::Selected => "Selected",
            AggregationMode::Total => "Total",
            AggregationMode::Weekday => "Weekday",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(AggregationMode::None),
            "selected" => Ok(AggregationMode::Selected),
            "total" => Ok(AggregationMode::Total),
            "weekday" => Ok(AggregationMode::Weekday),
            other => Err(CoreError::InvalidInput(
                "mode".to_string(),
                format!("unknown aggregation mode '{other}' (expected none, selected, total or weekday)"),
            )),
        }
    }
}

/// How a day's prices are rebased against the session's first print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeMode {
    /// `price - reference`
    #[default]
    Difference,
    /// `price / reference`
    Ratio,
}

/// Which standard deviation formula the aggregator uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdConvention {
    /// Divide by N.
    #[default]
    Population,
    /// Divide by N - 1.
    Sample,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_mode_parses_case_insensitively() {
        assert_eq!("none".parse::<AggregationMode>(), Ok(AggregationMode::None));
        assert_eq!(" Selected ".parse::<AggregationMode>(), Ok(AggregationMode::Selected));
        assert_eq!("TOTAL".parse::<AggregationMode>(), Ok(AggregationMode::Total));
        assert_eq!("weekday".parse::<AggregationMode>(), Ok(AggregationMode::Weekday));
    }

    #[test]
    fn test_aggregation_mode_rejects_unknown() {
        let err = "average".parse::<AggregationMode>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "mode"));
    }

    #[test]
    fn test_enums_deserialize_lowercase() {
        let mode: RelativeMode = serde_json::from_str("\"ratio\"").unwrap();
        assert_eq!(mode, RelativeMode::Ratio);
        let sd: SdConvention = serde_json::from_str("\"sample\"").unwrap();
        assert_eq!(sd, SdConvention::Sample);
        assert_eq!(AggregationMode::default(), AggregationMode::Selected);
    }
}
