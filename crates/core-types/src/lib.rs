//! # Overnight Core Types
//!
//! The shared vocabulary of the workspace: price observations, the overnight trading
//! session, date/weekday filters and the normalized and aggregated series that the
//! dashboard charts.
//!
//! As a Layer 0 crate it has no knowledge of files, HTTP or configuration sources.

pub mod enums;
pub mod error;
pub mod filter;
pub mod session;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{AggregationMode, RelativeMode, SdConvention};
pub use error::CoreError;
pub use filter::{weekday_name, DateFilter, WeekdaySet};
pub use session::{TimeOfDay, TradingSession};
pub use structs::{
    day_label, AggregatePoint, AggregateSeries, NormalizedSeries, PriceObservation,
    SeriesPoint, Ticker,
};
