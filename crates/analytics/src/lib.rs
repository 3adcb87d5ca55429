//! # Overnight Analytics Engine
//!
//! This crate turns a ticker's raw observations into the series the dashboard
//! charts: it filters rows by date and weekday, rebases each trading day against its
//! first print, and combines days into per-time-of-day mean and standard deviation.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files or
//!   HTTP. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` holds configuration only. It
//!   takes a `Ticker` as input and produces a `ChartReport` as output.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The main struct that runs the filter/normalize/aggregate pipeline.
//! - `RowFilter`: The lazy, restartable row filter.
//! - `Aggregator`: Per-time-of-day mean/SD under an `AggregationMode`.
//! - `ChartReport` / `Summary` / `TickerOverview`: The report structs.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod engine;
pub mod error;
pub mod filter;
pub mod relative;
pub mod report;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::{AggregateOutcome, Aggregator};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use filter::{filter_rows, RowFilter};
pub use relative::{normalize_day, normalize_days, renormalize, split_trading_days};
pub use report::{ChartReport, Summary, TickerOverview};
pub use stats::{mean_sd, MeanSd};
