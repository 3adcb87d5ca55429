//! # Overnight Market Data Crate
//!
//! This crate is the system's only source of prices. It reads one CSV export per
//! ticker from a data directory and turns it into an ordered `Ticker`.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** All file-format knowledge (column names, timestamp layouts,
//!   Treasury 32nds price quotes) lives here. The rest of the workspace only sees
//!   `core_types::PriceObservation`.
//! - **Fresh Reads:** Nothing is cached. Every call re-reads the file, so each request
//!   works on its own private copy of the data.
//!
//! ## Public API
//!
//! - `MarketDataRepository`: lists tickers and loads a ticker's observations.
//! - `read_observations`: parses CSV content from any reader.
//! - `parse_price` / `parse_timestamp`: the cell-level parsers.
//! - `DataError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod loader;
pub mod parse;

// Re-export the key components to create a clean, public-facing API.
pub use error::{DataError, FieldError};
pub use loader::{is_valid_symbol, read_observations, MarketDataRepository};
pub use parse::{parse_price, parse_timestamp};
