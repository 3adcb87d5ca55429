use crate::error::{DataError, FieldError};
use crate::parse::{parse_price, parse_timestamp, round_to_minute};
use core_types::{PriceObservation, Ticker};
use csv::StringRecord;
use rust_decimal::prelude::ToPrimitive;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::PathBuf;

/// Headers recognised as the timestamp column, in priority order.
const TIMESTAMP_HEADERS: &[&str] = &["date", "datetime", "timestamp", "time"];
/// Headers recognised as the price column, in priority order.
const PRICE_HEADERS: &[&str] = &["lst trd/lst prxx", "price", "last", "close"];

const MAX_SYMBOL_LEN: usize = 64;

/// The `MarketDataRepository` provides a high-level interface to the directory of
/// per-ticker CSV files. It holds no file contents between calls.
#[derive(Debug, Clone)]
pub struct MarketDataRepository {
    data_dir: PathBuf,
}

/// Ticker identifiers double as file stems, so only `[A-Za-z0-9_-]` is allowed.
pub fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol.len() <= MAX_SYMBOL_LEN
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl MarketDataRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Returns the sorted symbols of every `*.csv` file in the data directory.
    ///
    /// The extension match is case-sensitive so that every listed symbol resolves
    /// through `ticker_path`.
    pub fn list_tickers(&self) -> Result<Vec<String>, DataError> {
        let mut tickers = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "csv");
            if !is_csv || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_symbol(stem) {
                    tickers.push(stem.to_string());
                }
            }
        }
        tickers.sort();
        Ok(tickers)
    }

    /// Resolves the CSV path of a ticker without touching the file system.
    pub fn ticker_path(&self, symbol: &str) -> Result<PathBuf, DataError> {
        if !is_valid_symbol(symbol) {
            return Err(DataError::InvalidTicker(symbol.to_string()));
        }
        Ok(self.data_dir.join(format!("{symbol}.csv")))
    }

    /// Loads every observation of a ticker, ordered by timestamp.
    pub fn load_ticker(&self, symbol: &str) -> Result<Ticker, DataError> {
        let path = self.ticker_path(symbol)?;
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DataError::NotFound(symbol.to_string()));
            }
            Err(e) => return Err(DataError::Io(e)),
        };

        let observations = read_observations(file)?;
        tracing::debug!(
            ticker = symbol,
            path = %path.display(),
            rows = observations.len(),
            "Loaded ticker observations."
        );
        Ok(Ticker::new(symbol, observations))
    }
}

/// Reads CSV content into observations strictly ordered by timestamp.
///
/// Rows with an empty price cell are skipped. Any other malformed row aborts the
/// read with `DataError::Parse`. Timestamps are rounded to the minute; when several
/// rows land on the same minute the last one in file order is kept.
pub fn read_observations<R: Read>(source: R) -> Result<Vec<PriceObservation>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let ts_col = find_column(&headers, TIMESTAMP_HEADERS).ok_or_else(|| DataError::Parse {
        line: 1,
        message: format!("missing timestamp column (expected one of: {})", TIMESTAMP_HEADERS.join(", ")),
    })?;
    let price_col = find_column(&headers, PRICE_HEADERS).ok_or_else(|| DataError::Parse {
        line: 1,
        message: format!("missing price column (expected one of: {})", PRICE_HEADERS.join(", ")),
    })?;

    let mut observations = Vec::new();
    let mut skipped = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header, and lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| DataError::Parse {
            line,
            message: e.to_string(),
        })?;

        let raw_price = record.get(price_col).unwrap_or("");
        if raw_price.is_empty() {
            skipped += 1;
            continue;
        }
        let raw_timestamp = record.get(ts_col).unwrap_or("");

        let to_parse_error = |e: FieldError| DataError::Parse {
            line,
            message: e.to_string(),
        };
        let timestamp = parse_timestamp(raw_timestamp)
            .and_then(round_to_minute)
            .map_err(to_parse_error)?;
        let price = parse_price(raw_price)
            .map_err(to_parse_error)?
            .to_f64()
            .ok_or_else(|| to_parse_error(FieldError::Price(raw_price.to_string())))?;

        observations.push(PriceObservation::new(timestamp, price));
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Skipped rows without a price.");
    }

    Ok(into_strictly_ordered(observations))
}

fn find_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(candidate))
    })
}

fn into_strictly_ordered(mut observations: Vec<PriceObservation>) -> Vec<PriceObservation> {
    // Stable, so rows sharing a timestamp stay in file order.
    observations.sort_by_key(|o| o.timestamp);

    let mut ordered: Vec<PriceObservation> = Vec::with_capacity(observations.len());
    for observation in observations {
        match ordered.last_mut() {
            Some(last) if last.timestamp == observation.timestamp => *last = observation,
            _ => ordered.push(observation),
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn test_reads_bloomberg_style_export() {
        let csv = "Date,Lst Trd/Lst Prxx,Volume\n\
                   2025-10-01 18:01:00,104-08½,10\n\
                   2025-10-01 18:00:00,104-08,12\n";
        let rows = read_observations(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].price, 104.25);
        assert_eq!(rows[1].price, 104.265625);
        assert!(rows[0].timestamp < rows[1].timestamp);
    }

    #[test]
    fn test_reads_plain_columns_case_insensitively() {
        let csv = "timestamp,PRICE\n2025-10-01 09:30,100\n2025-10-01 09:31,101\n";
        let rows = read_observations(csv.as_bytes()).unwrap();
        assert_eq!(rows.iter().map(|r| r.price).collect::<Vec<_>>(), vec![100.0, 101.0]);
    }

    #[test]
    fn test_skips_rows_without_price() {
        let csv = "timestamp,price\n2025-10-01 09:30,100\n2025-10-01 09:31,\n2025-10-01 09:32,99\n";
        let rows = read_observations(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_duplicate_minutes_keep_last_row() {
        let csv = "timestamp,price\n2025-10-01 09:30:10,100\n2025-10-01 09:29:50,101\n";
        let rows = read_observations(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price, 101.0);
    }

    #[test]
    fn test_malformed_price_aborts_with_line() {
        let csv = "timestamp,price\n2025-10-01 09:30,100\n2025-10-01 09:31,abc\n";
        let err = read_observations(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_malformed_timestamp_aborts() {
        let csv = "timestamp,price\nnot-a-time,100\n";
        let err = read_observations(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_price_column() {
        let csv = "timestamp,volume\n2025-10-01 09:30,100\n";
        let err = read_observations(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_missing_ticker_is_not_found() {
        let dir = TempDir::new().unwrap();
        let repo = MarketDataRepository::new(dir.path());
        let err = repo.load_ticker("TUZ5").unwrap_err();
        assert!(matches!(err, DataError::NotFound(symbol) if symbol == "TUZ5"));
    }

    #[test]
    fn test_rejects_path_like_symbols() {
        let dir = TempDir::new().unwrap();
        let repo = MarketDataRepository::new(dir.path());
        assert!(matches!(repo.load_ticker("../etc/passwd"), Err(DataError::InvalidTicker(_))));
        assert!(matches!(repo.load_ticker(""), Err(DataError::InvalidTicker(_))));
    }

    #[test]
    fn test_load_and_list_tickers() {
        let dir = TempDir::new().unwrap();
        write(&dir, "TUZ5.csv", "timestamp,price\n2025-10-01 18:00,104.25\n");
        write(&dir, "FVZ5.csv", "timestamp,price\n2025-10-01 18:00,108.5\n");
        write(&dir, "TYZ5.CSV", "timestamp,price\n2025-10-01 18:00,112.5\n");
        write(&dir, "notes.txt", "ignore me");
        write(&dir, "bad name.csv", "timestamp,price\n");

        let repo = MarketDataRepository::new(dir.path());
        assert_eq!(repo.list_tickers().unwrap(), vec!["FVZ5".to_string(), "TUZ5".to_string()]);

        let ticker = repo.load_ticker("TUZ5").unwrap();
        assert_eq!(ticker.symbol, "TUZ5");
        assert_eq!(ticker.observations.len(), 1);
        assert_eq!(ticker.observations[0].price, 104.25);
    }
}
