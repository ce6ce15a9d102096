//! CSV file price adapter with synthetic fallback.
//!
//! Reads a headered CSV and picks the date and close columns by name
//! (case-insensitive). A missing file yields a generated random-walk series
//! instead of an error.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use tracing::{debug, info};

use crate::domain::error::StockvizError;
use crate::domain::price::{PricePoint, PriceSeries};
use crate::domain::synthetic;
use crate::ports::data_port::{LoadOutcome, PriceSource};

pub const DEFAULT_INPUT_PATH: &str = "data/stock_data.csv";
pub const FALLBACK_NOTICE: &str = "CSV not found. Using sample data.";

const DATE_COLUMN: &str = "date";
const CLOSE_COLUMN: &str = "close";

/// `notice` receives the one console line printed on fallback.
pub struct CsvAdapter<R, W = io::Stdout> {
    path: PathBuf,
    rng: R,
    notice: W,
}

impl<R: Rng> CsvAdapter<R> {
    pub fn new(path: PathBuf, rng: R) -> Self {
        Self::with_notice(path, rng, io::stdout())
    }
}

impl<R: Rng, W: Write> CsvAdapter<R, W> {
    pub fn with_notice(path: PathBuf, rng: R, notice: W) -> Self {
        Self { path, rng, notice }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn notice(&self) -> &W {
        &self.notice
    }
}

impl<R: Rng, W: Write> PriceSource for CsvAdapter<R, W> {
    fn load(&mut self) -> Result<LoadOutcome, StockvizError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "input missing, generating series");
                let _ = writeln!(self.notice, "{}", FALLBACK_NOTICE);
                let series = synthetic::generate_series(&mut self.rng);
                return Ok(LoadOutcome::Generated(series));
            }
            Err(e) => return Err(StockvizError::Io(e)),
        };

        let series = read_prices(file)?;
        info!(
            path = %self.path.display(),
            rows = series.len(),
            "loaded price data"
        );
        Ok(LoadOutcome::Loaded(series))
    }
}

/// Parse a headered CSV of prices. Row numbers in errors are 1-based data rows.
pub fn read_prices<T: Read>(input: T) -> Result<PriceSeries, StockvizError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = rdr.headers()?.clone();
    let date_col = find_column(&headers, DATE_COLUMN)?;
    let close_col = find_column(&headers, CLOSE_COLUMN)?;
    debug!(date_col, close_col, "resolved price columns");

    let mut points = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result?;

        let date_str = record.get(date_col).unwrap_or("");
        let date = parse_date(date_str).ok_or_else(|| StockvizError::InvalidDate {
            row,
            value: date_str.to_string(),
        })?;

        let close_str = record.get(close_col).unwrap_or("");
        let close = close_str
            .parse::<f64>()
            .ok()
            .filter(|c| c.is_finite())
            .ok_or_else(|| StockvizError::InvalidPrice {
                row,
                value: close_str.to_string(),
            })?;

        points.push(PricePoint::new(date, close));
    }

    PriceSeries::new(points)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, StockvizError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| StockvizError::MissingColumn {
            column: name.to_string(),
        })
}

/// Accepts `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`; the time of day is dropped.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::synthetic::{reference_date, rng_from_seed, SYNTHETIC_DAYS};
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_data(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stock_data.csv");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn load_returns_file_rows() {
        let (_dir, path) = setup_test_data(
            "Date,Open,Close,Volume\n\
             2024-01-15,100.0,105.5,50000\n\
             2024-01-16,105.0,110.25,60000\n\
             2024-01-17,110.0,115.0,55000\n",
        );
        let mut adapter = CsvAdapter::new(path, rng_from_seed(Some(1)));

        let outcome = adapter.load().unwrap();
        assert!(!outcome.is_generated());

        let series = outcome.into_series();
        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[0].date, date(2024, 1, 15));
        assert_eq!(series.points()[0].close, 105.5);
        assert_eq!(series.points()[1].close, 110.25);
        assert_eq!(series.points()[2].date, date(2024, 1, 17));
    }

    #[test]
    fn missing_file_falls_back_to_synthetic() {
        let dir = TempDir::new().unwrap();
        let mut adapter = CsvAdapter::new(dir.path().join("absent.csv"), rng_from_seed(Some(9)));

        let outcome = adapter.load().unwrap();
        assert!(outcome.is_generated());
        assert_eq!(outcome.series().len(), SYNTHETIC_DAYS);
        assert_eq!(outcome.series().first_date(), reference_date());
    }

    #[test]
    fn directory_path_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let mut adapter = CsvAdapter::new(dir.path().to_path_buf(), rng_from_seed(Some(1)));

        // not a missing file, so no fallback
        let result = adapter.load();
        assert!(matches!(result, Err(StockvizError::Io(_))), "{:?}", result);
    }

    #[test]
    fn fallback_prints_notice_once() {
        let dir = TempDir::new().unwrap();
        let mut adapter = CsvAdapter::with_notice(
            dir.path().join("absent.csv"),
            rng_from_seed(Some(2)),
            Vec::new(),
        );

        assert!(adapter.load().unwrap().is_generated());
        let printed = String::from_utf8(adapter.notice().clone()).unwrap();
        assert_eq!(printed, format!("{}\n", FALLBACK_NOTICE));
    }

    #[test]
    fn file_load_prints_nothing() {
        let (_dir, path) = setup_test_data("Date,Close\n2024-01-01,1.0\n2024-01-02,2.0\n");
        let mut adapter = CsvAdapter::with_notice(path, rng_from_seed(Some(2)), Vec::new());

        assert!(!adapter.load().unwrap().is_generated());
        assert!(adapter.notice().is_empty());
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let series = read_prices("DATE , close\n2024-02-01, 12.5\n".as_bytes()).unwrap();
        assert_eq!(series.points()[0].date, date(2024, 2, 1));
        assert_eq!(series.points()[0].close, 12.5);
    }

    #[test]
    fn accepts_timestamps() {
        let series = read_prices("Date,Close\n2024-02-01 00:00:00,12.5\n".as_bytes()).unwrap();
        assert_eq!(series.first_date(), date(2024, 2, 1));
    }

    #[test]
    fn unsorted_rows_are_sorted() {
        let series =
            read_prices("Date,Close\n2024-01-03,3\n2024-01-01,1\n2024-01-02,2\n".as_bytes())
                .unwrap();
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn missing_close_column() {
        let result = read_prices("Date,Open\n2024-01-01,1\n".as_bytes());
        match result {
            Err(StockvizError::MissingColumn { column }) => assert_eq!(column, "close"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn invalid_date_names_row() {
        let result = read_prices("Date,Close\n2024-01-01,1\n01/02/2024,2\n".as_bytes());
        match result {
            Err(StockvizError::InvalidDate { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "01/02/2024");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn invalid_price_names_row() {
        let result = read_prices("Date,Close\n2024-01-01,abc\n".as_bytes());
        assert!(matches!(
            result,
            Err(StockvizError::InvalidPrice { row: 1, .. })
        ));

        let result = read_prices("Date,Close\n2024-01-01,NaN\n".as_bytes());
        assert!(matches!(result, Err(StockvizError::InvalidPrice { .. })));
    }

    #[test]
    fn header_only_file_is_empty() {
        let result = read_prices("Date,Close\n".as_bytes());
        assert!(matches!(result, Err(StockvizError::EmptySeries)));
    }

    #[test]
    fn duplicate_dates_rejected() {
        let result = read_prices("Date,Close\n2024-01-01,1\n2024-01-01,2\n".as_bytes());
        assert!(matches!(result, Err(StockvizError::DuplicateDate { .. })));
    }

    #[test]
    fn ragged_row_is_csv_error() {
        let result = read_prices("Date,Close\n2024-01-01,1,extra\n".as_bytes());
        assert!(matches!(result, Err(StockvizError::Csv { .. })));
    }
}
