#![allow(dead_code)]

use chrono::NaiveDate;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use stockviz::domain::error::StockvizError;
pub use stockviz::domain::price::{PricePoint, PriceSeries};
use stockviz::ports::data_port::{LoadOutcome, PriceSource};
use stockviz::ports::display_port::DisplayPort;

pub struct MockPriceSource {
    pub outcome: Option<Result<LoadOutcome, StockvizError>>,
}

impl MockPriceSource {
    pub fn loaded(series: PriceSeries) -> Self {
        Self {
            outcome: Some(Ok(LoadOutcome::Loaded(series))),
        }
    }

    pub fn failing(err: StockvizError) -> Self {
        Self {
            outcome: Some(Err(err)),
        }
    }
}

impl PriceSource for MockPriceSource {
    fn load(&mut self) -> Result<LoadOutcome, StockvizError> {
        self.outcome.take().unwrap_or(Err(StockvizError::EmptySeries))
    }
}

/// Records every path it is asked to show.
#[derive(Default)]
pub struct RecordingDisplay {
    pub shown: RefCell<Vec<PathBuf>>,
}

impl DisplayPort for RecordingDisplay {
    fn show(&self, path: &Path) -> Result<(), StockvizError> {
        self.shown.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

pub struct FailingDisplay;

impl DisplayPort for FailingDisplay {
    fn show(&self, _path: &Path) -> Result<(), StockvizError> {
        Err(StockvizError::Display {
            reason: "no display".into(),
        })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One row per consecutive day from 2024-01-01.
pub fn make_series(prices: &[f64]) -> PriceSeries {
    let points = date(2024, 1, 1)
        .iter_days()
        .zip(prices)
        .map(|(d, &c)| PricePoint::new(d, c))
        .collect();
    PriceSeries::new(points).unwrap()
}

pub fn write_csv(dir: &Path, rows: &[(NaiveDate, f64)]) -> PathBuf {
    let mut content = String::from("Date,Open,High,Low,Close,Volume\n");
    for (d, close) in rows {
        content.push_str(&format!(
            "{},{},{},{},{},1000\n",
            d.format("%Y-%m-%d"),
            close,
            close,
            close,
            close
        ));
    }
    let path = dir.join("stock_data.csv");
    std::fs::write(&path, content).unwrap();
    path
}
