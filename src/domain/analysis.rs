//! Rolling mean and local extrema over a price series.
//!
//! Windows are positional: the i-th row of the series is the i-th trading
//! day regardless of calendar gaps.
//!
//! - Rolling mean: MEAN(n)[i] = sum(C[i-j] for j in 0..n) / n, absent for the
//!   first (n-1) rows.
//! - Peak: C[i] == max(C[i-h..=i+h]) with h = (w-1)/2, false where the
//!   centered window runs off either end of the series. Trough uses min.
//!   Ties flag every tied row.

use chrono::NaiveDate;

use crate::domain::error::StockvizError;
use crate::domain::price::PriceSeries;

pub const DEFAULT_ROLLING_WINDOW: usize = 7;
pub const DEFAULT_EXTREMA_WINDOW: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub rolling_window: usize,
    pub extrema_window: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rolling_window: DEFAULT_ROLLING_WINDOW,
            extrema_window: DEFAULT_EXTREMA_WINDOW,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), StockvizError> {
        if self.rolling_window == 0 {
            return Err(StockvizError::InvalidWindow {
                name: "rolling".into(),
                size: self.rolling_window,
            });
        }
        // A centered window needs the same number of rows on each side.
        if self.extrema_window == 0 || self.extrema_window % 2 == 0 {
            return Err(StockvizError::InvalidWindow {
                name: "extrema".into(),
                size: self.extrema_window,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub rolling_mean: Option<f64>,
    pub is_peak: bool,
    pub is_trough: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedSeries {
    pub config: AnalysisConfig,
    points: Vec<AnalyzedPoint>,
}

impl AnalyzedSeries {
    pub fn points(&self) -> &[AnalyzedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn peaks(&self) -> impl Iterator<Item = &AnalyzedPoint> {
        self.points.iter().filter(|p| p.is_peak)
    }

    pub fn troughs(&self) -> impl Iterator<Item = &AnalyzedPoint> {
        self.points.iter().filter(|p| p.is_trough)
    }

    /// Highest close; the earliest row wins a tie.
    pub fn global_max(&self) -> &AnalyzedPoint {
        let first = &self.points[0];
        self.points[1..]
            .iter()
            .fold(first, |best, p| if p.close > best.close { p } else { best })
    }

    /// Lowest close; the earliest row wins a tie.
    pub fn global_min(&self) -> &AnalyzedPoint {
        let first = &self.points[0];
        self.points[1..]
            .iter()
            .fold(first, |best, p| if p.close < best.close { p } else { best })
    }

    /// (min, max) over closes and defined rolling means.
    pub fn value_range(&self) -> (f64, f64) {
        self.points
            .iter()
            .flat_map(|p| std::iter::once(p.close).chain(p.rolling_mean))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }
}

/// Trailing arithmetic mean over `window` values. Terms are scaled before
/// summing so closes near `f64::MAX` stay finite.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let warmup = window.saturating_sub(1);

    (0..values.len())
        .map(|i| {
            if window == 0 || i < warmup {
                return None;
            }
            let start = i + 1 - window;
            let n = window as f64;
            Some(values[start..=i].iter().map(|v| v / n).sum())
        })
        .collect()
}

/// Per-row (is_peak, is_trough) over a centered window of odd width.
pub fn centered_extrema(values: &[f64], window: usize) -> Vec<(bool, bool)> {
    let half = window / 2;
    let n = values.len();

    (0..n)
        .map(|i| {
            if window == 0 || i < half || i + half >= n {
                return (false, false);
            }
            let slice = &values[i - half..=i + half];
            let max = slice.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min = slice.iter().copied().fold(f64::INFINITY, f64::min);
            (values[i] == max, values[i] == min)
        })
        .collect()
}

/// Enrich `series` with rolling mean and extrema flags.
pub fn analyze(
    series: &PriceSeries,
    config: &AnalysisConfig,
) -> Result<AnalyzedSeries, StockvizError> {
    config.validate()?;

    let closes = series.closes();
    let means = rolling_mean(&closes, config.rolling_window);
    let extrema = centered_extrema(&closes, config.extrema_window);

    let points = series
        .points()
        .iter()
        .zip(means)
        .zip(extrema)
        .map(|((p, rolling_mean), (is_peak, is_trough))| AnalyzedPoint {
            date: p.date,
            close: p.close,
            rolling_mean,
            is_peak,
            is_trough,
        })
        .collect();

    Ok(AnalyzedSeries {
        config: *config,
        points,
    })
}
