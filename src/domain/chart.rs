//! Chart geometry: canvas size, plot area and data-to-pixel scales.

use chrono::NaiveDate;

use crate::domain::analysis::AnalyzedSeries;

/// 12x6 inches at 120 dpi.
pub const CHART_WIDTH: f64 = 1440.0;
pub const CHART_HEIGHT: f64 = 720.0;
pub const MARGIN_LEFT: f64 = 90.0;
pub const MARGIN_RIGHT: f64 = 30.0;
pub const MARGIN_TOP: f64 = 70.0;
pub const MARGIN_BOTTOM: f64 = 70.0;

pub const Y_TICKS: usize = 6;
pub const X_TICKS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub plot_left: f64,
    pub plot_top: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub y_min: f64,
    pub y_max: f64,
    rows: usize,
}

impl ChartLayout {
    /// Pads the value range by 5% on each side. A flat (or nearly flat)
    /// series gets +/-1, or a relative pad once 1.0 is below the precision
    /// of the level.
    pub fn for_series(series: &AnalyzedSeries) -> Self {
        let (lo, hi) = series.value_range();
        let floor = hi.abs().max(lo.abs()) * 1e-9;
        let pad = hi * 0.05 - lo * 0.05;
        let pad = if pad > floor {
            pad
        } else {
            1.0f64.max(hi.abs() * 1e-6)
        };
        let (y_min, y_max) = (lo - pad, hi + pad);

        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            plot_left: MARGIN_LEFT,
            plot_top: MARGIN_TOP,
            plot_width: CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            plot_height: CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
            y_min,
            y_max,
            rows: series.len(),
        }
    }

    pub fn plot_bottom(&self) -> f64 {
        self.plot_top + self.plot_height
    }

    pub fn plot_right(&self) -> f64 {
        self.plot_left + self.plot_width
    }

    /// A single-row series sits in the middle of the x axis.
    pub fn x(&self, index: usize) -> f64 {
        if self.rows < 2 {
            return self.plot_left + self.plot_width / 2.0;
        }
        self.plot_left + (index as f64 / (self.rows - 1) as f64) * self.plot_width
    }

    pub fn y(&self, value: f64) -> f64 {
        self.plot_top + self.plot_height
            - ((value - self.y_min) / (self.y_max - self.y_min)) * self.plot_height
    }

    /// Evenly spaced price levels from y_min to y_max inclusive.
    pub fn y_ticks(&self) -> Vec<f64> {
        let step = (self.y_max - self.y_min) / (Y_TICKS - 1) as f64;
        (0..Y_TICKS).map(|i| self.y_min + step * i as f64).collect()
    }

    /// Row indices for date labels, first and last always included.
    pub fn x_tick_rows(&self) -> Vec<usize> {
        if self.rows <= X_TICKS {
            return (0..self.rows).collect();
        }
        let last = self.rows - 1;
        let mut rows: Vec<usize> = (0..X_TICKS)
            .map(|i| (i * last + (X_TICKS - 1) / 2) / (X_TICKS - 1))
            .collect();
        rows.dedup();
        rows
    }
}

pub fn format_date_tick(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
