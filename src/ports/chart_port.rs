//! Chart rendering port trait.

use std::path::Path;

use crate::domain::analysis::AnalyzedSeries;
use crate::domain::error::StockvizError;

/// Port for writing a chart of an analyzed series to `output_path`.
pub trait ChartPort {
    fn render(&self, series: &AnalyzedSeries, output_path: &Path) -> Result<(), StockvizError>;
}
