//! Price data access port trait.

use crate::domain::error::StockvizError;
use crate::domain::price::PriceSeries;

/// Where a loaded series came from.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(PriceSeries),
    Generated(PriceSeries),
}

impl LoadOutcome {
    pub fn series(&self) -> &PriceSeries {
        match self {
            LoadOutcome::Loaded(s) | LoadOutcome::Generated(s) => s,
        }
    }

    pub fn into_series(self) -> PriceSeries {
        match self {
            LoadOutcome::Loaded(s) | LoadOutcome::Generated(s) => s,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, LoadOutcome::Generated(_))
    }
}

pub trait PriceSource {
    fn load(&mut self) -> Result<LoadOutcome, StockvizError>;
}
