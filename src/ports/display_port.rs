//! Chart presentation port trait.

use std::path::Path;

use crate::domain::error::StockvizError;

pub trait DisplayPort {
    fn show(&self, path: &Path) -> Result<(), StockvizError>;
}
