//! Core domain types and logic.

pub mod price;
pub mod synthetic;
pub mod analysis;
pub mod chart;
pub mod error;
