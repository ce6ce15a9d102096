//! Port traits at the seams between the pipeline stages.

pub mod data_port;
pub mod chart_port;
pub mod display_port;
