//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod svg_chart_adapter;
pub mod system_viewer;
