//! CLI library components for the DataFax toolkit.

pub mod logging;
pub mod report;
pub mod table;
