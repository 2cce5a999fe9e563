//! Aggregation of grade/attendance history and the charts and workbooks built from it.

pub mod aggregate;
pub mod charts;
pub mod render;
pub mod spreadsheet;
