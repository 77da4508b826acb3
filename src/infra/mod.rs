//! I/O boundary: fetching the analysis report.

pub mod loader;
