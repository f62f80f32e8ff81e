//! Batch test harness and its report

mod batch;
pub mod report;

pub use batch::{run_batch, BatchReport, ReportEntry, DEFAULT_QUESTIONS};
pub use report::DEFAULT_REPORT_PATH;
