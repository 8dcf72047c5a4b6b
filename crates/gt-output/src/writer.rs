//! The `SampleWriter` trait implemented by all backend writers.

use crate::{OutputResult, TtcSample};

/// Trait implemented by the CSV, SQLite, and Parquet writers.
pub trait SampleWriter {
    /// Append a batch of rows.
    fn write_samples(&mut self, rows: &[TtcSample]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
