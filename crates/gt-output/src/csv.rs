//! CSV output backend.
//!
//! Creates (or truncates) `TTC.csv` in the configured output directory.

use std::fs::File;
use std::path::Path;

use csv::{Reader, Writer, WriterBuilder};

use crate::ttc::COLUMNS;
use crate::writer::SampleWriter;
use crate::{OutputResult, TtcSample};

/// File name written by [`CsvWriter`].
pub const CSV_FILE: &str = "TTC.csv";

/// Writes samples to `TTC.csv`.
pub struct CsvWriter {
    samples:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `TTC.csv` in `dir`, overwriting any previous export, and write
    /// the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut samples = WriterBuilder::new()
            .has_headers(false)
            .from_path(dir.join(CSV_FILE))?;
        samples.write_record(COLUMNS)?;
        Ok(Self { samples, finished: false })
    }
}

impl SampleWriter for CsvWriter {
    fn write_samples(&mut self, rows: &[TtcSample]) -> OutputResult<()> {
        for row in rows {
            self.samples.serialize(row)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.samples.flush()?;
        Ok(())
    }
}

/// Reload every row of a CSV export.
pub fn read_samples(path: &Path) -> OutputResult<Vec<TtcSample>> {
    let mut rdr = Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
