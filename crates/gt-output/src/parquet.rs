//! Parquet output backend (feature `parquet`).
//!
//! Creates `TTC.parquet` in the configured output directory.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::Float64Builder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::ttc::COLUMNS;
use crate::writer::SampleWriter;
use crate::{OutputResult, TtcSample};

fn sample_schema() -> Arc<Schema> {
    Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Float64, *name == "TTC"))
            .collect::<Vec<_>>(),
    ))
}

/// Writes samples to `TTC.parquet`.
///
/// `finish()` **must** be called to write the Parquet file footer.
pub struct ParquetWriter {
    writer: Option<ArrowWriter<File>>,
    schema: Arc<Schema>,
}

impl ParquetWriter {
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let schema = sample_schema();
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        let file = File::create(dir.join("TTC.parquet"))?;
        let writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(props))?;
        Ok(Self { writer: Some(writer), schema })
    }
}

impl SampleWriter for ParquetWriter {
    fn write_samples(&mut self, rows: &[TtcSample]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };

        let mut ped_x = Float64Builder::new();
        let mut ped_y = Float64Builder::new();
        let mut veh_x = Float64Builder::new();
        let mut veh_y = Float64Builder::new();
        let mut ttc   = Float64Builder::new();

        for row in rows {
            ped_x.append_value(row.ped_x);
            ped_y.append_value(row.ped_y);
            veh_x.append_value(row.veh_x);
            veh_y.append_value(row.veh_y);
            ttc.append_option(row.ttc);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.schema),
            vec![
                Arc::new(ped_x.finish()),
                Arc::new(ped_y.finish()),
                Arc::new(veh_x.finish()),
                Arc::new(veh_y.finish()),
                Arc::new(ttc.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.writer.take() {
            w.close()?;
        }
        Ok(())
    }
}
