//! `gt-output` — metric collection and time-to-collision export.
//!
//! [`MetricCollector`] implements `gt_sim::SimObserver` and records agent
//! positions every step.  [`episode_samples`] turns one pedestrian/vehicle
//! pair of recorded tracks into [`TtcSample`] rows, which any
//! [`SampleWriter`] backend persists:
//!
//! | Feature   | Backend     | File created       |
//! |-----------|-------------|--------------------|
//! | *(none)*  | CSV         | `TTC.csv`          |
//! | `sqlite`  | SQLite      | `TTC.db`           |
//! | `parquet` | Parquet     | `TTC.parquet`      |
//!
//! # Usage
//!
//! ```rust,ignore
//! use gt_output::{CsvWriter, MetricCollector, SampleWriter, episode_samples};
//!
//! let mut collector = MetricCollector::new();
//! env.reset_with(&mut collector);
//! env.run(&mut collector)?;
//! let rows = episode_samples(&collector, ped, veh, speed, Direction::East);
//!
//! let mut writer = CsvWriter::new(Path::new("."))?;
//! writer.write_samples(&rows)?;
//! writer.finish()?;
//! ```

pub mod collector;
pub mod csv;
pub mod error;
pub mod ttc;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use collector::MetricCollector;
pub use crate::csv::{CsvWriter, read_samples};
pub use error::{OutputError, OutputResult};
pub use ttc::{TtcSample, episode_samples, time_to_collision};
pub use writer::SampleWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetWriter;
