//! SQLite output backend (feature `sqlite`).
//!
//! Creates `TTC.db` in the configured output directory with one table,
//! `ttc_samples`, whose columns match the CSV header.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::SampleWriter;
use crate::{OutputResult, TtcSample};

/// Writes samples to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `TTC.db` in `dir`, replacing any previous table.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("TTC.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS ttc_samples;
             CREATE TABLE ttc_samples (
                 pedX REAL NOT NULL,
                 pedY REAL NOT NULL,
                 vehX REAL NOT NULL,
                 vehY REAL NOT NULL,
                 TTC  REAL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl SampleWriter for SqliteWriter {
    fn write_samples(&mut self, rows: &[TtcSample]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO ttc_samples (pedX, pedY, vehX, vehY, TTC) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.ped_x, row.ped_y, row.veh_x, row.veh_y, row.ttc])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
