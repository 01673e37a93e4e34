//! Append-only CSV record sink
//!
//! The file is truncated and given its header once, when the sink is
//! created. Every `append` reopens the file in append mode, writes one row,
//! flushes and closes it again, so completed rows survive a later crash.

use crate::types::{Record, RecordSink};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column header row
pub const HEADER: [&str; 5] = ["identifier", "year", "url", "brightness", "contrast"];

/// Sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// CSV file sink
#[derive(Debug)]
pub struct CsvSink {
    path: PathBuf,
    rows_written: usize,
}

impl CsvSink {
    /// Truncate (or create) `path` and write the header row
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        let mut writer = csv::Writer::from_path(&path).map_err(|e| csv_error(&path, e))?;
        writer
            .write_record(HEADER)
            .map_err(|e| csv_error(&path, e))?;
        writer.flush().map_err(|e| io_error(&path, e))?;

        tracing::debug!(path = %path.display(), "CSV sink created");

        Ok(Self {
            path,
            rows_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows appended through this sink
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, record: &Record) -> Result<(), SinkError> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| io_error(&self.path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .serialize(record)
            .map_err(|e| csv_error(&self.path, e))?;
        writer.flush().map_err(|e| io_error(&self.path, e))?;

        self.rows_written += 1;
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> SinkError {
    SinkError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn csv_error(path: &Path, source: csv::Error) -> SinkError {
    SinkError::Csv {
        path: path.to_path_buf(),
        source,
    }
}
