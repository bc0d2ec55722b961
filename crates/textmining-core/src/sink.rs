//! Append-only report sinks

use crate::error::SearchError;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Sink file for the line-dump report
pub const LOG_FILE_NAME: &str = "TextMiningLog.log";
/// Sink file for the occurrence-summary report
pub const HISTORY_FILE_NAME: &str = "TextMiningHistory.txt";

/// Line-oriented, append-only destination for report lines
pub trait ReportSink {
    fn append_line(&mut self, line: &str) -> Result<(), SearchError>;

    fn flush(&mut self) -> Result<(), SearchError>;

    fn append_lines(&mut self, lines: &[String]) -> Result<(), SearchError> {
        for line in lines {
            self.append_line(line)?;
        }
        Ok(())
    }
}

/// A file opened in append mode for the duration of one search
///
/// Buffered lines are flushed on drop as well, so early returns still
/// release the handle.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileSink {
    /// Open (or create) `dir/file_name` for appending; never truncates
    pub fn open(dir: &Path, file_name: &str) -> Result<Self, SearchError> {
        let path = dir.join(file_name);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SearchError::SinkWriteFailure {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    fn failure(&self, source: std::io::Error) -> SearchError {
        SearchError::SinkWriteFailure {
            path: self.path.clone(),
            source,
        }
    }
}

impl ReportSink for FileSink {
    fn append_line(&mut self, line: &str) -> Result<(), SearchError> {
        writeln!(self.writer, "{line}").map_err(|e| self.failure(e))
    }

    fn flush(&mut self) -> Result<(), SearchError> {
        self.writer.flush().map_err(|e| self.failure(e))
    }
}
