use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use figure_survey_types::{RecordSink, SinkError, SubmittedRecord};
use tracing::{debug, info};

/// Appends records to a CSV file.
///
/// The directory and the file are created on the first append. The header
/// row is written only while the file is empty, so later appends never
/// repeat it.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    /// Sink writing to `directory/file_name`.
    pub fn new(directory: impl Into<PathBuf>, file_name: impl AsRef<Path>) -> Self {
        Self {
            path: directory.into().join(file_name),
        }
    }

    /// Path of the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvFileSink {
    fn append_record(&self, record: &SubmittedRecord) -> Result<(), SinkError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            debug!(path = %self.path.display(), "writing csv header");
            writer
                .write_record(record.header())
                .map_err(|e| SinkError::Csv(e.into()))?;
        }
        writer
            .write_record(record.row())
            .map_err(|e| SinkError::Csv(e.into()))?;
        writer.flush()?;

        info!(path = %self.path.display(), "row appended");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("csv file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> SubmittedRecord {
        SubmittedRecord::new("2025-01-01T00:00:00.000000", name)
            .with_field("q1", "A,C")
            .with_field("q2", "None of the above")
    }

    #[test]
    fn creates_directory_and_header() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = CsvFileSink::new(tmp.path().join("responses"), "responses.csv");

        sink.append_record(&record("Alice")).unwrap();

        let contents = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(
            contents,
            "timestamp,name,q1,q2\n\
             2025-01-01T00:00:00.000000,Alice,\"A,C\",None of the above\n"
        );
    }

    #[test]
    fn header_is_not_repeated() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = CsvFileSink::new(tmp.path(), "out.csv");

        sink.append_record(&record("Alice")).unwrap();
        sink.append_record(&record("Bob")).unwrap();

        let contents = fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.iter().filter(|l| l.starts_with("timestamp")).count(), 1);
        assert!(lines[2].contains("Bob"));
    }

    #[test]
    fn unwritable_target_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let sink = CsvFileSink::new(&blocker, "out.csv");

        let err = sink.append_record(&record("Alice")).unwrap_err();
        assert_eq!(err.kind(), "IoError");
    }
}
