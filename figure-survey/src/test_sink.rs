//! Test sink for exercising surveys without a real store.
//!
//! `TestSink` keeps appended records in memory and can be told to fail
//! the next appends with given errors. This is useful for testing the
//! submission flow, including the retry path after a failed append.
//!
//! # Example
//!
//! ```rust
//! use figure_survey::{RecordSink, SinkError, SubmittedRecord, TestSink};
//!
//! let sink = TestSink::new().with_failure(SinkError::Auth("expired".to_string()));
//! let record = SubmittedRecord::new("2025-01-01T00:00:00.000000", "Alice");
//!
//! assert!(sink.append_record(&record).is_err());
//! assert!(sink.append_record(&record).is_ok());
//! assert_eq!(sink.records().len(), 1);
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::{RecordSink, SinkError, SubmittedRecord};

/// An in-memory sink that records every appended row.
#[derive(Debug, Default)]
pub struct TestSink {
    records: Mutex<Vec<SubmittedRecord>>,
    failures: Mutex<VecDeque<SinkError>>,
}

impl TestSink {
    /// Create a new empty test sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an error; each queued error fails one append, in order.
    pub fn with_failure(self, error: SinkError) -> Self {
        lock(&self.failures).push_back(error);
        self
    }

    /// Snapshot of all successfully appended records.
    pub fn records(&self) -> Vec<SubmittedRecord> {
        lock(&self.records).clone()
    }

    /// Number of queued failures not consumed yet.
    pub fn pending_failures(&self) -> usize {
        lock(&self.failures).len()
    }
}

impl RecordSink for TestSink {
    fn append_record(&self, record: &SubmittedRecord) -> Result<(), SinkError> {
        if let Some(error) = lock(&self.failures).pop_front() {
            return Err(error);
        }
        lock(&self.records).push(record.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory test sink".to_string()
    }
}

// A panic while holding the lock cannot leave the Vec half-written.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
