use crate::{SinkError, SubmittedRecord};

/// Trait for stores that receive submitted records.
///
/// A sink appends exactly one row per call and never updates or deletes
/// rows. Implementations block until the row is written or the write fails;
/// failures are reported as-is, without retries.
pub trait RecordSink {
    /// Append one record.
    fn append_record(&self, record: &SubmittedRecord) -> Result<(), SinkError>;

    /// Human-readable description of the target, used in logs.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &S {
    fn append_record(&self, record: &SubmittedRecord) -> Result<(), SinkError> {
        (**self).append_record(record)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn append_record(&self, record: &SubmittedRecord) -> Result<(), SinkError> {
        (**self).append_record(record)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
