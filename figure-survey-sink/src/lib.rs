//! # figure-survey-sink
//!
//! Stores that receive submitted survey records.
//!
//! Two `RecordSink` implementations are provided:
//! - `CsvFileSink` appends rows to a local CSV file, writing the header
//!   only when the file is created.
//! - `SheetsSink` appends rows to the first sheet of a named spreadsheet,
//!   authenticating with a service-account credential.
//!
//! Both block until the row is written and never retry on failure.

mod csv_file;
pub use csv_file::CsvFileSink;

mod sheets;
pub use sheets::{CredentialSource, Endpoints, SCOPES, ServiceAccountKey, SheetsSink};
