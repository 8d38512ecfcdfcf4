//! # figure-survey
//!
//! Image-based multiple choice surveys with pluggable record sinks.
//!
//! A visual figure survey shows one image per question and lets the
//! respondent tick any of the options A..F, or "None of the above". The
//! `Session` type drives the whole flow: answering, navigating, reviewing
//! and finally appending one row to a `RecordSink`.
//!
//! ## Usage
//!
//! ```rust
//! use figure_survey::{Checkboxes, Choice, Session, SurveyDefinition, TestSink};
//!
//! let mut session = Session::new(SurveyDefinition::new(1));
//!
//! let mut boxes = Checkboxes::default();
//! boxes.set(Choice::B, true);
//! session.set_checkboxes(boxes).unwrap();
//! session.set_name("Alice").unwrap();
//!
//! session.open_review().unwrap();
//! let sink = TestSink::new();
//! session.confirm(&sink).unwrap();
//!
//! assert_eq!(sink.records()[0].row()[1..].to_vec(), vec!["Alice", "B"]);
//! ```
//!
//! ## Sinks
//!
//! Sinks are separate crates or types that implement `RecordSink`:
//! - `figure-survey-sink` - CSV files and spreadsheets
//! - `TestSink` (here) - in-memory, for tests
//!
//! ## Frontends
//!
//! - `figure-survey-egui` - native window via egui

// Re-export all types from figure-survey-types
pub use figure_survey_types::*;

// Test sink for exercising surveys without a real store
mod test_sink;
pub use test_sink::TestSink;
