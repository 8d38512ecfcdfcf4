//! # figure-survey-egui
//!
//! Native windows for figure-survey, built with `eframe` and `egui`.
//!
//! Two windows are provided:
//! - the visual figure survey: a navigation bar, one image question at a
//!   time with checkboxes A..F and "None of the above", a submit panel and
//!   a review dialog;
//! - the user study form: name, age, satisfaction and feedback on one page.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use figure_survey::SurveyDefinition;
//! use figure_survey_egui::EguiBackend;
//! use figure_survey_sink::CsvFileSink;
//!
//! fn main() -> anyhow::Result<()> {
//!     let backend = EguiBackend::new()
//!         .with_title("Visual Figure Survey")
//!         .with_window_size([1200.0, 800.0]);
//!
//!     let sink = CsvFileSink::new("responses", "responses.csv");
//!     let record = backend.run_visual(SurveyDefinition::new(20), Box::new(sink))?;
//!     println!("{:?}", record);
//!     Ok(())
//! }
//! ```

mod backend;
mod notice;
mod user_study;
mod visual;

pub use backend::{EguiBackend, EguiError, Submissions};
pub use user_study::UserStudyApp;
pub use visual::VisualSurveyApp;
