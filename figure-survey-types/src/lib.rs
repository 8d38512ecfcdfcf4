//! Core types for figure-survey.
//!
//! This crate provides the GUI-agnostic pieces of the surveys:
//! - `SurveyDefinition` - The shape of a visual figure survey
//! - `Choice`, `Checkboxes` and `Response` - What a respondent selects per question
//! - `Responses` and `QuestionId` - Collected answers keyed by `q{n}`
//! - `Session` - The question flow (editing, review, submission)
//! - `UserStudyForm` - The single-page user study form
//! - `SubmittedRecord` and `RecordSink` - Rows and the stores that receive them

mod question_id;
pub use question_id::{ParseQuestionIdError, QuestionId};

mod choice;
pub use choice::{Checkboxes, Choice, NONE_OF_THE_ABOVE};

mod response;
pub use response::Response;

mod responses;
pub use responses::Responses;

mod survey_definition;
pub use survey_definition::{QuestionImage, SurveyDefinition};

mod record;
pub use record::{Field, ISO_TIMESTAMP, PLAIN_TIMESTAMP, SubmittedRecord, format_timestamp};

mod error;
pub use error::{SinkError, SurveyError, ValidationError};

mod traits;
pub use traits::RecordSink;

mod session;
pub use session::{Completion, NavButton, NavState, Phase, Proceed, ReviewLine, Session};

mod user_study;
pub use user_study::{AGE_RANGE, Satisfaction, UserStudyForm};
