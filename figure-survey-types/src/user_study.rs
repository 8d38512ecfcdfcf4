//! The single-page user study form: name, age, satisfaction and feedback.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::{
    PLAIN_TIMESTAMP, RecordSink, SubmittedRecord, SurveyError, ValidationError, format_timestamp,
};

/// Allowed ages on the age slider.
pub const AGE_RANGE: RangeInclusive<u32> = 10..=100;

/// Answer to "How satisfied are you?".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Satisfaction {
    #[default]
    VerySatisfied,
    Satisfied,
    Neutral,
    Dissatisfied,
    VeryDissatisfied,
}

impl Satisfaction {
    /// All levels, in display order.
    pub const ALL: [Satisfaction; 5] = [
        Satisfaction::VerySatisfied,
        Satisfaction::Satisfied,
        Satisfaction::Neutral,
        Satisfaction::Dissatisfied,
        Satisfaction::VeryDissatisfied,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::VerySatisfied => "Very satisfied",
            Self::Satisfied => "Satisfied",
            Self::Neutral => "Neutral",
            Self::Dissatisfied => "Dissatisfied",
            Self::VeryDissatisfied => "Very dissatisfied",
        }
    }
}

impl fmt::Display for Satisfaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Field values of the user study form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStudyForm {
    pub name: String,
    pub age: u32,
    pub satisfaction: Satisfaction,
    pub feedback: String,
}

impl Default for UserStudyForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: *AGE_RANGE.start(),
            satisfaction: Satisfaction::default(),
            feedback: String::new(),
        }
    }
}

impl UserStudyForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the form before anything is written.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        Ok(())
    }

    /// The record for this form, age clamped to the slider range.
    pub fn record(&self, at: &DateTime<Local>) -> SubmittedRecord {
        let age = self.age.clamp(*AGE_RANGE.start(), *AGE_RANGE.end());
        SubmittedRecord::new(format_timestamp(at, PLAIN_TIMESTAMP), self.name.clone())
            .with_field("age", age.to_string())
            .with_field("satisfaction", self.satisfaction.label())
            .with_field("feedback", self.feedback.clone())
    }

    /// Validate and append with the current time.
    pub fn submit(&self, sink: &dyn RecordSink) -> Result<SubmittedRecord, SurveyError> {
        self.submit_at(sink, &Local::now())
    }

    /// Validate and append. The form keeps its values either way.
    pub fn submit_at(
        &self,
        sink: &dyn RecordSink,
        at: &DateTime<Local>,
    ) -> Result<SubmittedRecord, SurveyError> {
        self.validate()?;
        let record = self.record(at);
        if let Err(err) = sink.append_record(&record) {
            warn!(sink = %sink.describe(), kind = err.kind(), error = %err, "user study submission failed");
            return Err(err.into());
        }
        info!(sink = %sink.describe(), respondent = %record.respondent, "user study response recorded");
        Ok(record)
    }
}
