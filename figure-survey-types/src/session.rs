//! Session state and the question flow of the visual figure survey.
//!
//! The flow is a small state machine:
//!
//! ```text
//! Editing(q) --navigate / proceed--> Editing(q')
//! Editing(q) --open_review-------->  Reviewing        (all answered, name given)
//! Reviewing  --cancel_review------>  Editing(q)
//! Reviewing  --confirm (ok)------->  Submitted        (terminal, state cleared)
//! Reviewing  --confirm (err)------>  Reviewing        (state intact, retry)
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::{
    Checkboxes, ISO_TIMESTAMP, QuestionId, RecordSink, Response, Responses, SubmittedRecord,
    SurveyDefinition, SurveyError, ValidationError, format_timestamp,
};

/// Where a session is in the question flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Answering questions.
    Editing,
    /// The review dialog is open.
    Reviewing,
    /// Responses were written; the session is closed.
    Submitted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing => f.write_str("being edited"),
            Self::Reviewing => f.write_str("under review"),
            Self::Submitted => f.write_str("submitted"),
        }
    }
}

/// `(completed, total)` question counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub completed: usize,
    pub total: usize,
}

impl Completion {
    /// True when every question has a complete response.
    pub fn is_done(&self) -> bool {
        self.completed == self.total
    }
}

/// State shown on a navigation button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Current,
    Completed,
    Unanswered,
}

impl NavState {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Current => "➡️",
            Self::Completed => "✅",
            Self::Unanswered => "🔲",
        }
    }
}

/// One button of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavButton {
    pub question: QuestionId,
    pub state: NavState,
}

impl NavButton {
    /// Button caption, e.g. `"✅ 3"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.state.icon(), self.question.number())
    }
}

/// Outcome of a successful Proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proceed {
    /// Moved on to this question.
    Advanced(QuestionId),
    /// Already at the last question.
    Finished,
}

/// One line of the review dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewLine {
    pub question: QuestionId,
    pub complete: bool,
    pub answer: String,
}

impl fmt::Display for ReviewLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = if self.complete { "✅" } else { "❌" };
        write!(
            f,
            "{icon} Question {}: {}",
            self.question.number(),
            self.answer
        )
    }
}

/// State of one respondent's visual survey.
///
/// Passed explicitly to every UI handler; nothing here is global.
#[derive(Debug, Clone)]
pub struct Session {
    definition: SurveyDefinition,
    current: QuestionId,
    responses: Responses,
    checkboxes: BTreeMap<QuestionId, Checkboxes>,
    name: String,
    phase: Phase,
}

impl Session {
    /// Start a new session at question 1.
    pub fn new(definition: SurveyDefinition) -> Self {
        Self {
            definition,
            current: QuestionId::FIRST,
            responses: Responses::new(),
            checkboxes: BTreeMap::new(),
            name: String::new(),
            phase: Phase::Editing,
        }
    }

    pub fn definition(&self) -> &SurveyDefinition {
        &self.definition
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The question currently shown.
    pub fn current(&self) -> QuestionId {
        self.current
    }

    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    pub fn response(&self, id: QuestionId) -> &Response {
        self.responses.get(id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Checkbox state of a question.
    ///
    /// Questions never touched show their stored response.
    pub fn checkboxes(&self, id: QuestionId) -> Checkboxes {
        self.checkboxes
            .get(&id)
            .copied()
            .unwrap_or_else(|| self.responses.get(id).to_checkboxes())
    }

    /// Apply new checkbox state to the current question.
    ///
    /// The response is recomputed from the boxes and stored only if it
    /// differs. Returns whether the stored response changed.
    pub fn set_checkboxes(&mut self, boxes: Checkboxes) -> Result<bool, SurveyError> {
        self.require(Phase::Editing)?;
        let id = self.current;
        self.checkboxes.insert(id, boxes);
        let changed = self.responses.update(id, Response::from_checkboxes(&boxes));
        if changed {
            debug!(question = %id, response = %self.responses.get(id).serialize(), "response updated");
        }
        Ok(changed)
    }

    /// Replace the respondent name.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), SurveyError> {
        self.require(Phase::Editing)?;
        self.name = name.into();
        Ok(())
    }

    /// Jump to a question. Returns `false` if it already is the current one.
    pub fn navigate(&mut self, number: usize) -> Result<bool, SurveyError> {
        self.require(Phase::Editing)?;
        let target = self
            .definition
            .question(number)
            .ok_or(ValidationError::UnknownQuestion {
                number,
                total: self.definition.len(),
            })?;
        if target == self.current {
            return Ok(false);
        }
        debug!(from = %self.current, to = %target, "navigate");
        self.current = target;
        Ok(true)
    }

    /// Validate the current question's boxes and move on.
    ///
    /// On error neither the current question nor any response changes.
    pub fn proceed(&mut self) -> Result<Proceed, SurveyError> {
        self.require(Phase::Editing)?;
        let boxes = self.checkboxes(self.current);
        match (boxes.any_choice(), boxes.none_checked()) {
            (false, false) => return Err(ValidationError::NothingSelected.into()),
            (true, true) => return Err(ValidationError::ConflictingSelection.into()),
            _ => {}
        }
        if self.current.number() < self.definition.len() {
            self.current = self.current.next();
            debug!(to = %self.current, "proceed");
            Ok(Proceed::Advanced(self.current))
        } else {
            Ok(Proceed::Finished)
        }
    }

    /// Completed and total question counts.
    pub fn completion(&self) -> Completion {
        Completion {
            completed: self.responses.completed_count(self.definition.len()),
            total: self.definition.len(),
        }
    }

    /// Navigation buttons for all questions.
    pub fn nav_buttons(&self) -> Vec<NavButton> {
        self.definition
            .question_ids()
            .map(|question| {
                let state = if question == self.current {
                    NavState::Current
                } else if self.responses.is_complete(question) {
                    NavState::Completed
                } else {
                    NavState::Unanswered
                };
                NavButton { question, state }
            })
            .collect()
    }

    /// Whether the submission gate is enabled.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Editing && self.check_submittable().is_ok()
    }

    fn check_submittable(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::SubmitWithoutName);
        }
        let completion = self.completion();
        if !completion.is_done() {
            return Err(ValidationError::Incomplete {
                completed: completion.completed,
                total: completion.total,
            });
        }
        Ok(())
    }

    /// Open the review dialog.
    pub fn open_review(&mut self) -> Result<(), SurveyError> {
        self.require(Phase::Editing)?;
        self.check_submittable()?;
        self.phase = Phase::Reviewing;
        debug!("review opened");
        Ok(())
    }

    /// Close the review dialog without changes.
    pub fn cancel_review(&mut self) -> Result<(), SurveyError> {
        self.require(Phase::Reviewing)?;
        self.phase = Phase::Editing;
        debug!("review cancelled");
        Ok(())
    }

    /// Summary lines for the review dialog.
    pub fn review_lines(&self) -> Vec<ReviewLine> {
        self.definition
            .question_ids()
            .map(|question| {
                let response = self.responses.get(question);
                ReviewLine {
                    question,
                    complete: response.is_complete(),
                    answer: response.display(),
                }
            })
            .collect()
    }

    /// Build the record that confirming would write.
    pub fn record(&self, at: &DateTime<Local>) -> SubmittedRecord {
        self.definition.question_ids().fold(
            SubmittedRecord::new(format_timestamp(at, ISO_TIMESTAMP), self.name.clone()),
            |record, id| record.with_field(id.to_string(), self.responses.get(id).serialize()),
        )
    }

    /// Confirm the review and write the record with the current time.
    pub fn confirm(&mut self, sink: &dyn RecordSink) -> Result<SubmittedRecord, SurveyError> {
        self.confirm_at(sink, &Local::now())
    }

    /// Confirm the review and write the record.
    ///
    /// On success the session is cleared and closed. On failure nothing
    /// changes and the dialog stays open.
    pub fn confirm_at(
        &mut self,
        sink: &dyn RecordSink,
        at: &DateTime<Local>,
    ) -> Result<SubmittedRecord, SurveyError> {
        self.require(Phase::Reviewing)?;
        let record = self.record(at);
        if let Err(err) = sink.append_record(&record) {
            warn!(sink = %sink.describe(), kind = err.kind(), error = %err, "submission failed");
            return Err(err.into());
        }
        info!(sink = %sink.describe(), respondent = %record.respondent, "submission recorded");
        self.clear();
        Ok(record)
    }

    fn clear(&mut self) {
        self.responses.clear();
        self.checkboxes.clear();
        self.name.clear();
        self.current = QuestionId::FIRST;
        self.phase = Phase::Submitted;
    }

    fn require(&self, phase: Phase) -> Result<(), SurveyError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(SurveyError::WrongPhase(self.phase))
        }
    }
}
