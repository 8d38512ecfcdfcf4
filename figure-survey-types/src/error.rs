use crate::Phase;

/// Input problems detected before anything is written to a sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select at least one option or 'None of the above'.")]
    NothingSelected,

    #[error("Cannot select both A–F and 'None of the above'.")]
    ConflictingSelection,

    #[error("Please enter your name before submitting.")]
    SubmitWithoutName,

    #[error("Please complete all questions before submitting.")]
    Incomplete { completed: usize, total: usize },

    #[error("Please enter your name.")]
    MissingName,

    #[error("Question {number} does not exist (survey has {total} questions)")]
    UnknownQuestion { number: usize, total: usize },
}

/// Failure while appending a record to a sink.
///
/// Every variant has a short [`kind`](SinkError::kind) that is shown to the
/// respondent together with the message.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The service credential could not be read or parsed.
    #[error("{0}")]
    Credentials(String),

    /// The credential was rejected.
    #[error("{0}")]
    Auth(String),

    /// No spreadsheet with this name is visible to the credential.
    #[error("Spreadsheet '{0}' not found")]
    SpreadsheetNotFound(String),

    /// Transport failure talking to the remote service.
    #[error(transparent)]
    Network(anyhow::Error),

    /// The remote service answered with an unexpected status.
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(anyhow::Error),
}

impl SinkError {
    /// Short name of the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Credentials(_) => "CredentialsError",
            Self::Auth(_) => "AuthError",
            Self::SpreadsheetNotFound(_) => "SpreadsheetNotFound",
            Self::Network(_) => "NetworkError",
            Self::Api { .. } => "ApiError",
            Self::Io(_) => "IoError",
            Self::Csv(_) => "CsvError",
        }
    }

    /// `"<kind> - <message>"`, the form shown after "Submission failed:".
    pub fn report(&self) -> String {
        format!("{} - {}", self.kind(), self)
    }
}

/// Error type for survey flow operations.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// The input was rejected; nothing changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The operation is not allowed in the current phase.
    #[error("Not allowed while the survey is {0}")]
    WrongPhase(Phase),

    /// The sink failed; session state is unchanged.
    #[error("⚠️ Submission failed: {}", .0.report())]
    Sink(#[from] SinkError),
}

impl SurveyError {
    /// Check if this error is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The underlying sink error, if any.
    pub fn sink_error(&self) -> Option<&SinkError> {
        match self {
            Self::Sink(err) => Some(err),
            _ => None,
        }
    }
}
