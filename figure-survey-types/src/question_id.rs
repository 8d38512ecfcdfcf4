use std::fmt;
use std::str::FromStr;

/// Identifier of a question, e.g. `"q3"`.
///
/// Questions are numbered from 1. The textual form `q{n}` is used as the key
/// in `Responses`, as the image file stem and as the CSV column name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionId {
    number: usize,
}

impl QuestionId {
    /// Question 1.
    pub const FIRST: QuestionId = QuestionId { number: 1 };

    /// Create an id from a 1-based question number.
    ///
    /// Returns `None` for 0.
    pub fn new(number: usize) -> Option<Self> {
        (number > 0).then_some(Self { number })
    }

    /// The 1-based question number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// The following question id.
    pub fn next(&self) -> Self {
        Self {
            number: self.number + 1,
        }
    }

    /// File name of the image shown with this question.
    pub fn image_file_name(&self) -> String {
        format!("{self}.png")
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.number)
    }
}

/// Error returned when a string is not of the form `q{n}` with `n >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid question id '{0}', expected q1, q2, ...")]
pub struct ParseQuestionIdError(String);

impl FromStr for QuestionId {
    type Err = ParseQuestionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('q')
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(QuestionId::new)
            .ok_or_else(|| ParseQuestionIdError(s.to_string()))
    }
}
