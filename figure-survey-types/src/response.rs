use crate::{Checkboxes, Choice, NONE_OF_THE_ABOVE};

/// A respondent's recorded selection for one question.
///
/// Either a set of lettered options (possibly empty, meaning unanswered) or
/// the single "None of the above" answer. The two never mix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Response {
    /// Lettered options, kept in A..F order. Empty means unanswered.
    Choices(Vec<Choice>),

    /// "None of the above".
    NoneOfTheAbove,

    /// Nothing selected yet.
    #[default]
    Unanswered,
}

impl Response {
    /// Build a response from lettered options, normalising order and duplicates.
    pub fn choices(choices: impl IntoIterator<Item = Choice>) -> Self {
        let mut choices: Vec<Choice> = choices.into_iter().collect();
        choices.sort();
        choices.dedup();
        if choices.is_empty() {
            Self::Unanswered
        } else {
            Self::Choices(choices)
        }
    }

    /// Derive the response implied by a checkbox state.
    ///
    /// "None of the above" wins over any lettered box.
    pub fn from_checkboxes(boxes: &Checkboxes) -> Self {
        if boxes.none_checked() {
            Self::NoneOfTheAbove
        } else {
            Self::choices(boxes.checked_choices())
        }
    }

    /// The checkbox state that displays this response.
    pub fn to_checkboxes(&self) -> Checkboxes {
        let mut boxes = Checkboxes::default();
        match self {
            Self::Choices(choices) => {
                for choice in choices {
                    boxes.set(*choice, true);
                }
            }
            Self::NoneOfTheAbove => boxes.set_none(true),
            Self::Unanswered => {}
        }
        boxes
    }

    /// A response is complete iff its label list is non-empty.
    pub fn is_complete(&self) -> bool {
        !self.labels().is_empty()
    }

    /// Selected labels in order.
    pub fn labels(&self) -> Vec<&'static str> {
        match self {
            Self::Choices(choices) => choices.iter().map(Choice::label).collect(),
            Self::NoneOfTheAbove => vec![NONE_OF_THE_ABOVE],
            Self::Unanswered => Vec::new(),
        }
    }

    /// Form written to the sink: labels joined by `,`.
    pub fn serialize(&self) -> String {
        self.labels().join(",")
    }

    /// Form shown in the review dialog: labels joined by `, `.
    pub fn display(&self) -> String {
        let labels = self.labels();
        if labels.is_empty() {
            "Not answered".to_string()
        } else {
            labels.join(", ")
        }
    }
}
