use std::collections::BTreeMap;

use crate::{QuestionId, Response};

/// Collected responses of one session, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Responses {
    values: BTreeMap<QuestionId, Response>,
}

impl Responses {
    /// Create a new empty responses collection.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Store a response, returning `true` if the stored value changed.
    ///
    /// An identical response is not written again.
    pub fn update(&mut self, id: QuestionId, response: Response) -> bool {
        if self.get(id) == &response {
            return false;
        }
        self.values.insert(id, response);
        true
    }

    /// Get the response for a question; missing entries read as unanswered.
    pub fn get(&self, id: QuestionId) -> &Response {
        static UNANSWERED: Response = Response::Unanswered;
        self.values.get(&id).unwrap_or(&UNANSWERED)
    }

    /// Check if a question has a complete response.
    pub fn is_complete(&self, id: QuestionId) -> bool {
        self.get(id).is_complete()
    }

    /// Number of complete responses among questions `1..=total`.
    pub fn completed_count(&self, total: usize) -> usize {
        (1..=total)
            .filter_map(QuestionId::new)
            .filter(|id| self.is_complete(*id))
            .count()
    }

    /// Get an iterator over all stored responses, ordered by question.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &Response)> {
        self.values.iter()
    }

    /// Get the number of stored responses.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no stored responses.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop every stored response.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
