use std::path::PathBuf;

use crate::QuestionId;

/// Where the image of a question lives, if it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionImage {
    /// The image file exists at this path.
    Found(PathBuf),

    /// No image file; the renderer shows a warning naming this file.
    Missing(String),
}

/// The static shape of a visual figure survey.
///
/// A survey is `questions` image-based questions numbered `1..=questions`.
/// Every question offers the same options (A..F plus "None of the above"),
/// and its image is looked up as `q{n}.png` inside `image_dir`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyDefinition {
    /// Window / page title.
    pub title: String,

    /// Number of questions.
    pub questions: usize,

    /// Directory holding `q{n}.png` files.
    pub image_dir: PathBuf,
}

impl SurveyDefinition {
    /// Create a survey with the given number of questions.
    pub fn new(questions: usize) -> Self {
        Self {
            title: "Visual Figure Survey".to_string(),
            questions,
            image_dir: PathBuf::from("questions"),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the image directory.
    pub fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = dir.into();
        self
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions
    }

    /// Check if the survey has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions == 0
    }

    /// Ids of all questions, in order.
    pub fn question_ids(&self) -> impl Iterator<Item = QuestionId> + use<> {
        (1..=self.questions).filter_map(QuestionId::new)
    }

    /// Id of the question with the given 1-based number, if it is part of the survey.
    pub fn question(&self, number: usize) -> Option<QuestionId> {
        QuestionId::new(number).filter(|id| id.number() <= self.questions)
    }

    /// Resolve the image for a question.
    pub fn image(&self, id: QuestionId) -> QuestionImage {
        let file_name = id.image_file_name();
        let path = self.image_dir.join(&file_name);
        if path.is_file() {
            QuestionImage::Found(path)
        } else {
            QuestionImage::Missing(file_name)
        }
    }
}
