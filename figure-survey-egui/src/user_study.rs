//! Window of the user study form.

use std::sync::Arc;

use eframe::egui;
use figure_survey::{AGE_RANGE, RecordSink, Satisfaction, SurveyError, UserStudyForm};

use crate::backend::{Submissions, lock};
use crate::notice::Notice;

const HEADING: &str = "📝 User Study Survey";

/// Field captions, top to bottom.
const CAPTIONS: [&str; 4] = [
    "1. What is your name?",
    "2. What is your age?",
    "3. How satisfied are you?",
    "4. Any additional feedback?",
];

/// The user study form as an `eframe::App`.
pub struct UserStudyApp {
    form: UserStudyForm,
    sink: Box<dyn RecordSink>,
    notice: Option<Notice>,
    submitted: Submissions,
}

impl UserStudyApp {
    pub fn new(sink: Box<dyn RecordSink>) -> Self {
        Self {
            form: UserStudyForm::default(),
            sink,
            notice: None,
            submitted: Submissions::default(),
        }
    }

    /// Current field values.
    pub fn form(&self) -> &UserStudyForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut UserStudyForm {
        &mut self.form
    }

    /// Handle to the records written by this window.
    pub fn submitted(&self) -> Submissions {
        Arc::clone(&self.submitted)
    }

    /// Draw one frame.
    pub fn ui(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(HEADING);
            ui.add_space(8.0);

            ui.label(CAPTIONS[0]);
            ui.text_edit_singleline(&mut self.form.name);

            ui.label(CAPTIONS[1]);
            ui.add(egui::Slider::new(&mut self.form.age, AGE_RANGE));

            ui.label(CAPTIONS[2]);
            for level in Satisfaction::ALL {
                ui.radio_value(&mut self.form.satisfaction, level, level.label());
            }

            ui.label(CAPTIONS[3]);
            ui.text_edit_multiline(&mut self.form.feedback);

            ui.add_space(8.0);
            if ui.button("Submit").clicked() {
                self.submit();
            }

            if let Some(notice) = &self.notice {
                notice.show(ui);
            }
        });
    }

    fn submit(&mut self) {
        self.notice = Some(match self.form.submit(&*self.sink) {
            Ok(record) => {
                lock(&self.submitted).push(record);
                Notice::Success("✅ Thank you! Your response has been recorded.".to_string())
            }
            Err(err @ SurveyError::Validation(_)) => Notice::Warning(err.to_string()),
            Err(err) => Notice::Error(err.to_string()),
        });
    }
}

impl eframe::App for UserStudyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
