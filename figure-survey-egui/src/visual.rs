//! Window of the visual figure survey.

use std::sync::Arc;

use eframe::egui;
use figure_survey::{
    Choice, NONE_OF_THE_ABOVE, NavState, Phase, Proceed, QuestionImage, RecordSink, Session,
    SurveyDefinition, SurveyError,
};
use tracing::{debug, info, warn};

use crate::backend::{Submissions, lock};
use crate::notice::Notice;

/// Navigation buttons per row.
const NAV_BUTTONS_PER_ROW: usize = 10;

/// Widest an image is drawn, leaving room for the options column.
const IMAGE_MAX_WIDTH: f32 = 600.0;

/// Width of the submit panel on the right.
const SUBMIT_PANEL_WIDTH: f32 = 260.0;

/// The visual survey as an `eframe::App`.
///
/// All survey state lives in the owned [`Session`]; the app only adds the
/// transient messages shown next to the widgets.
pub struct VisualSurveyApp {
    session: Session,
    sink: Box<dyn RecordSink>,
    /// Result of the last Proceed or navigation attempt.
    question_notice: Option<Notice>,
    /// Result of the last submit attempt.
    gate_notice: Option<Notice>,
    /// Sink failure of the last confirm, shown inside the review dialog.
    review_error: Option<String>,
    submitted: Submissions,
}

impl VisualSurveyApp {
    /// New app with a fresh session.
    pub fn new(definition: SurveyDefinition, sink: Box<dyn RecordSink>) -> Self {
        Self::with_session(Session::new(definition), sink)
    }

    /// New app continuing an existing session.
    pub fn with_session(session: Session, sink: Box<dyn RecordSink>) -> Self {
        Self {
            session,
            sink,
            question_notice: None,
            gate_notice: None,
            review_error: None,
            submitted: Submissions::default(),
        }
    }

    /// The session driven by this window.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handle to the records written by this window.
    pub fn submitted(&self) -> Submissions {
        Arc::clone(&self.submitted)
    }

    /// Draw one frame.
    pub fn ui(&mut self, ctx: &egui::Context) {
        if self.session.phase() == Phase::Submitted {
            self.render_thank_you(ctx);
            return;
        }

        let editing = self.session.phase() == Phase::Editing;

        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.heading(format!("🧪 {}", self.session.definition().title));
        });

        egui::SidePanel::right("submit")
            .exact_width(SUBMIT_PANEL_WIDTH)
            .show(ctx, |ui| {
                ui.add_enabled_ui(editing, |ui| self.render_submit_panel(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(editing, |ui| {
                self.render_navigation(ui);
                ui.separator();
                egui::ScrollArea::vertical().show(ui, |ui| self.render_question(ui));
            });
        });

        if self.session.phase() == Phase::Reviewing {
            self.render_review(ctx);
        }
    }

    fn render_navigation(&mut self, ui: &mut egui::Ui) {
        ui.heading("Navigation");
        let completion = self.session.completion();
        ui.label(
            egui::RichText::new(format!(
                "Progress: {}/{} questions completed",
                completion.completed, completion.total
            ))
            .strong(),
        );

        let buttons = self.session.nav_buttons();
        let mut clicked = None;
        for row in buttons.chunks(NAV_BUTTONS_PER_ROW) {
            ui.horizontal(|ui| {
                for button in row {
                    let widget = egui::Button::new(button.label())
                        .selected(button.state == NavState::Current);
                    if ui.add(widget).clicked() {
                        clicked = Some(button.question.number());
                    }
                }
            });
        }

        if let Some(number) = clicked {
            match self.session.navigate(number) {
                Ok(true) => self.question_notice = None,
                Ok(false) => {}
                Err(err) => self.question_notice = Some(Notice::Error(err.to_string())),
            }
        }
    }

    fn render_submit_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Submit");
        Notice::Warning("⚠️ Don't forget to submit your responses!".to_string()).show(ui);
        ui.add_space(8.0);

        ui.label("Enter your name (or ID) to submit:");
        let mut name = self.session.name().to_string();
        if ui.text_edit_singleline(&mut name).changed() {
            if let Err(err) = self.session.set_name(name) {
                warn!(error = %err, "name edit ignored");
            }
        }

        let submit = ui.add_enabled(
            self.session.can_submit(),
            egui::Button::new("📤 Submit Responses"),
        );
        if submit.clicked() {
            match self.session.open_review() {
                Ok(()) => {
                    self.gate_notice = None;
                    self.review_error = None;
                }
                Err(err) => self.gate_notice = Some(Notice::Warning(err.to_string())),
            }
        }

        let completion = self.session.completion();
        if completion.is_done() {
            Notice::Success(format!("🎉 All {} questions completed!", completion.total)).show(ui);
        } else {
            Notice::Info(format!(
                "📝 {}/{} questions completed.",
                completion.completed, completion.total
            ))
            .show(ui);
        }

        if let Some(notice) = &self.gate_notice {
            notice.show(ui);
        }
    }

    fn render_question(&mut self, ui: &mut egui::Ui) {
        let id = self.session.current();
        ui.heading(format!(
            "Question {} of {}",
            id.number(),
            self.session.definition().len()
        ));

        ui.columns(2, |columns| {
            match self.session.definition().image(id) {
                QuestionImage::Found(path) => {
                    columns[0].add(
                        egui::Image::new(format!("file://{}", path.display()))
                            .max_width(IMAGE_MAX_WIDTH),
                    );
                    columns[0].label(id.image_file_name());
                }
                QuestionImage::Missing(file_name) => {
                    Notice::Warning(format!("Missing image: {file_name}")).show(&mut columns[0]);
                }
            }

            let ui = &mut columns[1];
            ui.label(
                egui::RichText::new("Select all applicable options from A–F, or 'None of the above':")
                    .strong(),
            );

            let before = self.session.checkboxes(id);
            let mut boxes = before;
            ui.columns(2, |options| {
                for choice in Choice::ALL {
                    let mut checked = boxes.is_checked(choice);
                    if options[choice.index() % 2]
                        .checkbox(&mut checked, choice.label())
                        .changed()
                    {
                        boxes.set(choice, checked);
                    }
                }
                let mut none = boxes.none_checked();
                if options[1].checkbox(&mut none, NONE_OF_THE_ABOVE).changed() {
                    boxes.set_none(none);
                }
            });
            if boxes != before {
                if let Err(err) = self.session.set_checkboxes(boxes) {
                    warn!(error = %err, "checkbox change ignored");
                }
            }

            ui.add_space(8.0);
            if ui.button("Proceed").clicked() {
                self.question_notice = match self.session.proceed() {
                    Ok(Proceed::Advanced(next)) => {
                        debug!(question = %next, "advanced");
                        None
                    }
                    Ok(Proceed::Finished) => Some(Notice::Success(
                        "✅ All questions completed! You can submit now.".to_string(),
                    )),
                    Err(err) => Some(Notice::Error(format!("⚠️ {err}"))),
                };
            }

            if let Some(notice) = &self.question_notice {
                notice.show(ui);
            }
        });
    }

    fn render_review(&mut self, ctx: &egui::Context) {
        let mut confirm = false;
        let mut cancel = false;

        egui::Window::new("📋 Review Your Answers")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new("Please review your selections before submitting:")
                        .strong(),
                );
                for line in self.session.review_lines() {
                    ui.label(line.to_string());
                }
                ui.add_space(8.0);
                Notice::Info("Don't forget to submit your responses!".to_string()).show(ui);
                if let Some(error) = &self.review_error {
                    Notice::Error(error.clone()).show(ui);
                }
                ui.horizontal(|ui| {
                    confirm = ui.button("✅ Confirm & Submit").clicked();
                    cancel = ui.button("❌ Cancel").clicked();
                });
            });

        if confirm {
            self.confirm();
        } else if cancel {
            match self.session.cancel_review() {
                Ok(()) => self.review_error = None,
                Err(err) => warn!(error = %err, "cancel ignored"),
            }
        }
    }

    fn confirm(&mut self) {
        match self.session.confirm(&*self.sink) {
            Ok(record) => {
                info!(respondent = %record.respondent, "survey submitted");
                self.review_error = None;
                self.question_notice = None;
                lock(&self.submitted).push(record);
            }
            Err(err @ SurveyError::Sink(_)) => self.review_error = Some(err.to_string()),
            Err(err) => {
                warn!(error = %err, "confirm rejected");
                self.review_error = Some(err.to_string());
            }
        }
    }

    fn render_thank_you(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("🧪 {}", self.session.definition().title));
            ui.add_space(16.0);
            Notice::Success("Submission success!".to_string()).show(ui);
            ui.label("Your responses have been recorded. You can close this window.");
        });
    }
}

impl eframe::App for VisualSurveyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figure_survey::{Checkboxes, SinkError, TestSink};

    fn run_frame(app: &mut VisualSurveyApp) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| app.ui(ctx));
    }

    fn ready_for_review() -> Session {
        let definition = SurveyDefinition::new(1).with_image_dir("/no/images/here");
        let mut session = Session::new(definition);
        let mut boxes = Checkboxes::default();
        boxes.set(Choice::A, true);
        session.set_checkboxes(boxes).unwrap();
        session.set_name("Alice").unwrap();
        session.open_review().unwrap();
        session
    }

    #[test]
    fn renders_every_phase() {
        let definition = SurveyDefinition::new(2).with_image_dir("/no/images/here");
        let mut app = VisualSurveyApp::new(definition, Box::new(TestSink::new()));
        run_frame(&mut app);

        let mut app = VisualSurveyApp::with_session(ready_for_review(), Box::new(TestSink::new()));
        run_frame(&mut app);
        app.confirm();
        assert_eq!(app.session().phase(), Phase::Submitted);
        run_frame(&mut app);
        assert_eq!(lock(&app.submitted()).len(), 1);
    }

    #[test]
    fn failed_confirm_keeps_dialog_open() {
        let sink = TestSink::new().with_failure(SinkError::Auth("invalid_grant".to_string()));
        let mut app = VisualSurveyApp::with_session(ready_for_review(), Box::new(sink));

        app.confirm();

        assert_eq!(app.session().phase(), Phase::Reviewing);
        let error = app.review_error.clone().unwrap();
        assert!(error.contains("AuthError"), "{error}");
        assert!(lock(&app.submitted()).is_empty());
        run_frame(&mut app);
    }
}
