//! Launches the survey windows with eframe.

use std::sync::{Arc, Mutex, MutexGuard};

use eframe::egui;
use figure_survey::{RecordSink, SubmittedRecord, SurveyDefinition};
use thiserror::Error;
use tracing::debug;

use crate::user_study::UserStudyApp;
use crate::visual::VisualSurveyApp;

/// Error type for the egui windows.
#[derive(Debug, Error)]
pub enum EguiError {
    /// The window was closed before anything was submitted.
    #[error("Survey cancelled by user")]
    Cancelled,

    /// eframe failed to create or run the window.
    #[error("Egui error: {0}")]
    Eframe(String),
}

/// Builder/configuration for the survey windows.
#[derive(Debug, Clone)]
pub struct EguiBackend {
    /// Window title.
    title: String,
    /// Window size [width, height].
    window_size: [f32; 2],
}

impl Default for EguiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiBackend {
    /// Create a new backend with default settings.
    pub fn new() -> Self {
        Self {
            title: "Visual Figure Survey".to_string(),
            window_size: [1200.0, 800.0],
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the window size.
    pub fn with_window_size(mut self, size: [f32; 2]) -> Self {
        self.window_size = size;
        self
    }

    /// Window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Run the visual survey until the window is closed.
    ///
    /// Returns the submitted record, or [`EguiError::Cancelled`] when the
    /// window was closed without a successful submission.
    pub fn run_visual(
        &self,
        definition: SurveyDefinition,
        sink: Box<dyn RecordSink>,
    ) -> Result<SubmittedRecord, EguiError> {
        debug!(questions = definition.len(), sink = %sink.describe(), "opening visual survey");
        let app = VisualSurveyApp::new(definition, sink);
        let submitted = app.submitted();

        self.run(app)?;

        lock(&submitted).pop().ok_or(EguiError::Cancelled)
    }

    /// Run the user study form until the window is closed.
    ///
    /// The form stays open after a submission, so any number of records may
    /// come back. An empty result is reported as [`EguiError::Cancelled`].
    pub fn run_user_study(
        &self,
        sink: Box<dyn RecordSink>,
    ) -> Result<Vec<SubmittedRecord>, EguiError> {
        debug!(sink = %sink.describe(), "opening user study form");
        let app = UserStudyApp::new(sink);
        let submitted = app.submitted();

        self.run(app)?;

        let records = std::mem::take(&mut *lock(&submitted));
        if records.is_empty() {
            return Err(EguiError::Cancelled);
        }
        Ok(records)
    }

    fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.title.clone())
                .with_inner_size(self.window_size),
            ..Default::default()
        }
    }

    /// Blocks until the window is closed.
    fn run(&self, app: impl eframe::App + 'static) -> Result<(), EguiError> {
        eframe::run_native(
            &self.title,
            self.native_options(),
            Box::new(move |cc| {
                egui_extras::install_image_loaders(&cc.egui_ctx);
                Ok(Box::new(app) as Box<dyn eframe::App>)
            }),
        )
        .map_err(|e| EguiError::Eframe(e.to_string()))
    }
}

/// Shared slot the windows push their submissions into.
pub type Submissions = Arc<Mutex<Vec<SubmittedRecord>>>;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_creation() {
        let backend = EguiBackend::new();
        assert_eq!(backend.title(), "Visual Figure Survey");
        let with_title = EguiBackend::new().with_title("User Study");
        assert_eq!(with_title.title(), "User Study");
        let with_size = EguiBackend::new().with_window_size([800.0, 600.0]);
        assert_eq!(with_size.window_size, [800.0, 600.0]);
        let _default = EguiBackend::default();
    }

    #[test]
    fn error_types() {
        let err = EguiError::Cancelled;
        assert_eq!(err.to_string(), "Survey cancelled by user");

        let err = EguiError::Eframe("test error".to_string());
        assert_eq!(err.to_string(), "Egui error: test error");
    }
}
