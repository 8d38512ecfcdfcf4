use eframe::egui;

/// An inline message shown under the widget that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notice {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub(crate) fn color(&self) -> egui::Color32 {
        match self {
            Self::Success(_) => egui::Color32::from_rgb(0x1e, 0x84, 0x49),
            Self::Info(_) => egui::Color32::from_rgb(0x1c, 0x63, 0x9e),
            Self::Warning(_) => egui::Color32::from_rgb(0x85, 0x64, 0x04),
            Self::Error(_) => egui::Color32::RED,
        }
    }

    pub(crate) fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Info(text) | Self::Warning(text) | Self::Error(text) => {
                text
            }
        }
    }

    pub(crate) fn show(&self, ui: &mut egui::Ui) {
        ui.colored_label(self.color(), self.text());
    }
}
