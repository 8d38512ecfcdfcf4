//! User study form writing to a local CSV file.
//!
//! Run with: cargo run -p figure-survey-egui --example user_study

use figure_survey_egui::EguiBackend;
use figure_survey_sink::CsvFileSink;

fn main() -> anyhow::Result<()> {
    let backend = EguiBackend::new()
        .with_title("User Study")
        .with_window_size([450.0, 520.0]);
    let sink = CsvFileSink::new("responses", "user_study.csv");
    for record in backend.run_user_study(Box::new(sink))? {
        println!("{record:#?}");
    }
    Ok(())
}
