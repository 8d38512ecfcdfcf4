//! Visual figure survey writing to a local CSV file.
//!
//! Put `q1.png`, `q2.png`, ... into `questions/` first.
//!
//! Run with: cargo run -p figure-survey-egui --example visual_survey

use figure_survey::SurveyDefinition;
use figure_survey_egui::EguiBackend;
use figure_survey_sink::CsvFileSink;

fn main() -> anyhow::Result<()> {
    let backend = EguiBackend::new()
        .with_title("Visual Figure Survey")
        .with_window_size([1200.0, 800.0]);
    let sink = CsvFileSink::new("responses", "responses.csv");
    let record = backend.run_visual(SurveyDefinition::new(4), Box::new(sink))?;
    println!("{record:#?}");
    Ok(())
}
