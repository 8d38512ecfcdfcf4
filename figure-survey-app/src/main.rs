//! `figure-survey`: opens the visual figure survey or the user study form.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use figure_survey_egui::{EguiBackend, EguiError};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

mod config;

use config::{FormKind, SurveyConfig};

/// Collects survey responses into a spreadsheet or a local CSV file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when it does not exist.
    #[arg(short, long, default_value = "survey.toml")]
    config: PathBuf,

    /// Form to open, overriding the configuration file.
    #[arg(short, long, value_enum)]
    form: Option<FormKind>,

    /// More output (-v debug, -vv trace). RUST_LOG wins when set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut config = SurveyConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(form) = args.form {
        config.form = form;
    }
    let sink = config.sink.build().context("configuring the response sink")?;
    info!(form = ?config.form, sink = %sink.describe(), "starting");

    let outcome = match config.form {
        FormKind::Visual => {
            let definition = config.visual.definition()?;
            EguiBackend::new()
                .with_title(definition.title.clone())
                .with_window_size([1200.0, 800.0])
                .run_visual(definition, sink)
                .map(|record| info!(respondent = %record.respondent, "response recorded"))
        }
        FormKind::UserStudy => EguiBackend::new()
            .with_title("User Study")
            .with_window_size([450.0, 520.0])
            .run_user_study(sink)
            .map(|records| info!(count = records.len(), "responses recorded")),
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(EguiError::Cancelled) => {
            info!("window closed without a submission");
            Ok(())
        }
        Err(err) => Err(err).context("running the survey window"),
    }
}
