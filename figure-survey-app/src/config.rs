//! Launcher configuration read from a TOML file.
//!
//! ```toml
//! form = "visual"            # or "user-study"
//!
//! [visual]
//! title = "Visual Figure Survey"
//! questions = 2
//! image_dir = "questions"
//!
//! [sink]
//! kind = "sheets"            # or "csv"
//! spreadsheet = "userstudy"
//! credentials_path = "service-account.json"
//! ```
//!
//! Every field has a default and a missing file yields [`SurveyConfig::default`].

use std::io;
use std::path::{Path, PathBuf};

use figure_survey::{RecordSink, SurveyDefinition};
use figure_survey_sink::{CredentialSource, CsvFileSink, SheetsSink};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable holding the service-account key JSON.
pub const CREDENTIALS_ENV: &str = "FIGURE_SURVEY_GSHEET_CREDENTIALS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse TOML in '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("The visual survey needs at least one question")]
    NoQuestions,

    #[error(
        "No credentials for spreadsheet '{spreadsheet}': set sink.credentials_path, sink.credentials_secret or {CREDENTIALS_ENV}"
    )]
    MissingCredentials { spreadsheet: String },

    #[error("Cannot set up the response sink")]
    Sink(#[from] figure_survey::SinkError),
}

/// Which window to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    #[default]
    Visual,
    UserStudy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    pub form: FormKind,
    pub visual: VisualConfig,
    pub sink: SinkConfig,
}

impl SurveyConfig {
    /// Read `path`, falling back to the defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config.form, "loaded config");
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub title: String,
    pub questions: usize,
    pub image_dir: PathBuf,
}

impl Default for VisualConfig {
    fn default() -> Self {
        let definition = SurveyDefinition::new(2);
        Self {
            title: definition.title,
            questions: definition.questions,
            image_dir: definition.image_dir,
        }
    }
}

impl VisualConfig {
    pub fn definition(&self) -> Result<SurveyDefinition, ConfigError> {
        if self.questions == 0 {
            return Err(ConfigError::NoQuestions);
        }
        Ok(SurveyDefinition::new(self.questions)
            .with_title(self.title.clone())
            .with_image_dir(self.image_dir.clone()))
    }
}

/// Where submitted rows go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SinkConfig {
    Sheets {
        #[serde(default = "default_spreadsheet")]
        spreadsheet: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        credentials_path: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        credentials_secret: Option<String>,
    },
    Csv {
        #[serde(default = "default_directory")]
        directory: PathBuf,
        #[serde(default = "default_file_name")]
        file_name: String,
    },
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self::Csv {
            directory: default_directory(),
            file_name: default_file_name(),
        }
    }
}

fn default_spreadsheet() -> String {
    "userstudy".to_string()
}

fn default_directory() -> PathBuf {
    PathBuf::from("responses")
}

fn default_file_name() -> String {
    "responses.csv".to_string()
}

impl SinkConfig {
    /// Build the sink, taking spreadsheet credentials from the process environment
    /// when the file names none.
    pub fn build(&self) -> Result<Box<dyn RecordSink>, ConfigError> {
        self.build_with_env(std::env::var(CREDENTIALS_ENV).ok())
    }

    fn build_with_env(&self, env_secret: Option<String>) -> Result<Box<dyn RecordSink>, ConfigError> {
        match self {
            Self::Csv {
                directory,
                file_name,
            } => Ok(Box::new(CsvFileSink::new(directory.clone(), file_name))),
            Self::Sheets {
                spreadsheet,
                credentials_path,
                credentials_secret,
            } => {
                let source = resolve_credentials(
                    credentials_path.as_deref(),
                    credentials_secret.as_deref(),
                    env_secret,
                )
                .ok_or_else(|| ConfigError::MissingCredentials {
                    spreadsheet: spreadsheet.clone(),
                })?;
                Ok(Box::new(SheetsSink::new(spreadsheet.clone(), source)?))
            }
        }
    }
}

/// Path first, then the inline secret, then the environment.
fn resolve_credentials(
    path: Option<&Path>,
    secret: Option<&str>,
    env_secret: Option<String>,
) -> Option<CredentialSource> {
    if let Some(path) = path {
        return Some(CredentialSource::File(path.to_path_buf()));
    }
    secret
        .map(str::to_string)
        .filter(|s| !s.trim().is_empty())
        .or(env_secret.filter(|s| !s.trim().is_empty()))
        .map(CredentialSource::Secret)
}
