use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use figure_survey_types::SinkError;
use serde::Deserialize;
use tracing::debug;

/// OAuth scopes requested for the service account.
pub const SCOPES: [&str; 2] = [
    "https://spreadsheets.google.com/feeds",
    "https://www.googleapis.com/auth/drive",
];

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Where the service-account key comes from.
#[derive(Clone)]
pub enum CredentialSource {
    /// A key file on disk.
    File(PathBuf),

    /// The key JSON itself, e.g. from a secret store or environment variable.
    /// It is written to a temporary file before loading.
    Secret(String),
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Secret(_) => f.write_str("Secret(<redacted>)"),
        }
    }
}

impl CredentialSource {
    /// Load and parse the service-account key.
    pub fn load(&self) -> Result<ServiceAccountKey, SinkError> {
        match self {
            Self::File(path) => load_key_file(path),
            Self::Secret(secret) => {
                let mut tmp = tempfile::NamedTempFile::new()?;
                tmp.write_all(secret.as_bytes())?;
                tmp.flush()?;
                debug!(path = %tmp.path().display(), "materialised credential secret");
                load_key_file(tmp.path())
            }
        }
    }
}

/// The fields of a service-account key file that are needed to sign in.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    /// Parse a key from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, SinkError> {
        let key: Self = serde_json::from_str(json)
            .map_err(|e| SinkError::Credentials(format!("invalid service account key: {e}")))?;
        if key.client_email.trim().is_empty() || key.private_key.trim().is_empty() {
            return Err(SinkError::Credentials(
                "service account key lacks client_email or private_key".to_string(),
            ));
        }
        Ok(key)
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

fn load_key_file(path: &Path) -> Result<ServiceAccountKey, SinkError> {
    let json = fs::read_to_string(path).map_err(|e| {
        SinkError::Credentials(format!("cannot read key file {}: {e}", path.display()))
    })?;
    ServiceAccountKey::from_json(&json)
}
