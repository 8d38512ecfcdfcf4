//! Endpoints and payloads of the Drive and Sheets REST APIs.

use figure_survey_types::SinkError;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SHEETS_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// Base URLs of the Drive file listing and the Sheets spreadsheets collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub drive_files: String,
    pub sheets: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            drive_files: DRIVE_FILES_URL.to_string(),
            sheets: SHEETS_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Both APIs served below one base URL, at the Google paths.
    pub fn with_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            drive_files: format!("{base}/drive/v3/files"),
            sheets: format!("{base}/v4/spreadsheets"),
        }
    }

    /// URL listing spreadsheets with the given name.
    pub(crate) fn search_url(&self, name: &str) -> Result<Url, SinkError> {
        Url::parse_with_params(
            &self.drive_files,
            &[
                ("q", drive_query(name).as_str()),
                ("fields", "files(id,name)"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ],
        )
        .map_err(|e| SinkError::Network(e.into()))
    }

    /// URL of the sheet metadata of a spreadsheet.
    pub(crate) fn metadata_url(&self, spreadsheet_id: &str) -> Result<Url, SinkError> {
        let mut url = self.sheets_url(&[spreadsheet_id])?;
        url.query_pairs_mut().append_pair("fields", "sheets.properties");
        Ok(url)
    }

    /// URL appending rows after the data of `sheet_title`.
    pub(crate) fn append_url(&self, spreadsheet_id: &str, sheet_title: &str) -> Result<Url, SinkError> {
        let range = format!("'{}':append", sheet_title.replace('\'', "''"));
        let mut url = self.sheets_url(&[spreadsheet_id, "values", &range])?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");
        Ok(url)
    }

    fn sheets_url(&self, segments: &[&str]) -> Result<Url, SinkError> {
        let mut url = Url::parse(&self.sheets).map_err(|e| SinkError::Network(e.into()))?;
        url.path_segments_mut()
            .map_err(|()| SinkError::Network(anyhow::anyhow!("{} cannot be a base", self.sheets)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileList {
    #[serde(default)]
    pub(crate) files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DriveFile {
    pub(crate) id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpreadsheetMeta {
    #[serde(default)]
    pub(crate) sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetEntry {
    pub(crate) properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetProperties {
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) index: i64,
}

impl SpreadsheetMeta {
    /// Title of the sheet with the lowest index.
    pub(crate) fn first_sheet_title(&self) -> Option<&str> {
        self.sheets
            .iter()
            .min_by_key(|s| s.properties.index)
            .map(|s| s.properties.title.as_str())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ValueRange<'a> {
    pub(crate) values: [Vec<&'a str>; 1],
}

/// Drive search query matching a spreadsheet by exact name.
pub(crate) fn drive_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!("name = '{escaped}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false")
}

/// Map a failed API response to a sink error.
pub(crate) fn classify(status: StatusCode, body: &str, spreadsheet: &str) -> SinkError {
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SinkError::Auth(message),
        StatusCode::NOT_FOUND => SinkError::SpreadsheetNotFound(spreadsheet.to_string()),
        _ => SinkError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Parse a successful response body.
///
/// A 2xx answer that does not have the expected shape is an API error, not a
/// transport failure.
pub(crate) fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, SinkError> {
    serde_json::from_str(body).map_err(|e| SinkError::Api {
        status: status.as_u16(),
        message: format!("unexpected response body: {e}"),
    })
}

/// Extract the human readable part of an error body.
///
/// Understands the Google API shape `{"error": {"message": ...}}` and the
/// OAuth shape `{"error": "...", "error_description": "..."}`.
pub(crate) fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ErrorBody {
        Api {
            error: ApiError,
        },
        OAuth {
            error: String,
            #[serde(default)]
            error_description: Option<String>,
        },
    }

    #[derive(Deserialize)]
    struct ApiError {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody::Api { error }) => error.message,
        Ok(ErrorBody::OAuth {
            error,
            error_description: Some(description),
        }) => format!("{error}: {description}"),
        Ok(ErrorBody::OAuth { error, .. }) => error,
        Err(_) => body.trim().to_string(),
    }
}
