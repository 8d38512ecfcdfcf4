//! Spreadsheet sink: appends rows to the first sheet of a named spreadsheet.

mod api;
mod auth;
mod credentials;

pub use api::Endpoints;
pub use credentials::{CredentialSource, SCOPES, ServiceAccountKey};

use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use figure_survey_types::{RecordSink, SinkError, SubmittedRecord};
use reqwest::Url;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use self::api::{FileList, SpreadsheetMeta, ValueRange};
use self::auth::AccessToken;

/// Resolved append target.
#[derive(Debug, Clone)]
struct Worksheet {
    spreadsheet_id: String,
    title: String,
}

#[derive(Debug, Default)]
struct Connection {
    key: Option<ServiceAccountKey>,
    token: Option<AccessToken>,
    worksheet: Option<Worksheet>,
}

/// Appends records to a spreadsheet through the Sheets API.
///
/// The credential is loaded on first use. The access token is reused until
/// shortly before it expires and the worksheet is resolved once. After a
/// failed append everything is resolved again on the next call.
pub struct SheetsSink {
    spreadsheet: String,
    credentials: CredentialSource,
    endpoints: Endpoints,
    client: Client,
    connection: Mutex<Connection>,
}

impl SheetsSink {
    /// Sink for the spreadsheet called `spreadsheet`.
    ///
    /// Fails only if the HTTP client cannot be created (e.g. TLS setup).
    pub fn new(
        spreadsheet: impl Into<String>,
        credentials: CredentialSource,
    ) -> Result<Self, SinkError> {
        let client = Client::builder()
            .user_agent(concat!("figure-survey/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SinkError::Network(e.into()))?;
        Ok(Self {
            spreadsheet: spreadsheet.into(),
            credentials,
            endpoints: Endpoints::default(),
            client,
            connection: Mutex::new(Connection::default()),
        })
    }

    /// Use a preconfigured HTTP client, e.g. with proxy or timeout settings.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Talk to other Drive and Sheets endpoints than Google's.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Name of the target spreadsheet.
    pub fn spreadsheet(&self) -> &str {
        &self.spreadsheet
    }

    fn connection(&self) -> MutexGuard<'_, Connection> {
        self.connection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn access_token(&self, conn: &mut Connection) -> Result<String, SinkError> {
        if let Some(token) = conn.token.as_ref().filter(|t| t.is_fresh(Instant::now())) {
            return Ok(token.value.clone());
        }
        let key = match &conn.key {
            Some(key) => key.clone(),
            None => {
                let key = self.credentials.load()?;
                conn.key = Some(key.clone());
                key
            }
        };
        let token = auth::fetch_token(&self.client, &key)?;
        let value = token.value.clone();
        conn.token = Some(token);
        Ok(value)
    }

    fn worksheet(&self, conn: &mut Connection, token: &str) -> Result<Worksheet, SinkError> {
        if let Some(worksheet) = &conn.worksheet {
            return Ok(worksheet.clone());
        }

        let found: FileList = self.get_json(self.endpoints.search_url(&self.spreadsheet)?, token)?;
        let spreadsheet_id = found
            .files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| SinkError::SpreadsheetNotFound(self.spreadsheet.clone()))?;

        let meta: SpreadsheetMeta = self.get_json(self.endpoints.metadata_url(&spreadsheet_id)?, token)?;
        let title = meta
            .first_sheet_title()
            .ok_or_else(|| SinkError::SpreadsheetNotFound(self.spreadsheet.clone()))?
            .to_string();

        debug!(spreadsheet = %self.spreadsheet, id = %spreadsheet_id, sheet = %title, "resolved worksheet");
        let worksheet = Worksheet {
            spreadsheet_id,
            title,
        };
        conn.worksheet = Some(worksheet.clone());
        Ok(worksheet)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url, token: &str) -> Result<T, SinkError> {
        let resp = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .map_err(|e| SinkError::Network(e.into()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(api::classify(status, &body, &self.spreadsheet));
        }
        let body = resp.text().map_err(|e| SinkError::Network(e.into()))?;
        api::decode(status, &body)
    }

    fn append(&self, conn: &mut Connection, record: &SubmittedRecord) -> Result<(), SinkError> {
        let token = self.access_token(conn)?;
        let worksheet = self.worksheet(conn, &token)?;

        let body = ValueRange {
            values: [record.row()],
        };
        let resp = self
            .client
            .post(
                self.endpoints
                    .append_url(&worksheet.spreadsheet_id, &worksheet.title)?,
            )
            .bearer_auth(&token)
            .json(&body)
            .send()
            .map_err(|e| SinkError::Network(e.into()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(api::classify(status, &body, &self.spreadsheet));
        }
        Ok(())
    }
}

impl RecordSink for SheetsSink {
    fn append_record(&self, record: &SubmittedRecord) -> Result<(), SinkError> {
        let mut conn = self.connection();
        match self.append(&mut conn, record) {
            Ok(()) => {
                info!(spreadsheet = %self.spreadsheet, "row appended");
                Ok(())
            }
            Err(err) => {
                *conn = Connection::default();
                Err(err)
            }
        }
    }

    fn describe(&self) -> String {
        format!("spreadsheet '{}'", self.spreadsheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_credentials_fail_before_any_request() {
        let sink = SheetsSink::new(
            "userstudy",
            CredentialSource::File("/no/such/service-account.json".into()),
        )
        .unwrap();
        let record = SubmittedRecord::new("t", "Alice");

        let err = sink.append_record(&record).unwrap_err();

        assert_eq!(err.kind(), "CredentialsError");
        assert_eq!(sink.describe(), "spreadsheet 'userstudy'");
    }

    #[test]
    fn invalid_key_is_reported_as_credentials_error() {
        let secret = r#"{"client_email": "a@b.c", "private_key": "garbage"}"#;
        let sink =
            SheetsSink::new("userstudy", CredentialSource::Secret(secret.to_string())).unwrap();

        let err = sink.append_record(&SubmittedRecord::new("t", "Alice")).unwrap_err();

        assert_eq!(err.kind(), "CredentialsError");
    }
}
