use std::time::{Duration, Instant};

use figure_survey_types::SinkError;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::api::{decode, error_message};
use super::{SCOPES, ServiceAccountKey};

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
pub(crate) struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

impl<'a> Claims<'a> {
    pub(crate) fn new(key: &'a ServiceAccountKey, issued_at: i64) -> Self {
        Self {
            iss: &key.client_email,
            scope: SCOPES.join(" "),
            aud: &key.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        }
    }
}

/// A bearer token and the moment it stops being usable.
#[derive(Debug, Clone)]
pub(crate) struct AccessToken {
    pub(crate) value: String,
    expires_at: Instant,
}

impl AccessToken {
    pub(crate) fn is_fresh(&self, now: Instant) -> bool {
        now + REFRESH_MARGIN < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS as u64
}

/// Sign the JWT bearer assertion for `key`.
pub(crate) fn assertion(key: &ServiceAccountKey, issued_at: i64) -> Result<String, SinkError> {
    let encoding = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| SinkError::Credentials(format!("invalid private key: {e}")))?;
    jsonwebtoken::encode(
        &Header::new(Algorithm::RS256),
        &Claims::new(key, issued_at),
        &encoding,
    )
    .map_err(|e| SinkError::Credentials(format!("cannot sign assertion: {e}")))
}

/// Exchange a signed assertion for an access token.
pub(crate) fn fetch_token(client: &Client, key: &ServiceAccountKey) -> Result<AccessToken, SinkError> {
    let jwt = assertion(key, chrono::Utc::now().timestamp())?;
    debug!(account = %key.client_email, "requesting access token");

    let resp = client
        .post(&key.token_uri)
        .form(&[("grant_type", GRANT_TYPE), ("assertion", jwt.as_str())])
        .send()
        .map_err(|e| SinkError::Network(e.into()))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(SinkError::Auth(format!(
            "token request rejected ({status}): {}",
            error_message(&body)
        )));
    }

    let body = resp.text().map_err(|e| SinkError::Network(e.into()))?;
    let token: TokenResponse = decode(status, &body)?;
    Ok(AccessToken {
        value: token.access_token,
        expires_at: Instant::now() + Duration::from_secs(token.expires_in),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ServiceAccountKey {
        ServiceAccountKey {
            client_email: "survey@example.iam.gserviceaccount.com".to_string(),
            private_key: "not a pem".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        }
    }

    #[test]
    fn claims_cover_both_scopes_for_an_hour() {
        let key = key();
        let claims = Claims::new(&key, 1_700_000_000);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["iss"], "survey@example.iam.gserviceaccount.com");
        assert_eq!(
            json["scope"],
            "https://spreadsheets.google.com/feeds https://www.googleapis.com/auth/drive"
        );
        assert_eq!(json["aud"], "https://oauth2.googleapis.com/token");
        assert_eq!(json["exp"], 1_700_003_600);
    }

    #[test]
    fn bad_private_key_is_a_credentials_error() {
        let err = assertion(&key(), 0).unwrap_err();
        assert_eq!(err.kind(), "CredentialsError");
    }

    #[test]
    fn tokens_refresh_before_expiry() {
        let now = Instant::now();
        let token = AccessToken {
            value: "t".to_string(),
            expires_at: now + Duration::from_secs(3600),
        };
        assert!(token.is_fresh(now));
        assert!(!token.is_fresh(now + Duration::from_secs(3550)));
    }
}
