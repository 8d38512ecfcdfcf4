//! Spreadsheet sink against a scripted local HTTP server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use figure_survey_sink::{CredentialSource, Endpoints, SheetsSink};
use figure_survey_types::{RecordSink, SubmittedRecord};
use reqwest::blocking::Client;

const TEST_KEY: &str = include_str!("fixtures/test_key.pem");

const TOKEN_1: &str = r#"{"access_token": "token-1", "expires_in": 3600, "token_type": "Bearer"}"#;
const TOKEN_2: &str = r#"{"access_token": "token-2", "expires_in": 3600, "token_type": "Bearer"}"#;
const FOUND: &str = r#"{"files": [{"id": "sheet-1", "name": "userstudy"}]}"#;
const METADATA: &str = r#"{"sheets": [{"properties": {"title": "Responses", "index": 0}}]}"#;
const APPENDED: &str = r#"{"spreadsheetId": "sheet-1"}"#;
const FORBIDDEN: &str =
    r#"{"error": {"code": 403, "message": "The caller does not have permission"}}"#;

/// One request as seen by the server: endpoint and bearer token.
#[derive(Debug, PartialEq, Eq)]
struct Seen {
    endpoint: &'static str,
    bearer: Option<String>,
}

fn seen(endpoint: &'static str, bearer: Option<&str>) -> Seen {
    Seen {
        endpoint,
        bearer: bearer.map(str::to_string),
    }
}

/// Answer one connection per scripted reply, in order.
fn serve(replies: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<Seen>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        replies
            .into_iter()
            .map(|(status, body)| {
                let (mut stream, _) = listener.accept().unwrap();
                let request = read_request(&stream);
                let response = format!(
                    "HTTP/1.1 {status} Scripted\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).unwrap();
                stream.flush().unwrap();
                request
            })
            .collect()
    });
    (base, handle)
}

fn read_request(stream: &TcpStream) -> Seen {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    let mut content_length = 0;
    let mut bearer = None;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap();
            } else if name.eq_ignore_ascii_case("authorization") {
                bearer = value.strip_prefix("Bearer ").map(str::to_string);
            }
        }
    }
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).unwrap();

    let target = request_line.split_whitespace().nth(1).unwrap_or_default();
    let path = target.split('?').next().unwrap_or_default();
    let endpoint = if path == "/token" {
        "token"
    } else if path == "/drive/v3/files" {
        "search"
    } else if path == "/v4/spreadsheets/sheet-1" {
        "metadata"
    } else if path.starts_with("/v4/spreadsheets/sheet-1/values/") && path.ends_with(":append") {
        "append"
    } else {
        "unexpected"
    };
    Seen { endpoint, bearer }
}

fn sink(base: &str) -> SheetsSink {
    let key = serde_json::json!({
        "type": "service_account",
        "client_email": "survey@example.iam.gserviceaccount.com",
        "private_key": TEST_KEY,
        "token_uri": format!("{base}/token"),
    });
    SheetsSink::new("userstudy", CredentialSource::Secret(key.to_string()))
        .unwrap()
        .with_client(Client::builder().no_proxy().build().unwrap())
        .with_endpoints(Endpoints::with_base(base))
}

fn record(name: &str) -> SubmittedRecord {
    SubmittedRecord::new("2025-06-02T10:00:00.000000", name).with_field("q1", "A,C")
}

#[test]
fn test_forbidden_append_then_fresh_retry() {
    let (base, server) = serve(vec![
        (200, TOKEN_1),
        (200, FOUND),
        (200, METADATA),
        (403, FORBIDDEN),
        (200, TOKEN_2),
        (200, FOUND),
        (200, METADATA),
        (200, APPENDED),
        (200, APPENDED),
    ]);
    let sink = sink(&base);

    let err = sink.append_record(&record("Alice")).unwrap_err();
    assert_eq!(err.kind(), "AuthError");
    assert_eq!(err.to_string(), "The caller does not have permission");

    sink.append_record(&record("Alice")).unwrap();
    sink.append_record(&record("Bob")).unwrap();

    assert_eq!(
        server.join().unwrap(),
        vec![
            seen("token", None),
            seen("search", Some("token-1")),
            seen("metadata", Some("token-1")),
            seen("append", Some("token-1")),
            // the failure dropped token and worksheet
            seen("token", None),
            seen("search", Some("token-2")),
            seen("metadata", Some("token-2")),
            seen("append", Some("token-2")),
            // token and worksheet reused
            seen("append", Some("token-2")),
        ]
    );
}

#[test]
fn test_rejected_token_request() {
    let (base, server) = serve(vec![(
        401,
        r#"{"error": "invalid_grant", "error_description": "Invalid JWT Signature."}"#,
    )]);

    let err = sink(&base).append_record(&record("Alice")).unwrap_err();

    assert_eq!(err.kind(), "AuthError");
    assert!(err.to_string().contains("invalid_grant"), "{err}");
    assert_eq!(server.join().unwrap(), vec![seen("token", None)]);
}

#[test]
fn test_empty_search_is_spreadsheet_not_found() {
    let (base, server) = serve(vec![(200, TOKEN_1), (200, r#"{"files": []}"#)]);

    let err = sink(&base).append_record(&record("Alice")).unwrap_err();

    assert_eq!(err.kind(), "SpreadsheetNotFound");
    assert_eq!(err.to_string(), "Spreadsheet 'userstudy' not found");
    assert_eq!(
        server.join().unwrap(),
        vec![seen("token", None), seen("search", Some("token-1"))]
    );
}

#[test]
fn test_unreadable_success_body_is_api_error() {
    let (base, server) = serve(vec![(200, TOKEN_1), (200, "<html>maintenance</html>")]);

    let err = sink(&base).append_record(&record("Alice")).unwrap_err();

    assert_eq!(err.kind(), "ApiError");
    assert!(err.to_string().starts_with("HTTP 200: unexpected response body"), "{err}");
    server.join().unwrap();
}
