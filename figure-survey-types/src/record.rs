use chrono::{DateTime, Local};

/// Timestamp format of the visual survey: ISO-8601 with microseconds.
pub const ISO_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Timestamp format of the user study form.
pub const PLAIN_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Format a local time with one of the timestamp formats above.
pub fn format_timestamp(at: &DateTime<Local>, format: &str) -> String {
    at.naive_local().format(format).to_string()
}

/// One named cell of a record after the timestamp and name columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub column: String,
    pub value: String,
}

impl Field {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// The finalized row written to a sink.
///
/// Rows always start with the timestamp and the respondent, followed by
/// the survey-specific fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedRecord {
    pub timestamp: String,
    pub respondent: String,
    pub fields: Vec<Field>,
}

impl SubmittedRecord {
    pub fn new(timestamp: impl Into<String>, respondent: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            respondent: respondent.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field::new(column, value));
        self
    }

    /// Column names, used as the header of file sinks.
    pub fn header(&self) -> Vec<&str> {
        ["timestamp", "name"]
            .into_iter()
            .chain(self.fields.iter().map(|f| f.column.as_str()))
            .collect()
    }

    /// Cell values in column order.
    pub fn row(&self) -> Vec<&str> {
        [self.timestamp.as_str(), self.respondent.as_str()]
            .into_iter()
            .chain(self.fields.iter().map(|f| f.value.as_str()))
            .collect()
    }
}
