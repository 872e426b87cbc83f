use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the record written to a fresh data file.
pub const SEED_NAME: &str = "Auriga";

/// Value of the record written to a fresh data file.
pub const SEED_VALUE: &str = "Some value :3";

/// A single named value.
///
/// `last_modified` is an HTTP date (RFC 1123, always GMT) and is restamped
/// on creation and on every value change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub value: String,
    pub last_modified: String,
}

impl Record {
    pub fn new(id: i64, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value: value.into(),
            last_modified: http_date(Utc::now()),
        }
    }

    /// Replace the value and restamp `last_modified`.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.last_modified = http_date(Utc::now());
    }
}

/// Format a timestamp the way HTTP `Last-Modified` headers expect it.
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
