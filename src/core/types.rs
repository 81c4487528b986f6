use serde::{Deserialize, Serialize};

/// Normalized product fields. Each is independently optional; `None` means
/// no locator in the chain found a value.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub title: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
}

impl ExtractedRecord {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.price.is_none() && self.description.is_none()
    }

    /// `(field name, value)` in display order.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("title", self.title.as_deref()),
            ("price", self.price.as_deref()),
            ("description", self.description.as_deref()),
        ]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Success,
    Warn,
}

/// One line of the activity feed shown to whoever triggered an extraction.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub url: String,
    #[serde(default)]
    pub html: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractResponse {
    pub url: String,
    #[serde(default)]
    pub domain: Option<String>,
    pub strategy: String,
    pub record: ExtractedRecord,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StrategiesResponse {
    pub strategies: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
