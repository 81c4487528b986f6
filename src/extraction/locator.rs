use serde::{Deserialize, Serialize};
use tracing::debug;

use super::document::DocumentQuery;
use super::normalize::normalize;

/// A single extraction attempt for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Locator {
    /// Text of the first element matching a CSS selector.
    Text { selector: String },
    /// `content` of a `<meta>` looked up by `name`, then `property`.
    Meta { key: String },
}

impl Locator {
    pub fn text(selector: impl Into<String>) -> Self {
        Locator::Text {
            selector: selector.into(),
        }
    }

    pub fn meta(key: impl Into<String>) -> Self {
        Locator::Meta { key: key.into() }
    }

    pub fn locate<D: DocumentQuery + ?Sized>(&self, doc: &D) -> Option<String> {
        match self {
            Locator::Text { selector } => text_at(doc, selector),
            Locator::Meta { key } => meta_at(doc, key),
        }
    }
}

/// Normalized text of the first element matching `selector`.
pub fn text_at<D: DocumentQuery + ?Sized>(doc: &D, selector: &str) -> Option<String> {
    let found = doc.first_text(selector).map(|raw| normalize(&raw));
    non_empty(found, || debug!("no text at {}", selector))
}

/// Normalized meta content for `key` (by `name`, then `property`).
pub fn meta_at<D: DocumentQuery + ?Sized>(doc: &D, key: &str) -> Option<String> {
    let found = doc.first_meta_content(key).map(|raw| normalize(&raw));
    non_empty(found, || debug!("no meta content for {}", key))
}

fn non_empty(value: Option<String>, on_miss: impl FnOnce()) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            on_miss();
            None
        }
    }
}
