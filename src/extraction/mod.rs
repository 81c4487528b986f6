//! Product record extraction from static HTML.
//!
//! A [`StrategyRegistry`] picks one [`Strategy`] per URL and each strategy
//! resolves title, price and description through its own ordered chain of
//! [`Locator`]s. Every field degrades to `None` independently; nothing in
//! this module returns an error.

mod document;
mod locator;
mod normalize;
mod registry;
mod resolve;
mod strategy;

use std::sync::LazyLock;

pub use document::{parse_document, DocumentQuery};
pub use locator::{meta_at, text_at, Locator};
pub use normalize::normalize;
pub use registry::{Extraction, StrategyRegistry};
pub use resolve::{first_present, resolve_chain};
pub use strategy::{Strategy, GENERIC_STRATEGY};

pub(crate) use registry::duplicate_names;

use crate::types::ExtractedRecord;

static BUILTIN: LazyLock<StrategyRegistry> = LazyLock::new(StrategyRegistry::builtin);

/// Extract a product record using the built-in strategies.
pub fn extract(html: &str, url: &str) -> ExtractedRecord {
    BUILTIN.extract(html, url).record
}

/// Like [`extract`], also reporting which built-in strategy was used.
pub fn extract_with_strategy(html: &str, url: &str) -> Extraction {
    BUILTIN.extract(html, url)
}
