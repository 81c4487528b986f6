use serde::{Deserialize, Serialize};

use super::document::DocumentQuery;
use super::locator::Locator;
use super::resolve::resolve_chain;
use crate::types::ExtractedRecord;

pub const GENERIC_STRATEGY: &str = "generic";

/// How to pull a product record out of one family of sites.
///
/// `url_fragments` are matched as lowercase substrings of the source URL; an
/// empty list matches every URL and is reserved for the catch-all strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    #[serde(default)]
    pub url_fragments: Vec<String>,
    #[serde(default)]
    pub title: Vec<Locator>,
    #[serde(default)]
    pub price: Vec<Locator>,
    #[serde(default)]
    pub description: Vec<Locator>,
}

impl Strategy {
    /// `lower_url` must already be lowercased.
    pub fn matches(&self, lower_url: &str) -> bool {
        self.url_fragments.is_empty()
            || self
                .url_fragments
                .iter()
                .any(|fragment| lower_url.contains(&fragment.to_lowercase()))
    }

    pub fn is_catch_all(&self) -> bool {
        self.url_fragments.is_empty()
    }

    pub fn apply<D: DocumentQuery + ?Sized>(&self, doc: &D) -> ExtractedRecord {
        ExtractedRecord {
            title: resolve_chain(doc, &self.title),
            price: resolve_chain(doc, &self.price),
            description: resolve_chain(doc, &self.description),
        }
    }

    pub fn amazon() -> Self {
        Strategy {
            name: "amazon".to_string(),
            url_fragments: vec!["amazon.".to_string()],
            title: vec![
                Locator::text("#productTitle"),
                Locator::meta("og:title"),
                Locator::text("title"),
            ],
            price: vec![
                Locator::text("#priceblock_ourprice"),
                Locator::text("#priceblock_dealprice"),
                Locator::text("#priceblock_saleprice"),
                Locator::text(".a-price .a-offscreen"),
                Locator::text("[data-a-color='price'] .a-offscreen"),
            ],
            description: vec![
                Locator::text("#productDescription"),
                Locator::text("#feature-bullets"),
                Locator::text("[data-feature-name='product-description']"),
                Locator::meta("og:description"),
            ],
        }
    }

    pub fn flipkart() -> Self {
        Strategy {
            name: "flipkart".to_string(),
            url_fragments: vec!["flipkart.com".to_string()],
            title: vec![
                Locator::text("span.B_NuCI"),
                Locator::meta("og:title"),
                Locator::text("title"),
            ],
            price: vec![
                Locator::text("div._30jeq3"),
                Locator::text("div._1vC4OE"),
                Locator::text("[class*='price']"),
            ],
            description: vec![
                Locator::text("div._1AN87F"),
                Locator::text("div._1mXcCf"),
                Locator::text("div._2o-xpa"),
                Locator::meta("og:description"),
            ],
        }
    }

    /// Microdata, common class names and Open Graph; used for unknown sites.
    pub fn generic() -> Self {
        Strategy {
            name: GENERIC_STRATEGY.to_string(),
            url_fragments: Vec::new(),
            title: vec![Locator::meta("og:title"), Locator::text("title")],
            price: vec![
                Locator::text("[itemprop='price']"),
                Locator::text("[data-price]"),
                Locator::text(".price"),
                Locator::text(".product-price"),
                Locator::meta("product:price:amount"),
            ],
            description: vec![
                Locator::text("[itemprop='description']"),
                Locator::text(".product-description"),
                Locator::text("#description"),
                Locator::meta("og:description"),
            ],
        }
    }
}
