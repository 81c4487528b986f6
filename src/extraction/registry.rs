use std::collections::HashSet;

use tracing::{debug, info};

use super::document::{parse_document, DocumentQuery};
use super::strategy::Strategy;
use crate::types::ExtractedRecord;

/// Result of one dispatch: the record plus the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub strategy: String,
    pub record: ExtractedRecord,
}

/// Ordered strategy table. Dispatch is first-match-wins on the lowercased
/// URL; the generic strategy sits after every site family and matches
/// anything, so each URL resolves to exactly one strategy.
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    strategies: Vec<Strategy>,
    fallback: Strategy,
}

impl StrategyRegistry {
    /// amazon, flipkart, then generic.
    pub fn builtin() -> Self {
        Self {
            strategies: vec![Strategy::amazon(), Strategy::flipkart()],
            fallback: Strategy::generic(),
        }
    }

    /// Built-ins preceded by `custom`, so configured strategies can shadow a
    /// built-in family. Custom catch-alls are skipped; the generic entry stays last.
    pub fn with_custom(custom: impl IntoIterator<Item = Strategy>) -> Self {
        let mut strategies: Vec<Strategy> = Vec::new();
        for strategy in custom {
            if strategy.is_catch_all() {
                debug!("ignoring custom strategy {} without url fragments", strategy.name);
                continue;
            }
            strategies.push(strategy);
        }
        let builtin = Self::builtin();
        strategies.extend(builtin.strategies);
        Self {
            strategies,
            fallback: builtin.fallback,
        }
    }

    /// Strategies in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Strategy> {
        self.strategies.iter().chain(std::iter::once(&self.fallback))
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn select(&self, url: &str) -> &Strategy {
        let lower_url = url.to_lowercase();
        self.strategies
            .iter()
            .find(|s| s.matches(&lower_url))
            .unwrap_or(&self.fallback)
    }

    /// Apply the strategy selected for `url` to an already-parsed document.
    pub fn extract_document<D: DocumentQuery + ?Sized>(&self, doc: &D, url: &str) -> Extraction {
        let strategy = self.select(url);
        info!("extracting with {} strategy", strategy.name);
        Extraction {
            strategy: strategy.name.clone(),
            record: strategy.apply(doc),
        }
    }

    /// Parse `html` and extract a record. Never fails; unresolved fields are `None`.
    pub fn extract(&self, html: &str, url: &str) -> Extraction {
        let document = parse_document(html);
        self.extract_document(&document, url)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Duplicate names in `strategies`, in first-seen order.
pub(crate) fn duplicate_names<'a>(strategies: impl IntoIterator<Item = &'a Strategy>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dupes = Vec::new();
    for s in strategies {
        if !seen.insert(s.name.as_str()) && !dupes.contains(&s.name) {
            dupes.push(s.name.clone());
        }
    }
    dupes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::locator::Locator;

    #[test]
    fn builtin_order_ends_with_generic() {
        let registry = StrategyRegistry::builtin();
        assert_eq!(registry.names(), vec!["amazon", "flipkart", "generic"]);
    }

    #[test]
    fn dispatch_is_case_insensitive() {
        let registry = StrategyRegistry::builtin();
        assert_eq!(registry.select("HTTPS://WWW.AMAZON.DE/dp/1").name, "amazon");
        assert_eq!(registry.select("https://www.FlipKart.COM/x").name, "flipkart");
        assert_eq!(registry.select("https://shop.example.org/p/1").name, "generic");
        assert_eq!(registry.select("").name, "generic");
    }

    #[test]
    fn custom_strategies_run_before_builtins() {
        let custom = Strategy {
            name: "amazon-books".to_string(),
            url_fragments: vec!["amazon.com/books".to_string()],
            title: vec![Locator::text("#bookTitle")],
            price: Vec::new(),
            description: Vec::new(),
        };
        let registry = StrategyRegistry::with_custom([custom]);
        assert_eq!(
            registry.names(),
            vec!["amazon-books", "amazon", "flipkart", "generic"]
        );
        assert_eq!(
            registry.select("https://www.amazon.com/books/x").name,
            "amazon-books"
        );
        assert_eq!(registry.select("https://www.amazon.com/dp/x").name, "amazon");
    }

    #[test]
    fn custom_catch_all_is_ignored() {
        let custom = Strategy {
            name: "everything".to_string(),
            url_fragments: Vec::new(),
            title: Vec::new(),
            price: Vec::new(),
            description: Vec::new(),
        };
        let registry = StrategyRegistry::with_custom([custom]);
        assert!(!registry.names().contains(&"everything"));
        assert_eq!(registry.select("https://a.b").name, "generic");
    }

    #[test]
    fn empty_html_yields_empty_record() {
        let extraction = StrategyRegistry::builtin().extract("", "https://example.com");
        assert_eq!(extraction.strategy, "generic");
        assert!(extraction.record.is_empty());
    }

    #[test]
    fn finds_duplicate_names() {
        let a = Strategy::amazon();
        let g = Strategy::generic();
        assert_eq!(duplicate_names([&a, &g, &a, &a]), vec!["amazon".to_string()]);
        assert!(duplicate_names([&a, &g]).is_empty());
    }
}
