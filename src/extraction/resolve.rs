use super::document::DocumentQuery;
use super::locator::Locator;

/// First present value in priority order, or `None` if every candidate is absent.
pub fn first_present<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates.into_iter().flatten().next()
}

/// Evaluate a candidate chain left to right, stopping at the first locator
/// that yields a value. Later locators are never run once one succeeds.
pub fn resolve_chain<D: DocumentQuery + ?Sized>(doc: &D, chain: &[Locator]) -> Option<String> {
    first_present(chain.iter().map(|locator| locator.locate(doc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn earliest_present_wins() {
        let got = first_present([None, Some("X".to_string()), Some("Y".to_string())]);
        assert_eq!(got.as_deref(), Some("X"));
    }

    #[test]
    fn exhausted_chain_is_absent() {
        assert_eq!(first_present([None, None, None]), None);
        assert_eq!(first_present(Vec::<Option<String>>::new()), None);
    }

    /// Records every query so short-circuiting can be observed.
    struct Probe {
        hits: Vec<&'static str>,
        seen: RefCell<Vec<String>>,
    }

    impl DocumentQuery for Probe {
        fn first_text(&self, selector: &str) -> Option<String> {
            self.seen.borrow_mut().push(selector.to_string());
            self.hits
                .iter()
                .any(|hit| *hit == selector)
                .then(|| format!("value of {}", selector))
        }

        fn first_meta_content(&self, key: &str) -> Option<String> {
            self.seen.borrow_mut().push(format!("meta:{}", key));
            None
        }
    }

    #[test]
    fn chain_short_circuits_after_first_success() {
        let probe = Probe {
            hits: vec!["#b", "#c"],
            seen: RefCell::new(Vec::new()),
        };
        let chain = [
            Locator::meta("og:price"),
            Locator::text("#a"),
            Locator::text("#b"),
            Locator::text("#c"),
        ];

        let got = resolve_chain(&probe, &chain);

        assert_eq!(got.as_deref(), Some("value of #b"));
        assert_eq!(*probe.seen.borrow(), vec!["meta:og:price", "#a", "#b"]);
    }
}
