use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Read-only queries the extraction layer needs from a parsed page.
///
/// Strategies and locators only see this trait, so any DOM backend that can
/// answer these two questions can drive extraction.
pub trait DocumentQuery {
    /// Text content of the first element matching `selector`, un-normalized.
    /// `None` when nothing matches or the selector is not understood.
    fn first_text(&self, selector: &str) -> Option<String>;

    /// `content` of the first `<meta>` whose `name` equals `key`, or failing
    /// that the first whose `property` equals `key`.
    fn first_meta_content(&self, key: &str) -> Option<String>;
}

impl DocumentQuery for Html {
    fn first_text(&self, selector: &str) -> Option<String> {
        let sel = match Selector::parse(selector) {
            Ok(sel) => sel,
            Err(e) => {
                debug!("unparsable selector {:?}: {}", selector, e);
                return None;
            }
        };
        self.select(&sel)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    fn first_meta_content(&self, key: &str) -> Option<String> {
        let Ok(sel) = Selector::parse("meta") else {
            return None;
        };
        let metas: Vec<ElementRef<'_>> = self.select(&sel).collect();

        let by_attr = |attr: &str| {
            metas
                .iter()
                .find(|el| el.value().attr(attr) == Some(key))
                .copied()
        };

        by_attr("name")
            .or_else(|| by_attr("property"))
            .and_then(|el| el.value().attr("content"))
            .map(str::to_string)
    }
}

/// Parse a full HTML document. html5ever recovers from any malformed input,
/// so this always yields a tree (possibly just the implied skeleton).
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}
