use scraper::{ElementRef, Html, Selector};

/// A parsed page. Not `Send`: build it, query it, drop it before awaiting.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    pub fn select_all(&self, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.html.select(selector).collect()
    }

    /// Trimmed text of the first match, `None` when nothing matches.
    pub fn text_of(&self, selector: &Selector) -> Option<String> {
        self.select_first(selector).map(text_of)
    }
}

/// All descendant text of `element`, concatenated and trimmed.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parses a selector that is known to be valid at compile time.
pub(crate) fn css(selector: &'static str) -> Selector {
    Selector::parse(selector).unwrap_or_else(|e| panic!("invalid selector {selector:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_trimmed_and_concatenated() {
        let doc = Document::parse("<div id='x'>\n  Hello <b>big</b> world \u{a0}</div>");
        assert_eq!(doc.text_of(&css("#x")).as_deref(), Some("Hello big world"));
    }

    #[test]
    fn test_missing_element() {
        let doc = Document::parse("<p>nothing here</p>");
        assert_eq!(doc.text_of(&css("h1")), None);
        assert!(doc.select_all(&css("li")).is_empty());
    }
}
