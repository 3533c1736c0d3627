use log::{debug, warn};
use scraper::Selector;
use std::sync::LazyLock;
use url::Url;

use super::document::{css, text_of, Document};
use crate::core::record::ProductLink;
use crate::{ScraperError, ScraperResult};

static PAGINATION_INDICATOR: LazyLock<Selector> =
    LazyLock::new(|| css(r#"span[class="s-pagination-item s-pagination-disabled"]"#));
static RESULT_CARD: LazyLock<Selector> = LazyLock::new(|| css(RESULT_CARD_SELECTOR));
static CARD_LINK: LazyLock<Selector> = LazyLock::new(|| css("a"));

pub const RESULT_CARD_SELECTOR: &str = r#"div[data-component-type="s-search-result"]"#;

/// Reads the highest page number from the pagination control.
pub fn max_page(doc: &Document) -> ScraperResult<usize> {
    let text = doc.text_of(&PAGINATION_INDICATOR).ok_or_else(|| {
        ScraperError::PaginationError("pagination indicator not found".to_string())
    })?;

    text.parse::<usize>().map_err(|e| {
        ScraperError::PaginationError(format!("pagination indicator {:?} is not a number: {}", text, e))
    })
}

/// URL of result page `index` for a listing that starts at `start_url`.
pub fn page_url(start_url: &Url, index: usize) -> ScraperResult<Url> {
    Ok(Url::parse(&format!("{}&page={}", start_url, index))?)
}

/// Detail links of every result card, in document order.
pub fn product_links(doc: &Document, base: &Url) -> Vec<ProductLink> {
    let mut links = Vec::new();
    for card in doc.select_all(&RESULT_CARD) {
        let Some(anchor) = card.select(&CARD_LINK).next() else {
            warn!("Result card without a link: {:?}", text_of(card));
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            warn!("Result card link without href on {}", base);
            continue;
        };
        match base.join(href) {
            Ok(url) => links.push(url),
            Err(e) => warn!("Skipping unparsable product link {:?}: {}", href, e),
        }
    }
    debug!("Found {} product links", links.len());
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(indicator: Option<&str>, hrefs: &[&str]) -> String {
        let cards: String = hrefs
            .iter()
            .map(|href| {
                format!(
                    r#"<div data-component-type="s-search-result"><h2><a class="a-link-normal" href="{}"><span>Item</span></a></h2><a href="/other">x</a></div>"#,
                    href
                )
            })
            .collect();
        let pagination = indicator
            .map(|text| {
                format!(
                    r#"<span class="s-pagination-item s-pagination-selected">1</span><span class="s-pagination-item s-pagination-disabled">{}</span>"#,
                    text
                )
            })
            .unwrap_or_default();
        format!("<html><body>{}<div>{}</div></body></html>", cards, pagination)
    }

    #[test]
    fn test_max_page() {
        let doc = Document::parse(&listing(Some(" 5 "), &[]));
        assert_eq!(max_page(&doc).unwrap(), 5);
    }

    #[test]
    fn test_max_page_missing_indicator() {
        let doc = Document::parse(&listing(None, &["/dp/A1"]));
        assert!(matches!(max_page(&doc), Err(ScraperError::PaginationError(_))));
    }

    #[test]
    fn test_max_page_non_numeric() {
        let doc = Document::parse(&listing(Some("..."), &[]));
        assert!(matches!(max_page(&doc), Err(ScraperError::PaginationError(_))));
    }

    #[test]
    fn test_indicator_class_must_match_exactly() {
        let html = r#"<span class="s-pagination-item s-pagination-disabled s-pagination-previous">Previous</span>
                      <span class="s-pagination-item s-pagination-disabled">7</span>"#;
        let doc = Document::parse(html);
        assert_eq!(max_page(&doc).unwrap(), 7);
    }

    #[test]
    fn test_page_url_appends_page_parameter() {
        let start = Url::parse("https://example.com/s?k=phone").unwrap();
        assert_eq!(
            page_url(&start, 2).unwrap().as_str(),
            "https://example.com/s?k=phone&page=2"
        );
    }

    #[test]
    fn test_product_links_in_document_order() {
        let base = Url::parse("https://example.com").unwrap();
        let doc = Document::parse(&listing(
            Some("3"),
            &["/dp/A1", "https://example.com/dp/A2", "/dp/A1"],
        ));

        let links: Vec<String> = product_links(&doc, &base)
            .into_iter()
            .map(|u| u.to_string())
            .collect();

        assert_eq!(
            links,
            vec![
                "https://example.com/dp/A1",
                "https://example.com/dp/A2",
                "https://example.com/dp/A1",
            ]
        );
    }

    #[test]
    fn test_cards_without_links_are_skipped() {
        let base = Url::parse("https://example.com").unwrap();
        let html = r#"<div data-component-type="s-search-result"><span>sponsored</span></div>
                      <div data-component-type="s-search-result"><a name="x">no href</a></div>
                      <div data-component-type="s-search-result"><a href="/dp/B1">ok</a></div>"#;
        let doc = Document::parse(html);

        let links = product_links(&doc, &base);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].path(), "/dp/B1");
    }
}
