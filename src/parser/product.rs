//! Field resolvers for product detail pages.
//!
//! Each field is an ordered list of strategies. A strategy returns `None` when
//! its DOM shape is absent or yields empty text, and the first `Some` wins.
//! Fields never fail: when every strategy misses, a fixed sentinel is used.

use scraper::Selector;
use std::sync::LazyLock;
use url::Url;

use super::document::{css, text_of, Document};
use crate::core::record::ProductRecord;
use crate::{ScraperError, ScraperResult};

pub const NO_REVIEWS: &str = "No customer reviews";
pub const NO_INFORMATION: &str = "No information";
pub const NO_CHARACTERISTICS: &str = "No characteristics";

pub const TITLE_SELECTOR: &str = "h1";

type Strategy = fn(&Document) -> Option<String>;

static TITLE: LazyLock<Selector> = LazyLock::new(|| css(TITLE_SELECTOR));
static REVIEW_COUNT: LazyLock<Selector> =
    LazyLock::new(|| css("span#acrCustomerReviewText"));
static RATING_ICON: LazyLock<Selector> = LazyLock::new(|| css("span.a-icon-alt"));
static APEX_PRICE: LazyLock<Selector> = LazyLock::new(|| {
    css(r#"span[class="a-price a-text-price a-size-medium apexPriceToPay"]"#)
});
static REINVENT_PRICE: LazyLock<Selector> = LazyLock::new(|| {
    css(r#"span[class="a-price aok-align-center reinventPricePriceToPayMargin priceToPay"]"#)
});
static PROMOTION_BLOCK: LazyLock<Selector> = LazyLock::new(|| css("div#apex_desktop"));
static LIST_PRICE: LazyLock<Selector> =
    LazyLock::new(|| css(r#"span[class="a-price a-text-price"]"#));
static INNER_SPAN: LazyLock<Selector> = LazyLock::new(|| css("span"));
static FEATURE_BULLETS: LazyLock<Selector> = LazyLock::new(|| css("div#feature-bullets"));
static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| css("li"));
static EXPANDER: LazyLock<Selector> = LazyLock::new(|| {
    css(r#"div[class="a-expander-content a-expander-partial-collapse-content"]"#)
});
static SPECS_SECTION: LazyLock<Selector> =
    LazyLock::new(|| css(r#"div[class="a-section a-spacing-small a-spacing-top-small"]"#));
static TABLE: LazyLock<Selector> = LazyLock::new(|| css("table"));
static TABLE_BODY: LazyLock<Selector> = LazyLock::new(|| css("tbody"));
static TABLE_ROW: LazyLock<Selector> = LazyLock::new(|| css("tr"));
static TABLE_CELL: LazyLock<Selector> = LazyLock::new(|| css("td"));

const REVIEWS_STRATEGIES: &[Strategy] = &[review_count];
const RATING_STRATEGIES: &[Strategy] = &[rating_icon];
const PURCHASE_PRICE_STRATEGIES: &[Strategy] = &[apex_price, reinvent_price];
const ABOUT_ITEM_STRATEGIES: &[Strategy] = &[feature_bullets, expander_description];
const CHARACTERISTICS_STRATEGIES: &[Strategy] = &[spec_table];

/// Builds the record from an already rendered product page.
pub fn extract_record(doc: &Document, url: &Url) -> ScraperResult<ProductRecord> {
    let title = title(doc).ok_or_else(|| {
        ScraperError::ExtractionError(format!("no top-level heading on {}", url))
    })?;
    let reviews = reviews(doc);
    let rating = rating(doc);
    let purchase_price = purchase_price(doc);
    let full_price = full_price(doc, &purchase_price);
    let about_item = about_item(doc);
    let characteristics = characteristics(doc);

    Ok(ProductRecord {
        title,
        about_item,
        full_price,
        purchase_price,
        rating,
        reviews,
        characteristics,
        source_url: url.to_string(),
    })
}

pub fn title(doc: &Document) -> Option<String> {
    doc.text_of(&TITLE)
}

pub fn reviews(doc: &Document) -> String {
    resolve(doc, REVIEWS_STRATEGIES, NO_REVIEWS)
}

pub fn rating(doc: &Document) -> String {
    resolve(doc, RATING_STRATEGIES, NO_REVIEWS)
}

pub fn purchase_price(doc: &Document) -> String {
    resolve(doc, PURCHASE_PRICE_STRATEGIES, NO_INFORMATION)
}

/// The crossed-out list price inside the promotion block, or the purchase
/// price when none is advertised.
pub fn full_price(doc: &Document, purchase_price: &str) -> String {
    doc.select_first(&PROMOTION_BLOCK)
        .and_then(|block| block.select(&LIST_PRICE).next())
        .and_then(|price| price.select(&INNER_SPAN).next())
        .map(text_of)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| purchase_price.to_string())
}

pub fn about_item(doc: &Document) -> String {
    resolve(doc, ABOUT_ITEM_STRATEGIES, NO_INFORMATION)
}

pub fn characteristics(doc: &Document) -> String {
    resolve(doc, CHARACTERISTICS_STRATEGIES, NO_CHARACTERISTICS)
}

fn resolve(doc: &Document, strategies: &[Strategy], sentinel: &str) -> String {
    strategies
        .iter()
        .find_map(|strategy| strategy(doc))
        .unwrap_or_else(|| sentinel.to_string())
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

fn review_count(doc: &Document) -> Option<String> {
    non_empty(doc.text_of(&REVIEW_COUNT))
}

fn rating_icon(doc: &Document) -> Option<String> {
    non_empty(doc.text_of(&RATING_ICON))
}

fn price_in(doc: &Document, block: &Selector) -> Option<String> {
    let block = doc.select_first(block)?;
    non_empty(block.select(&INNER_SPAN).next().map(text_of))
}

fn apex_price(doc: &Document) -> Option<String> {
    price_in(doc, &APEX_PRICE)
}

fn reinvent_price(doc: &Document) -> Option<String> {
    price_in(doc, &REINVENT_PRICE)
}

fn feature_bullets(doc: &Document) -> Option<String> {
    let block = doc.select_first(&FEATURE_BULLETS)?;
    let items: Vec<String> = block.select(&LIST_ITEM).map(text_of).collect();
    non_empty(Some(items.join("; ")))
}

fn expander_description(doc: &Document) -> Option<String> {
    non_empty(doc.text_of(&EXPANDER))
}

fn spec_table(doc: &Document) -> Option<String> {
    let section = doc.select_first(&SPECS_SECTION)?;
    let table = section.select(&TABLE).next()?;
    let body = table.select(&TABLE_BODY).next()?;

    let pairs: Vec<String> = body
        .select(&TABLE_ROW)
        .filter_map(|row| {
            let mut cells = row.select(&TABLE_CELL);
            let label = text_of(cells.next()?);
            let value = text_of(cells.next()?);
            Some(format!("{}: {}", label, value))
        })
        .collect();

    non_empty(Some(pairs.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"
        <html><body>
          <div id="centerCol">
            <h1 id="title"> <span id="productTitle">  Acme Phone X  </span> </h1>
            <span id="acrCustomerReviewText">1,024 ratings</span>
            <i class="a-icon a-icon-star"><span class="a-icon-alt">4.4 out of 5 stars</span></i>
            <div id="apex_desktop">
              <span class="a-price a-text-price a-size-medium apexPriceToPay">
                <span class="a-offscreen">$199.99</span><span aria-hidden="true">$199.99</span>
              </span>
              <span class="a-price a-text-price" data-a-strike="true">
                <span class="a-offscreen">$249.99</span><span aria-hidden="true">$249.99</span>
              </span>
            </div>
            <div id="feature-bullets">
              <ul>
                <li><span> 6.1-inch display </span></li>
                <li><span>Dual camera</span></li>
              </ul>
            </div>
            <div class="a-section a-spacing-small a-spacing-top-small">
              <table>
                <tr><td><span>Brand</span></td><td><span>Acme</span></td></tr>
                <tr><td>Color</td><td>Black</td></tr>
              </table>
            </div>
          </div>
        </body></html>
    "#;

    fn url() -> Url {
        Url::parse("https://example.com/dp/A1").unwrap()
    }

    #[test]
    fn test_full_page() {
        let doc = Document::parse(FULL_PAGE);
        let record = extract_record(&doc, &url()).unwrap();

        assert_eq!(record.title, "Acme Phone X");
        assert_eq!(record.reviews, "1,024 ratings");
        assert_eq!(record.rating, "4.4 out of 5 stars");
        assert_eq!(record.purchase_price, "$199.99");
        assert_eq!(record.full_price, "$249.99");
        assert_eq!(record.about_item, "6.1-inch display; Dual camera");
        assert_eq!(record.characteristics, "Brand: Acme; Color: Black");
        assert_eq!(record.source_url, "https://example.com/dp/A1");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract_record(&Document::parse(FULL_PAGE), &url()).unwrap();
        let second = extract_record(&Document::parse(FULL_PAGE), &url()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_heading_is_an_error() {
        let doc = Document::parse("<div><span id='acrCustomerReviewText'>3 ratings</span></div>");
        assert!(matches!(
            extract_record(&doc, &url()),
            Err(ScraperError::ExtractionError(_))
        ));
    }

    #[test]
    fn test_sentinels_on_bare_page() {
        let doc = Document::parse("<h1>Plain</h1>");
        let record = extract_record(&doc, &url()).unwrap();

        assert_eq!(record.reviews, NO_REVIEWS);
        assert_eq!(record.rating, NO_REVIEWS);
        assert_eq!(record.purchase_price, NO_INFORMATION);
        assert_eq!(record.full_price, NO_INFORMATION);
        assert_eq!(record.about_item, NO_INFORMATION);
        assert_eq!(record.characteristics, NO_CHARACTERISTICS);
    }

    #[test]
    fn test_second_price_signature() {
        let doc = Document::parse(
            r#"<h1>T</h1>
               <span class="a-price aok-align-center reinventPricePriceToPayMargin priceToPay">
                 <span class="a-offscreen">$12.50</span>
               </span>"#,
        );
        assert_eq!(purchase_price(&doc), "$12.50");
    }

    #[test]
    fn test_first_price_signature_wins() {
        let doc = Document::parse(
            r#"<span class="a-price aok-align-center reinventPricePriceToPayMargin priceToPay"><span>$2</span></span>
               <span class="a-price a-text-price a-size-medium apexPriceToPay"><span>$1</span></span>"#,
        );
        assert_eq!(purchase_price(&doc), "$1");
    }

    #[test]
    fn test_full_price_defaults_without_promotion_block() {
        let doc = Document::parse(
            r#"<h1>T</h1>
               <span class="a-price a-text-price"><span>$99.00</span></span>
               <span class="a-price aok-align-center reinventPricePriceToPayMargin priceToPay"><span>$12.50</span></span>"#,
        );
        let purchase = purchase_price(&doc);
        assert_eq!(full_price(&doc, &purchase), purchase);
        assert_eq!(full_price(&doc, &purchase), "$12.50");
    }

    #[test]
    fn test_full_price_defaults_when_promotion_has_no_list_price() {
        let doc = Document::parse(
            r#"<div id="apex_desktop">
                 <span class="a-price a-text-price a-size-medium apexPriceToPay"><span>$5.00</span></span>
               </div>"#,
        );
        let purchase = purchase_price(&doc);
        assert_eq!(purchase, "$5.00");
        assert_eq!(full_price(&doc, &purchase), "$5.00");
    }

    #[test]
    fn test_about_item_falls_back_to_expander() {
        let doc = Document::parse(
            r#"<div class="a-expander-content a-expander-partial-collapse-content">
                 <p>Long description</p> <p>continues</p>
               </div>"#,
        );
        assert_eq!(about_item(&doc), "Long description continues");
    }

    #[test]
    fn test_empty_bullets_fall_back_to_expander() {
        let doc = Document::parse(
            r#"<div id="feature-bullets"><ul></ul></div>
               <div class="a-expander-content a-expander-partial-collapse-content">Described</div>"#,
        );
        assert_eq!(about_item(&doc), "Described");
    }

    #[test]
    fn test_characteristics_skip_incomplete_rows() {
        let doc = Document::parse(
            r#"<div class="a-section a-spacing-small a-spacing-top-small">
                 <table><tbody>
                   <tr><td>Brand</td><td>Acme</td></tr>
                   <tr><td>Orphan label</td></tr>
                   <tr><td>Weight</td><td>120 g</td></tr>
                 </tbody></table>
               </div>"#,
        );
        assert_eq!(characteristics(&doc), "Brand: Acme; Weight: 120 g");
    }

    #[test]
    fn test_characteristics_section_without_table() {
        let doc = Document::parse(
            r#"<div class="a-section a-spacing-small a-spacing-top-small"><p>none</p></div>"#,
        );
        assert_eq!(characteristics(&doc), NO_CHARACTERISTICS);
    }
}
