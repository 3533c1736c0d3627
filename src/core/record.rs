use serde::Serialize;
use url::Url;

/// Absolute URL of a single product detail page.
pub type ProductLink = Url;

pub const CSV_HEADER: [&str; 8] = [
    "Product",
    "About item",
    "Full Price",
    "Purchase Price",
    "Rating",
    "Reviews",
    "Characteristics",
    "Link to Product",
];

/// One extracted product. Prices and ratings stay as displayed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    pub title: String,
    pub about_item: String,
    pub full_price: String,
    pub purchase_price: String,
    pub rating: String,
    pub reviews: String,
    pub characteristics: String,
    pub source_url: String,
}

impl ProductRecord {
    /// Fields in header order.
    pub fn to_csv_record(&self) -> [&str; 8] {
        [
            &self.title,
            &self.about_item,
            &self.full_price,
            &self.purchase_price,
            &self.rating,
            &self.reviews,
            &self.characteristics,
            &self.source_url,
        ]
    }
}
