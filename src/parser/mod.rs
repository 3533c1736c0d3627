pub mod document;
pub mod listing;
pub mod product;

pub use document::Document;
