pub mod listing;
pub mod schema;

pub use listing::Listing;
pub use schema::{Category, get_categories, get_fields, matches_schema};
