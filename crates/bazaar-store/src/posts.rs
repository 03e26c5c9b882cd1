use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::debug;

use bazaar_catalog::{Listing, matches_schema};
use bazaar_db::{Database, Document};

use crate::error::StoreError;

const COLLECTION: &str = "Posts";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Item postings, validated against the category schemas and persisted in
/// the `Posts` collection under store-generated identifiers.
pub struct PostStore {
    db: Arc<Database>,
}

impl PostStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Persist a raw payload. True when the payload declares a known
    /// category and carries exactly the key set that category requires;
    /// false on any shape mismatch.
    pub fn add_post(&self, payload: &Map<String, Value>) -> Result<bool, StoreError> {
        match self.try_add_post(payload) {
            Ok(_) => Ok(true),
            Err(e) if e.is_rejection() => {
                debug!("Post rejected: {}", e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Like `add_post`, but surfaces the rejection kind and the generated
    /// document id.
    pub fn try_add_post(&self, payload: &Map<String, Value>) -> Result<String, StoreError> {
        let category = payload
            .get("category")
            .and_then(Value::as_str)
            .ok_or(StoreError::MissingCategory)?;
        if bazaar_catalog::get_fields(category).is_none() {
            return Err(StoreError::UnknownCategory(category.to_string()));
        }
        if !matches_schema(payload) {
            return Err(StoreError::SchemaMismatch(category.to_string()));
        }

        let id = self.db.collection(COLLECTION).add(payload)?;
        Ok(id)
    }

    /// Persist a typed listing on behalf of a seller, stamping the upload
    /// time. Returns the generated document id.
    pub fn add_listing(&self, listing: &Listing, seller: &str) -> Result<String, StoreError> {
        let mut fields = listing.to_fields();
        fields.insert("seller".into(), Value::String(seller.to_string()));
        fields.insert(
            "upload time".into(),
            Value::String(Utc::now().format(TIME_FORMAT).to_string()),
        );
        self.try_add_post(&fields)
    }

    /// Required field names for a category, schema order. `None` for an
    /// unknown category.
    pub fn get_keys(&self, category: &str) -> Option<&'static [&'static str]> {
        bazaar_catalog::get_fields(category)
    }

    /// All category names.
    pub fn get_categories(&self) -> [&'static str; 5] {
        bazaar_catalog::get_categories()
    }

    /// Every stored posting, oldest first.
    pub fn list_posts(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.db.collection(COLLECTION).stream()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> PostStore {
        PostStore::new(Arc::new(Database::open_in_memory().unwrap()))
    }

    fn books_payload() -> Map<String, Value> {
        let Value::Object(map) = json!({
            "category": "books",
            "book title": "Coding for Dummies",
            "description": "Hello World",
            "edition": "1",
            "course number": "CS 101",
            "price": "10.00",
            "seller": "TestAccount",
            "upload time": "2025-01-15 12:30:00",
        }) else {
            unreachable!()
        };
        map
    }

    #[test]
    fn valid_payload_is_stored_and_listed() {
        let posts = store();
        let payload = books_payload();
        assert!(posts.add_post(&payload).unwrap());

        let stored = posts.list_posts().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].data, payload);
    }

    #[test]
    fn payload_without_category_is_rejected() {
        let posts = store();
        let mut payload = books_payload();
        payload.remove("category");
        assert!(!posts.add_post(&payload).unwrap());
        assert!(posts.list_posts().unwrap().is_empty());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let posts = store();
        let mut payload = books_payload();
        payload.insert("category".into(), json!("vehicles"));
        assert!(!posts.add_post(&payload).unwrap());
    }

    #[test]
    fn wrong_key_set_is_rejected() {
        let posts = store();

        let mut extra = books_payload();
        extra.insert("condition".into(), json!("used"));
        assert!(!posts.add_post(&extra).unwrap());

        let mut missing = books_payload();
        missing.remove("price");
        assert!(!posts.add_post(&missing).unwrap());
    }

    #[test]
    fn try_add_post_names_the_rejection() {
        let posts = store();

        let mut payload = books_payload();
        payload.insert("category".into(), json!("vehicles"));
        assert!(matches!(
            posts.try_add_post(&payload),
            Err(StoreError::UnknownCategory(_)),
        ));

        let mut payload = books_payload();
        payload.remove("category");
        assert!(matches!(
            posts.try_add_post(&payload),
            Err(StoreError::MissingCategory),
        ));

        let mut payload = books_payload();
        payload.remove("price");
        assert!(matches!(
            posts.try_add_post(&payload),
            Err(StoreError::SchemaMismatch(_)),
        ));
    }

    #[test]
    fn listing_is_stamped_with_seller_and_upload_time() {
        let posts = store();
        let listing = Listing::Books {
            title: "Coding for Dummies".into(),
            description: "Hello World".into(),
            edition: "1".into(),
            course_number: "CS 101".into(),
            price: "10.00".into(),
        };

        let id = posts.add_listing(&listing, "TestAccount").unwrap();

        let stored = posts.list_posts().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].data.get("seller"), Some(&json!("TestAccount")));

        let upload_time = stored[0].data["upload time"].as_str().unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(upload_time, TIME_FORMAT).is_ok());
    }

    #[test]
    fn key_delegation_matches_the_registry() {
        let posts = store();
        assert_eq!(posts.get_keys("books"), bazaar_catalog::get_fields("books"));
        assert_eq!(posts.get_keys("doesn't exist"), None);
        assert_eq!(posts.get_categories(), bazaar_catalog::get_categories());
    }

    #[test]
    fn posts_list_in_insertion_order() {
        let posts = store();
        let first = books_payload();
        let mut second = books_payload();
        second.insert("book title".into(), json!("Second Book"));

        posts.add_post(&first).unwrap();
        posts.add_post(&second).unwrap();

        let stored = posts.list_posts().unwrap();
        assert_eq!(stored[0].data.get("book title"), Some(&json!("Coding for Dummies")));
        assert_eq!(stored[1].data.get("book title"), Some(&json!("Second Book")));
    }
}
