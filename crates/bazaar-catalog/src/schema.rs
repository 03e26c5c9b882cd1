use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The five fixed item classes. The set is static: a posting carries one of
/// these names in its `category` field and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "books")]
    Books,
    #[serde(rename = "clothing")]
    Clothing,
    #[serde(rename = "furniture")]
    Furniture,
    #[serde(rename = "electronics")]
    Electronics,
    #[serde(rename = "sports gear")]
    SportsGear,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Books,
        Category::Clothing,
        Category::Furniture,
        Category::Electronics,
        Category::SportsGear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Books => "books",
            Category::Clothing => "clothing",
            Category::Furniture => "furniture",
            Category::Electronics => "electronics",
            Category::SportsGear => "sports gear",
        }
    }

    /// Exact-name lookup. Category names are lowercase with no aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().find(|c| c.name() == name).copied()
    }

    /// Required field names for a posting in this category, in declaration
    /// order. Every schema starts with `category` and ends with `seller`,
    /// `upload time`.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Category::Books => &[
                "category",
                "book title",
                "description",
                "edition",
                "course number",
                "price",
                "seller",
                "upload time",
            ],
            Category::Clothing => &[
                "category",
                "type",
                "description",
                "color",
                "size",
                "price",
                "seller",
                "upload time",
            ],
            Category::Furniture => &[
                "category",
                "type",
                "description",
                "color",
                "dimension",
                "weight",
                "price",
                "seller",
                "upload time",
            ],
            Category::Electronics => &[
                "category",
                "type",
                "description",
                "model",
                "dimension",
                "weight",
                "price",
                "seller",
                "upload time",
            ],
            Category::SportsGear => &[
                "category",
                "type",
                "description",
                "weight",
                "price",
                "seller",
                "upload time",
            ],
        }
    }
}

/// Field list for a category name, `None` when the category is unknown.
pub fn get_fields(category: &str) -> Option<&'static [&'static str]> {
    Category::from_name(category).map(Category::fields)
}

/// All category names, declaration order.
pub fn get_categories() -> [&'static str; 5] {
    Category::ALL.map(Category::name)
}

/// Whether a candidate payload has exactly the key set its declared category
/// requires: no extra keys, no missing keys. Key order is irrelevant.
/// False when the `category` key is absent, not a string, or names no known
/// category.
pub fn matches_schema(payload: &Map<String, Value>) -> bool {
    let Some(category) = payload.get("category").and_then(Value::as_str) else {
        return false;
    };
    let Some(expected) = get_fields(category) else {
        return false;
    };
    payload.len() == expected.len() && expected.iter().all(|field| payload.contains_key(*field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

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
    fn every_category_has_a_schema() {
        for category in Category::ALL {
            let fields = category.fields();
            assert!(!fields.is_empty());
            assert_eq!(fields[0], "category");
            assert!(fields.contains(&"seller"));
            assert!(fields.contains(&"upload time"));
            assert_eq!(get_fields(category.name()), Some(fields));
        }
    }

    #[test]
    fn books_schema_is_exact() {
        assert_eq!(
            get_fields("books").unwrap(),
            &[
                "category",
                "book title",
                "description",
                "edition",
                "course number",
                "price",
                "seller",
                "upload time",
            ],
        );
    }

    #[test]
    fn unknown_category_has_no_fields() {
        assert_eq!(get_fields("doesn't exist"), None);
        assert_eq!(Category::from_name("Books"), None); // exact names only
    }

    #[test]
    fn category_names_round_trip() {
        assert_eq!(
            get_categories(),
            ["books", "clothing", "furniture", "electronics", "sports gear"],
        );
        for name in get_categories() {
            assert_eq!(Category::from_name(name).map(Category::name), Some(name));
        }
    }

    #[test]
    fn complete_payload_matches() {
        assert!(matches_schema(&books_payload()));
    }

    #[test]
    fn missing_category_key_rejected() {
        let mut payload = books_payload();
        payload.remove("category");
        assert!(!matches_schema(&payload));
    }

    #[test]
    fn non_string_category_rejected() {
        let mut payload = books_payload();
        payload.insert("category".into(), json!(42));
        assert!(!matches_schema(&payload));
    }

    #[test]
    fn unknown_category_rejected() {
        let mut payload = books_payload();
        payload.insert("category".into(), json!("vehicles"));
        assert!(!matches_schema(&payload));
    }

    #[test]
    fn extra_key_rejected() {
        let mut payload = books_payload();
        payload.insert("condition".into(), json!("used"));
        assert!(!matches_schema(&payload));
    }

    #[test]
    fn missing_key_rejected() {
        let mut payload = books_payload();
        payload.remove("price");
        assert!(!matches_schema(&payload));
    }

    #[test]
    fn swapped_key_rejected() {
        // Right key count, wrong key set.
        let mut payload = books_payload();
        payload.remove("edition");
        payload.insert("size".into(), json!("L"));
        assert!(!matches_schema(&payload));
    }

    #[test]
    fn key_order_is_irrelevant() {
        // Parsed from JSON with the keys in reverse schema order.
        let text = r#"{
            "upload time": "2025-01-15 12:30:00",
            "seller": "TestAccount",
            "price": "10.00",
            "course number": "CS 101",
            "edition": "1",
            "description": "Hello World",
            "book title": "Coding for Dummies",
            "category": "books"
        }"#;
        let payload: Map<String, Value> = serde_json::from_str(text).unwrap();
        assert!(matches_schema(&payload));
    }
}
