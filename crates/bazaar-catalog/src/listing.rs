use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::Category;

/// A typed listing, one variant per category. Serializing one yields the
/// `category` tag plus every category-specific field under its schema key,
/// so a variant that compiles is a payload that validates. `seller` and
/// `upload time` are stamped by the post store at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum Listing {
    #[serde(rename = "books")]
    Books {
        #[serde(rename = "book title")]
        title: String,
        description: String,
        edition: String,
        #[serde(rename = "course number")]
        course_number: String,
        price: String,
    },
    #[serde(rename = "clothing")]
    Clothing {
        #[serde(rename = "type")]
        kind: String,
        description: String,
        color: String,
        size: String,
        price: String,
    },
    #[serde(rename = "furniture")]
    Furniture {
        #[serde(rename = "type")]
        kind: String,
        description: String,
        color: String,
        dimension: String,
        weight: String,
        price: String,
    },
    #[serde(rename = "electronics")]
    Electronics {
        #[serde(rename = "type")]
        kind: String,
        description: String,
        model: String,
        dimension: String,
        weight: String,
        price: String,
    },
    #[serde(rename = "sports gear")]
    SportsGear {
        #[serde(rename = "type")]
        kind: String,
        description: String,
        weight: String,
        price: String,
    },
}

impl Listing {
    pub fn category(&self) -> Category {
        match self {
            Listing::Books { .. } => Category::Books,
            Listing::Clothing { .. } => Category::Clothing,
            Listing::Furniture { .. } => Category::Furniture,
            Listing::Electronics { .. } => Category::Electronics,
            Listing::SportsGear { .. } => Category::SportsGear,
        }
    }

    /// The listing as a field mapping, ready for `seller` and `upload time`
    /// stamping.
    pub fn to_fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // String-keyed struct variants always serialize to an object.
            _ => unreachable!("listing did not serialize to an object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::matches_schema;
    use serde_json::json;

    fn samples() -> Vec<Listing> {
        vec![
            Listing::Books {
                title: "Coding for Dummies".into(),
                description: "Hello World".into(),
                edition: "1".into(),
                course_number: "CS 101".into(),
                price: "10.00".into(),
            },
            Listing::Clothing {
                kind: "jacket".into(),
                description: "Warm winter jacket".into(),
                color: "navy".into(),
                size: "M".into(),
                price: "25.00".into(),
            },
            Listing::Furniture {
                kind: "desk".into(),
                description: "Standing desk".into(),
                color: "white".into(),
                dimension: "120x60".into(),
                weight: "30kg".into(),
                price: "80.00".into(),
            },
            Listing::Electronics {
                kind: "calculator".into(),
                description: "Graphing calculator".into(),
                model: "TI-84".into(),
                dimension: "19x9".into(),
                weight: "0.3kg".into(),
                price: "40.00".into(),
            },
            Listing::SportsGear {
                kind: "racket".into(),
                description: "Tennis racket".into(),
                weight: "0.3kg".into(),
                price: "15.00".into(),
            },
        ]
    }

    #[test]
    fn fields_carry_the_category_tag() {
        for listing in samples() {
            let fields = listing.to_fields();
            assert_eq!(
                fields.get("category").and_then(Value::as_str),
                Some(listing.category().name()),
            );
        }
    }

    #[test]
    fn stamped_fields_match_every_schema() {
        for listing in samples() {
            let mut fields = listing.to_fields();
            fields.insert("seller".into(), json!("TestAccount"));
            fields.insert("upload time".into(), json!("2025-01-15 12:30:00"));
            assert!(
                matches_schema(&fields),
                "schema mismatch for {:?}",
                listing.category(),
            );
        }
    }

    #[test]
    fn deserializes_from_tagged_payload() {
        let listing: Listing = serde_json::from_value(json!({
            "category": "sports gear",
            "type": "racket",
            "description": "Tennis racket",
            "weight": "0.3kg",
            "price": "15.00",
        }))
        .unwrap();
        assert_eq!(listing.category(), Category::SportsGear);
    }
}
