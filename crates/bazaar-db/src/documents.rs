use anyhow::{Result, anyhow};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::Database;

/// A stored document: its identifier plus the field mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Map<String, Value>,
}

/// Handle to a named collection of documents.
pub struct Collection<'db> {
    db: &'db Database,
    name: String,
}

impl<'db> Collection<'db> {
    pub(crate) fn new(db: &'db Database, name: &str) -> Self {
        Self {
            db,
            name: name.to_string(),
        }
    }

    /// Handle to the document slot with a caller-supplied identifier. The
    /// slot may or may not hold a document yet.
    pub fn document(&self, id: &str) -> DocumentRef<'db> {
        DocumentRef {
            db: self.db,
            collection: self.name.clone(),
            id: id.to_string(),
        }
    }

    /// Insert under a store-generated identifier and return it.
    pub fn add(&self, data: &Map<String, Value>) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let json = serde_json::to_string(data)?;
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO documents (collection, id, data) VALUES (?1, ?2, ?3)",
                rusqlite::params![self.name, id, json],
            )?;
            Ok(())
        })?;
        Ok(id)
    }

    /// All documents in the collection, oldest first.
    pub fn stream(&self) -> Result<Vec<Document>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, data FROM documents WHERE collection = ?1 ORDER BY rowid",
            )?;
            let rows = stmt
                .query_map([&self.name], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rows.into_iter()
                .map(|(id, json)| {
                    let data = parse_data(&json, &id)?;
                    Ok(Document { id, data })
                })
                .collect()
        })
    }
}

/// Handle to one document slot.
pub struct DocumentRef<'db> {
    db: &'db Database,
    collection: String,
    id: String,
}

impl DocumentRef<'_> {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The document's field mapping, or `None` when the slot is empty.
    pub fn get(&self) -> Result<Option<Map<String, Value>>> {
        self.db.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT data FROM documents WHERE collection = ?1 AND id = ?2")?;
            let json = stmt
                .query_row(rusqlite::params![self.collection, self.id], |row| {
                    row.get::<_, String>(0)
                })
                .optional()?;
            json.map(|json| parse_data(&json, &self.id)).transpose()
        })
    }

    pub fn exists(&self) -> Result<bool> {
        Ok(self.get()?.is_some())
    }

    /// Write the document, replacing any previous contents.
    pub fn set(&self, data: &Map<String, Value>) -> Result<()> {
        let json = serde_json::to_string(data)?;
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO documents (collection, id, data) VALUES (?1, ?2, ?3)
                 ON CONFLICT (collection, id) DO UPDATE SET data = excluded.data",
                rusqlite::params![self.collection, self.id, json],
            )?;
            Ok(())
        })
    }

    /// Create the document only if the slot is empty. Returns false, with
    /// any existing document untouched, when the identifier is taken.
    /// A single statement, so two racing creators cannot both win.
    pub fn create(&self, data: &Map<String, Value>) -> Result<bool> {
        let json = serde_json::to_string(data)?;
        self.db.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO documents (collection, id, data) VALUES (?1, ?2, ?3)",
                rusqlite::params![self.collection, self.id, json],
            )?;
            Ok(inserted == 1)
        })
    }
}

fn parse_data(json: &str, id: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(json)? {
        Value::Object(map) => Ok(map),
        _ => Err(anyhow!("Document {} is not a JSON object", id)),
    }
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
