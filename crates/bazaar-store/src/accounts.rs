use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use serde_json::{Map, Value};
use tracing::debug;

use bazaar_db::Database;
use bazaar_types::models::Account;

use crate::error::StoreError;

const COLLECTION: &str = "Accounts";

/// Credential records, keyed by username in the `Accounts` collection.
pub struct AccountStore {
    db: Arc<Database>,
}

impl AccountStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Register a username. Returns false when the name is already taken.
    pub fn add_account(&self, username: &str, password: &str) -> Result<bool, StoreError> {
        match self.try_add_account(username, password) {
            Ok(()) => Ok(true),
            Err(e) if e.is_rejection() => {
                debug!("Registration rejected for {}: {}", username, e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Register a username, surfacing the rejection kind. The password is
    /// stored as an Argon2id hash; creation is a single conditional insert,
    /// so racing registrations of one name cannot both succeed.
    pub fn try_add_account(&self, username: &str, password: &str) -> Result<(), StoreError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(StoreError::Hash)?
            .to_string();

        let mut contents = Map::new();
        contents.insert("username".into(), Value::String(username.to_string()));
        contents.insert("password".into(), Value::String(password_hash));

        let created = self
            .db
            .collection(COLLECTION)
            .document(username)
            .create(&contents)?;
        if !created {
            return Err(StoreError::DuplicateAccount);
        }
        Ok(())
    }

    /// The stored record for a username, `None` when absent. The record's
    /// `password` field carries the hash, not the credential itself.
    pub fn get_account(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let Some(data) = self.db.collection(COLLECTION).document(username).get()? else {
            return Ok(None);
        };
        let account = serde_json::from_value(Value::Object(data))
            .map_err(|e| StoreError::Backend(e.into()))?;
        Ok(Some(account))
    }

    /// Verify a claimed credential. `None` when no such account exists,
    /// otherwise whether the password matches the stored hash.
    pub fn login(&self, username: &str, password: &str) -> Result<Option<bool>, StoreError> {
        let Some(account) = self.get_account(username)? else {
            return Ok(None);
        };

        let parsed_hash = PasswordHash::new(&account.password).map_err(StoreError::Hash)?;
        let verified = Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok();
        Ok(Some(verified))
    }
}
