use serde::{Deserialize, Serialize};

/// A credential record in the `Accounts` collection, keyed by username.
///
/// `password` carries the Argon2id hash produced at registration, never the
/// plaintext credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
}
