use thiserror::Error;

/// Internal error taxonomy for the stores. The public contracts collapse it
/// to boolean/absent returns: rejections become `false`/`None`, backend
/// faults stay `Err`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already taken")]
    DuplicateAccount,

    #[error("payload has no category field")]
    MissingCategory,

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("payload keys do not match the schema for {0}")]
    SchemaMismatch(String),

    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    /// Contract-level rejections — the failures the boolean contracts
    /// report as `false`. Everything else is a backend fault.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateAccount
                | StoreError::MissingCategory
                | StoreError::UnknownCategory(_)
                | StoreError::SchemaMismatch(_)
        )
    }
}
