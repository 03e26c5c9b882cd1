pub mod accounts;
pub mod error;
pub mod posts;

pub use accounts::AccountStore;
pub use error::StoreError;
pub use posts::PostStore;
