use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Duplicate document {id} in {collection}")]
    Duplicate { collection: &'static str, id: String },

    #[error("Failed to encode document: {0}")]
    Encode(String),

    #[error("Failed to decode document from {collection}: {reason}")]
    Decode {
        collection: &'static str,
        reason: String,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
