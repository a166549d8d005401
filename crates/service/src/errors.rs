use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    /// Wrap a store failure without translating it.
    pub fn db(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}
