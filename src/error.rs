use thiserror::Error;

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Error returned by folder operations and their collaborators.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested folder, parent, or bookmark does not exist or is deleted.
    #[error("not found: {0}")]
    NotFound(String),
    /// The request is malformed or touches a resource owned by someone else.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// SQLite rejected a statement or the transaction.
    #[error("storage error")]
    Storage(#[from] rusqlite::Error),
    /// Anything else surfaced by the storage worker or row decoding.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn folder_not_found(folder_id: i64) -> Self {
        Self::NotFound(format!("folder {folder_id} does not exist"))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }
}
