use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config document error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FieldResult<T> = Result<T, FieldError>;
