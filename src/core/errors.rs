use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing credential: set the {0} environment variable")]
    MissingCredential(&'static str),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        AppError::Internal(err.to_string())
    }
}
