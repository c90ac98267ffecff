use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("unsupported post url: {0}")]
    UnsupportedUrl(String),
}
