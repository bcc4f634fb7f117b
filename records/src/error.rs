use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Records storage failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Records file is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not format record date: {0}")]
    Format(#[from] time::error::Format),
    #[error("Player name must not be blank")]
    BlankName,
}

pub type Result<T> = std::result::Result<T, RecordsError>;
