use thiserror::Error;

pub type Result<T> = std::result::Result<T, RewardError>;

#[derive(Error, Debug)]
pub enum RewardError {
    #[error("reward '{id}' is not pending")]
    NotFound { id: String },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
