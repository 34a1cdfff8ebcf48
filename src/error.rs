/// Raised when a date string matches none of the accepted layouts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown date format: {0}")]
pub struct DateFormatError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum ClimateError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Insufficient data: {0}")]
    EmptyAggregate(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Logger Error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, ClimateError>;
