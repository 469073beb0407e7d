use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern '{pattern}' is not a valid regular expression: {error}")]
    InvalidRegex { pattern: String, error: String },
}

pub type PatternResult<T> = Result<T, PatternError>;
