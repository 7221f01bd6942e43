//! Error types for date keyword parsing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Template must be a non-empty string")]
    InvalidArgument,

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid keyword: {0}")]
    InvalidKeyword(String),

    #[error("Duplicate unit: {0}")]
    DuplicateUnit(char),

    #[error("Invalid format specifier: {0}")]
    Format(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;
