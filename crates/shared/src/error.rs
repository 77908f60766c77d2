use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unavailable,
    Malformed,
    Io,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("catalog entry id must be positive, got {id}")]
    InvalidId { id: i64 },
    #[error("catalog entry {id} has an empty name")]
    EmptyName { id: i64 },
    #[error("price must be a finite non-negative amount, got {amount}")]
    InvalidPrice { amount: f64 },
    #[error("catalog entry id {id} appears more than once")]
    DuplicateId { id: i64 },
}

/// Why a catalog fetch rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("catalog source unavailable: {0}")]
    Unavailable(String),
    #[error("catalog payload malformed: {0}")]
    Malformed(String),
    #[error("catalog read failed: {0}")]
    Io(String),
    #[error("catalog payload invalid: {0}")]
    Invalid(#[from] CatalogError),
}

impl FetchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Unavailable(_) => ErrorCode::Unavailable,
            Self::Malformed(_) => ErrorCode::Malformed,
            Self::Io(_) => ErrorCode::Io,
            Self::Invalid(_) => ErrorCode::Validation,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value.to_string())
    }
}
