//! FILENAME: records/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Empty input: cannot compute {computation} over zero records")]
    EmptyInput { computation: &'static str },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalyticsError {
    pub fn empty_input(computation: &'static str) -> Self {
        AnalyticsError::EmptyInput { computation }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        AnalyticsError::InvalidParameter(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
