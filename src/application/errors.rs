//! Query error taxonomy
//!
//! Every failure of a single ticker query maps onto exactly one variant, and
//! each variant has a stable wire code. No query ever returns partial data.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RankError;
use crate::infrastructure::{FetchError, ParsingError};

/// Wire code of a failed query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    EmptyTicker,
    TransportFailure,
    IndustryNotFound,
    RowsNotFound,
    RowsMalformed,
    IndustryRowNotFound,
    Unexpected,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyTicker => "EMPTY_TICKER",
            Self::TransportFailure => "TRANSPORT_FAILURE",
            Self::IndustryNotFound => "INDUSTRY_NOT_FOUND",
            Self::RowsNotFound => "ROWS_NOT_FOUND",
            Self::RowsMalformed => "ROWS_MALFORMED",
            Self::IndustryRowNotFound => "INDUSTRY_ROW_NOT_FOUND",
            Self::Unexpected => "UNEXPECTED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Ticker is empty")]
    EmptyTicker,

    #[error("Transport failure: {0}")]
    TransportFailure(#[from] FetchError),

    /// Expected for ETFs, FX pairs and crypto
    #[error("No industry listed for {ticker}")]
    IndustryNotFound { ticker: String },

    #[error("Industry rows not found on groups page ({content_length} bytes)")]
    RowsNotFound { content_length: usize },

    #[error("Industry rows malformed: {reason}")]
    RowsMalformed { reason: String },

    #[error("Industry '{industry}' not found among {total} group rows")]
    IndustryRowNotFound { industry: String, total: usize },

    #[error("Unexpected failure: {message}")]
    Unexpected { message: String },
}

impl QueryError {
    pub fn unexpected(message: impl ToString) -> Self {
        Self::Unexpected {
            message: message.to_string(),
        }
    }

    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyTicker => ErrorCode::EmptyTicker,
            Self::TransportFailure(_) => ErrorCode::TransportFailure,
            Self::IndustryNotFound { .. } => ErrorCode::IndustryNotFound,
            Self::RowsNotFound { .. } => ErrorCode::RowsNotFound,
            Self::RowsMalformed { .. } => ErrorCode::RowsMalformed,
            Self::IndustryRowNotFound { .. } => ErrorCode::IndustryRowNotFound,
            Self::Unexpected { .. } => ErrorCode::Unexpected,
        }
    }

    /// Diagnostic text for the wire response; `None` for a blank ticker
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::EmptyTicker => None,
            other => Some(other.to_string()),
        }
    }

    /// Whether retrying the same query later could succeed
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }

    /// Whether the upstream pages changed shape (scraping breakage)
    pub const fn is_upstream_format_change(&self) -> bool {
        matches!(self, Self::RowsNotFound { .. } | Self::RowsMalformed { .. })
    }
}

impl From<ParsingError> for QueryError {
    fn from(error: ParsingError) -> Self {
        match error {
            ParsingError::RowsNotFound { content_length } => Self::RowsNotFound { content_length },
            ParsingError::RowsMalformed { reason, .. } => Self::RowsMalformed { reason },
            other @ ParsingError::InvalidPattern { .. } => Self::unexpected(other),
        }
    }
}

impl From<RankError> for QueryError {
    fn from(error: RankError) -> Self {
        match error {
            RankError::IndustryRowNotFound { industry, total } => {
                Self::IndustryRowNotFound { industry, total }
            }
        }
    }
}
