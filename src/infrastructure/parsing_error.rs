//! Parsing error types for the quote and groups pages
//!
//! Distinguishes a broken upstream format (rows missing or unparseable) from
//! a bad extraction pattern supplied through configuration.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Embedded row array not found in groups page ({content_length} bytes scanned)")]
    RowsNotFound { content_length: usize },

    #[error("Embedded row array could not be parsed: {reason}")]
    RowsMalformed {
        reason: String,
        /// Whether the trailing-comma repair was applied before giving up
        repair_attempted: bool,
    },

    #[error("Invalid extraction pattern '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },
}

impl ParsingError {
    pub fn rows_not_found(content_length: usize) -> Self {
        Self::RowsNotFound { content_length }
    }

    pub fn rows_malformed(reason: impl ToString, repair_attempted: bool) -> Self {
        Self::RowsMalformed {
            reason: reason.to_string(),
            repair_attempted,
        }
    }

    pub fn invalid_pattern(name: &str, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True when the upstream page no longer has the shape we scrape
    pub const fn is_upstream_format_change(&self) -> bool {
        matches!(self, Self::RowsNotFound { .. } | Self::RowsMalformed { .. })
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
