//! Data Transfer Objects for industry rank queries
//!
//! Wire shapes exchanged with callers: a request carrying a ticker and a
//! response that is either `{ok: true, industry, ranks, values, total}` or
//! `{ok: false, error, detail?}`.

use serde::{Deserialize, Serialize};

use crate::application::errors::{ErrorCode, QueryError};
use crate::domain::QueryResult;

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryRankRequest {
    /// Raw ticker as typed by the user; trimmed and uppercased downstream
    pub ticker: String,
}

impl IndustryRankRequest {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessResponseDto {
    ok: bool,
    #[serde(flatten)]
    pub result: QueryResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponseDto {
    ok: bool,
    pub error: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IndustryRankResponse {
    Success(SuccessResponseDto),
    Failure(ErrorResponseDto),
}

impl IndustryRankResponse {
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub const fn result(&self) -> Option<&QueryResult> {
        match self {
            Self::Success(success) => Some(&success.result),
            Self::Failure(_) => None,
        }
    }

    pub const fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure.error),
        }
    }
}

impl From<QueryResult> for IndustryRankResponse {
    fn from(result: QueryResult) -> Self {
        Self::Success(SuccessResponseDto { ok: true, result })
    }
}

impl From<QueryError> for IndustryRankResponse {
    fn from(error: QueryError) -> Self {
        Self::Failure(ErrorResponseDto {
            ok: false,
            error: error.code(),
            detail: error.detail(),
        })
    }
}

impl From<Result<QueryResult, QueryError>> for IndustryRankResponse {
    fn from(outcome: Result<QueryResult, QueryError>) -> Self {
        match outcome {
            Ok(result) => result.into(),
            Err(error) => error.into(),
        }
    }
}
