//! Application layer - query orchestration and wire shapes
//!
//! Ties the page fetcher, the parsers and the rank engine together into a
//! single ticker query, and renders the outcome for callers.

pub mod dto;
pub mod errors;
pub mod industry_rank_service;
pub mod report;

// Re-export commonly used items
pub use dto::{ErrorResponseDto, IndustryRankRequest, IndustryRankResponse, SuccessResponseDto};
pub use errors::{ErrorCode, QueryError};
pub use industry_rank_service::IndustryRankService;
pub use report::{format_rank, format_value, render_response};
