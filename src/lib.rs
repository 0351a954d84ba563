//! Industry Rank - where a ticker's industry stands among all industry groups
//!
//! Scrapes the ticker's industry from its quote page, reads the industry
//! groups performance table, and ranks that industry in each of five
//! timeframes (1D, 1W, 1M, 3M, 6M).

// Module declarations
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod utils;

// Re-export the query surface for easier access
pub use application::{
    ErrorCode, IndustryRankRequest, IndustryRankResponse, IndustryRankService, QueryError,
};
pub use domain::{QueryResult, RankResult, Ticker, Timeframe, TimeframeMap, compute_ranks};
