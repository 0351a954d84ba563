//! Domain module - industry ranking entities and pure business logic
//!
//! Nothing in here performs I/O: rows come in already parsed, results go
//! out as plain values.

pub mod industry_row;
pub mod rank_engine;
pub mod rank_result;
pub mod ticker;
pub mod timeframe;

// Re-export commonly used items for convenience
pub use industry_row::{IndustryRow, InvalidRow, PerfValue, RowTable};
pub use rank_engine::{MatchKind, RankError, compute_ranks, find_industry_row};
pub use rank_result::{QueryResult, RankResult};
pub use ticker::Ticker;
pub use timeframe::{Timeframe, TimeframeMap};
