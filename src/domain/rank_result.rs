//! Ranking outcomes

use serde::Serialize;

use super::timeframe::{Timeframe, TimeframeMap};

/// Per-timeframe rank (1 = best) and value of one industry, out of `total` rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankResult {
    pub ranks: TimeframeMap<Option<u32>>,
    pub values: TimeframeMap<Option<f64>>,
    /// Length of the whole row table, not of the rows with data
    pub total: usize,
}

impl RankResult {
    pub fn rank(&self, timeframe: Timeframe) -> Option<u32> {
        self.ranks[timeframe]
    }

    pub fn value(&self, timeframe: Timeframe) -> Option<f64> {
        self.values[timeframe]
    }
}

/// Successful query: the resolved industry and its ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub industry: String,
    pub ranks: TimeframeMap<Option<u32>>,
    pub values: TimeframeMap<Option<f64>>,
    pub total: usize,
}

impl QueryResult {
    pub fn new(industry: impl Into<String>, result: RankResult) -> Self {
        Self {
            industry: industry.into(),
            ranks: result.ranks,
            values: result.values,
            total: result.total,
        }
    }
}
