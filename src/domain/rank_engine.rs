//! Industry matching and per-timeframe ranking
//!
//! The target row is located once: an exact normalized label match wins,
//! otherwise the first row whose normalized label contains the target (or is
//! contained by it). For every timeframe the rows with a finite value are
//! ordered by value, highest first, ties kept in table order, and the target's
//! 1-based position in that order is its rank.

use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

use super::industry_row::RowTable;
use super::rank_result::RankResult;
use super::timeframe::TimeframeMap;
use crate::utils::normalize;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    #[error("No row matches industry '{industry}' among {total} rows")]
    IndustryRowNotFound { industry: String, total: usize },
}

/// How the target row was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Loose,
}

/// Index of the row matching `target`, and how it matched
pub fn find_industry_row(table: &RowTable, target: &str) -> Option<(usize, MatchKind)> {
    let target = normalize(target);
    if target.is_empty() {
        return None;
    }

    let labels: Vec<String> = table.iter().map(|row| normalize(row.label())).collect();

    if let Some(index) = labels.iter().position(|label| *label == target) {
        return Some((index, MatchKind::Exact));
    }

    labels
        .iter()
        .position(|label| label.contains(target.as_str()) || target.contains(label.as_str()))
        .map(|index| (index, MatchKind::Loose))
}

/// Rank the row matching `target` against every row of `table`
pub fn compute_ranks(table: &RowTable, target: &str) -> Result<RankResult, RankError> {
    let not_found = || RankError::IndustryRowNotFound {
        industry: target.to_string(),
        total: table.len(),
    };

    let (target_index, kind) = find_industry_row(table, target).ok_or_else(not_found)?;
    let result = rank_row(table, target_index).ok_or_else(not_found)?;

    debug!(
        "Matched industry '{}' to row {} ({:?})",
        target, target_index, kind
    );
    Ok(result)
}

/// Rank the row at `target_index`; `None` when the index is past the table
pub fn rank_row(table: &RowTable, target_index: usize) -> Option<RankResult> {
    let values = table.rows().get(target_index)?.values();

    let ranks = TimeframeMap::from_fn(|timeframe| {
        values[timeframe]?;

        let mut ranked: Vec<(usize, f64)> = table
            .iter()
            .enumerate()
            .filter_map(|(index, row)| row.value(timeframe).map(|value| (index, value)))
            .collect();
        // Vec::sort_by is stable: equal values keep table order
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        ranked
            .iter()
            .position(|(index, _)| *index == target_index)
            .and_then(|position| u32::try_from(position + 1).ok())
    });

    Some(RankResult {
        ranks,
        values,
        total: table.len(),
    })
}
