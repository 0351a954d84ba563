//! Plain-text rendering of query responses
//!
//! Ranks print as `#12 / 145` (or `—` without a rank) and values as signed
//! percentages with two decimals (`+1.23%`, `-0.50%`), empty when missing.

use std::fmt::Write as _;

use crate::application::dto::{ErrorResponseDto, IndustryRankResponse};
use crate::domain::{QueryResult, Timeframe};

const NO_RANK: &str = "—";

pub fn format_rank(rank: Option<u32>, total: usize) -> String {
    rank.map_or_else(|| NO_RANK.to_string(), |rank| format!("#{rank} / {total}"))
}

pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("+{v:.2}%"),
        Some(v) => format!("{v:.2}%"),
        None => String::new(),
    }
}

/// Header line followed by one line per timeframe
pub fn render_result(symbol: &str, result: &QueryResult) -> String {
    let mut out = format!("{symbol} · {}\n", result.industry);
    for timeframe in Timeframe::ALL {
        let rank = format_rank(result.ranks[timeframe], result.total);
        let value = format_value(result.values[timeframe]);
        let _ = writeln!(out, "{:<3} {:>11}  {}", timeframe.key(), rank, value);
    }
    // No trailing padding when the value column is empty
    out.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_failure(symbol: &str, failure: &ErrorResponseDto) -> String {
    let code = failure.error;
    match &failure.detail {
        Some(detail) => format!("{symbol} · no data ({code}): {detail}"),
        None => format!("{symbol} · no data ({code})"),
    }
}

pub fn render_response(symbol: &str, response: &IndustryRankResponse) -> String {
    match response {
        IndustryRankResponse::Success(success) => render_result(symbol, &success.result),
        IndustryRankResponse::Failure(failure) => render_failure(symbol, failure),
    }
}
