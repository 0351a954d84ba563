//! Row-table parser for the industry groups page
//!
//! The groups page embeds its data as a script assignment,
//! `var rows = [ {"label": ..., "perfT": ..., ...}, ... ];`. The literal is
//! located with the configured assignment patterns and parsed as JSON. A
//! malformed literal gets exactly one repair pass (a single trailing comma
//! before a closing bracket is removed); anything else is a hard failure.

use regex::Regex;
use tracing::{debug, warn};

use super::config::RowTablePatterns;
use super::{HtmlParser, ParsingError, ParsingResult};
use crate::domain::RowTable;

/// Parser extracting the per-industry performance rows
#[derive(Debug, Clone)]
pub struct RowTableParser {
    assignments: Vec<Regex>,
    trailing_comma: Regex,
}

impl RowTableParser {
    /// Create a parser with the default patterns
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&RowTablePatterns::default())
    }

    /// Create a parser with custom patterns
    pub fn with_config(patterns: &RowTablePatterns) -> ParsingResult<Self> {
        let assignments = patterns
            .assignments
            .iter()
            .enumerate()
            .map(|(i, pattern)| {
                Regex::new(pattern)
                    .map_err(|e| ParsingError::invalid_pattern(&format!("assignments[{i}]"), e))
            })
            .collect::<ParsingResult<Vec<_>>>()?;

        if assignments.is_empty() {
            return Err(ParsingError::invalid_pattern(
                "assignments",
                "at least one assignment pattern is required",
            ));
        }

        let trailing_comma = Regex::new(&patterns.trailing_comma)
            .map_err(|e| ParsingError::invalid_pattern("trailing_comma", e))?;

        Ok(Self {
            assignments,
            trailing_comma,
        })
    }

    /// Locate the embedded array literal, if any
    pub fn locate_literal<'a>(&self, html: &'a str) -> Option<&'a str> {
        self.assignments.iter().enumerate().find_map(|(i, pattern)| {
            let literal = pattern.captures(html)?.get(1)?.as_str();
            debug!("Row literal located by assignment pattern {} ({} bytes)", i, literal.len());
            Some(literal)
        })
    }

    /// Parse the groups page into its row table
    pub fn parse_rows(&self, html: &str) -> ParsingResult<RowTable> {
        let literal = self
            .locate_literal(html)
            .ok_or_else(|| ParsingError::rows_not_found(html.len()))?;

        self.parse_literal(literal)
    }

    /// Parse an array literal, with one trailing-comma repair on failure
    pub fn parse_literal(&self, literal: &str) -> ParsingResult<RowTable> {
        let first_error = match serde_json::from_str::<RowTable>(literal) {
            Ok(table) => return Ok(table),
            Err(e) => e,
        };

        let repaired = self.trailing_comma.replacen(literal, 1, "$1");
        if repaired == literal {
            return Err(ParsingError::rows_malformed(first_error, false));
        }

        warn!("Row literal failed to parse ({}), retrying without trailing comma", first_error);
        serde_json::from_str::<RowTable>(&repaired).map_err(|e| ParsingError::rows_malformed(e, true))
    }
}

impl HtmlParser for RowTableParser {
    type Output = RowTable;

    fn parse(&self, html: &str) -> ParsingResult<Self::Output> {
        self.parse_rows(html)
    }
}
