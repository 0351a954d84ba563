//! Page parsing infrastructure
//!
//! Regex-driven extraction over the two upstream pages: the quote page
//! (industry label) and the industry groups page (embedded row array).

pub mod config;
pub mod industry_resolver;
pub mod row_table_parser;

// Re-export public types
pub use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};
pub use config::{ParsingConfig, ResolverPatterns, RowTablePatterns};
pub use industry_resolver::{IndustryResolver, ResolutionStrategy};
pub use row_table_parser::RowTableParser;

/// Generic page parser
pub trait HtmlParser {
    type Output;

    /// Parse a full page body
    fn parse(&self, html: &str) -> ParsingResult<Self::Output>;
}
