//! Industry resolver for quote pages
//!
//! Extracts the industry label from loosely structured quote page markup
//! using an ordered list of strategies. The order is a priority policy: the
//! labelled table cell is the most specific signal, then screener links
//! filtered by industry, then industry group links. The first strategy that
//! yields non-empty text wins and later ones are not consulted.

use regex::Regex;
use tracing::debug;

use super::config::ResolverPatterns;
use super::{HtmlParser, ParsingError, ParsingResult};
use crate::utils::{decode_html_entities, strip_tags, text_cleanup};

/// Which extraction strategy produced the industry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    IndustryRow,
    ScreenerLink,
    GroupsLink,
}

/// Parser resolving a quote page to its industry label
#[derive(Debug, Clone)]
pub struct IndustryResolver {
    industry_row: Regex,
    cell_link: Regex,
    screener_link: Regex,
    groups_link: Regex,
}

impl IndustryResolver {
    /// Create a resolver with the default patterns
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ResolverPatterns::default())
    }

    /// Create a resolver with custom patterns
    pub fn with_config(patterns: &ResolverPatterns) -> ParsingResult<Self> {
        Ok(Self {
            industry_row: compile("industry_row", &patterns.industry_row)?,
            cell_link: compile("cell_link", &patterns.cell_link)?,
            screener_link: compile("screener_link", &patterns.screener_link)?,
            groups_link: compile("groups_link", &patterns.groups_link)?,
        })
    }

    /// Industry label of the quote page, or `None` for instruments without one
    pub fn resolve(&self, html: &str) -> Option<String> {
        self.resolve_with_strategy(html).map(|(_, industry)| industry)
    }

    /// Like [`resolve`](Self::resolve), also reporting which strategy matched
    pub fn resolve_with_strategy(&self, html: &str) -> Option<(ResolutionStrategy, String)> {
        let strategies = [
            ResolutionStrategy::IndustryRow,
            ResolutionStrategy::ScreenerLink,
            ResolutionStrategy::GroupsLink,
        ];

        strategies.into_iter().find_map(|strategy| {
            let candidate = match strategy {
                ResolutionStrategy::IndustryRow => self.from_industry_row(html),
                ResolutionStrategy::ScreenerLink => capture_text(&self.screener_link, html),
                ResolutionStrategy::GroupsLink => capture_text(&self.groups_link, html),
            }?;

            let cleaned = text_cleanup(&candidate);
            if cleaned.is_empty() {
                debug!("{:?} matched but produced no text", strategy);
                return None;
            }

            let industry = decode_html_entities(&cleaned);
            debug!("Resolved industry '{}' via {:?}", industry, strategy);
            Some((strategy, industry))
        })
    }

    /// Value cell next to the `Industry` label: link text if present, else all text
    fn from_industry_row(&self, html: &str) -> Option<String> {
        let cell = capture_text(&self.industry_row, html)?;
        let link_text = capture_text(&self.cell_link, &cell).filter(|text| !text.trim().is_empty());
        Some(link_text.unwrap_or_else(|| strip_tags(&cell)))
    }
}

impl HtmlParser for IndustryResolver {
    type Output = Option<String>;

    fn parse(&self, html: &str) -> ParsingResult<Self::Output> {
        Ok(self.resolve(html))
    }
}

fn compile(name: &str, pattern: &str) -> ParsingResult<Regex> {
    Regex::new(pattern).map_err(|e| ParsingError::invalid_pattern(name, e))
}

fn capture_text(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> IndustryResolver {
        IndustryResolver::new().unwrap()
    }

    #[test]
    fn test_industry_row_with_link() {
        let html = r#"<tr><td class="snapshot-td2">Industry</td><td><a href="screener.ashx?v=111&f=ind_semiconductors">Semiconductors</a></td></tr>"#;

        assert_eq!(
            resolver().resolve_with_strategy(html),
            Some((ResolutionStrategy::IndustryRow, "Semiconductors".to_string()))
        );
    }

    #[test]
    fn test_industry_row_across_lines_without_link() {
        let html = "<table>\n<tr>\n  <td width=\"7%\">\n    Industry\n  </td>\n  <td class=\"x\" align=\"left\">\n    <b>Oil &amp; Gas\n E&amp;P</b>\n  </td>\n</tr></table>";

        assert_eq!(resolver().resolve(html), Some("Oil & Gas E&P".to_string()));
    }

    #[test]
    fn test_industry_label_is_case_insensitive() {
        let html = "<TD>INDUSTRY</TD><TD><A HREF='x'>Banks - Regional</A></TD>";

        assert_eq!(resolver().resolve(html), Some("Banks - Regional".to_string()));
    }

    #[test]
    fn test_screener_link_fallback() {
        let html = r#"<div class="quote-links">
            <a class="tab-link" href="screener.ashx?v=111&amp;f=sec_technology">Technology</a> |
            <a href="screener.ashx?v=111&amp;f=ind_softwareinfrastructure" class="tab-link">
                Software - Infrastructure
            </a></div>"#;

        assert_eq!(
            resolver().resolve_with_strategy(html),
            Some((ResolutionStrategy::ScreenerLink, "Software - Infrastructure".to_string()))
        );
    }

    #[test]
    fn test_groups_link_fallback() {
        let html = r#"<a href='groups.ashx?g=industry&o=name' class="tab-link">Consumer Electronics</a>"#;

        assert_eq!(
            resolver().resolve_with_strategy(html),
            Some((ResolutionStrategy::GroupsLink, "Consumer Electronics".to_string()))
        );
    }

    #[test]
    fn test_industry_row_wins_over_links() {
        let html = r#"<a href="screener.ashx?v=111&f=ind_banks">Banks</a>
            <td>Industry</td><td>Insurance - Life</td>"#;

        assert_eq!(
            resolver().resolve_with_strategy(html),
            Some((ResolutionStrategy::IndustryRow, "Insurance - Life".to_string()))
        );
    }

    #[test]
    fn test_empty_cell_falls_through_to_next_strategy() {
        let html = r#"<td>Industry</td><td> <span></span> </td>
            <a href="groups.ashx?g=industry">Airlines</a>"#;

        assert_eq!(
            resolver().resolve_with_strategy(html),
            Some((ResolutionStrategy::GroupsLink, "Airlines".to_string()))
        );
    }

    #[test]
    fn test_no_industry_for_etf_page() {
        let html = r#"<table><tr><td>Category</td><td>ETF</td></tr></table>
            <a href="screener.ashx?v=111&f=sec_financial">Financial</a>"#;

        assert_eq!(resolver().resolve(html), None);
        assert_eq!(resolver().parse(html), Ok(None));
    }

    #[test]
    fn test_sector_label_is_not_industry() {
        let html = "<td>Sector Industry</td><td>Nope</td>";

        assert_eq!(resolver().resolve(html), None);
    }

    #[test]
    fn test_invalid_custom_pattern_is_reported() {
        let patterns = ResolverPatterns {
            groups_link: "(unclosed".to_string(),
            ..ResolverPatterns::default()
        };

        let err = IndustryResolver::with_config(&patterns).unwrap_err();
        assert!(matches!(err, ParsingError::InvalidPattern { ref name, .. } if name == "groups_link"));
    }
}
