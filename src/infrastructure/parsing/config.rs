//! Parsing configuration for page extraction
//!
//! Centralized regex patterns for the quote and groups pages. They live in
//! configuration so an upstream markup change can be patched without a rebuild.

use serde::{Deserialize, Serialize};

/// Main parsing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ParsingConfig {
    /// Quote page industry patterns
    pub resolver: ResolverPatterns,

    /// Groups page row array patterns
    pub row_table: RowTablePatterns,
}

/// Patterns tried, in order, against the quote page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverPatterns {
    /// `Industry` label cell followed by its value cell; group 1 is the value cell body
    pub industry_row: String,

    /// Link inside the value cell; group 1 is its text
    pub cell_link: String,

    /// Screener link filtered by industry (`f=ind_...`); group 1 is its text
    pub screener_link: String,

    /// Industry groups link; group 1 is its text
    pub groups_link: String,
}

impl Default for ResolverPatterns {
    fn default() -> Self {
        Self {
            industry_row: r"(?is)>\s*Industry\s*</td>\s*<td[^>]*>(.*?)</td>".to_string(),
            cell_link: r"(?is)<a[^>]*>([^<]+)</a>".to_string(),
            screener_link: r#"(?i)screener\.ashx\?v=\d+&(?:amp;)?f=ind_[^"']+["'][^>]*>\s*([^<]+)\s*</a>"#
                .to_string(),
            groups_link: r#"(?i)groups\.ashx\?g=industry[^"']*["'][^>]*>\s*([^<]+)\s*</a>"#.to_string(),
        }
    }
}

/// Patterns locating and repairing the embedded row array on the groups page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowTablePatterns {
    /// Assignments of the array literal, tried in order; group 1 is the literal
    pub assignments: Vec<String>,

    /// Trailing comma before a closing bracket; group 1 is kept on repair
    pub trailing_comma: String,
}

impl Default for RowTablePatterns {
    fn default() -> Self {
        Self {
            assignments: vec![
                r"(?is)\bvar\s+rows\s*=\s*(\[.*?\]);".to_string(),
                r"(?is)\brows\s*=\s*(\[.*?\]);\s*\n".to_string(),
            ],
            trailing_comma: r",(\s*\])".to_string(),
        }
    }
}
