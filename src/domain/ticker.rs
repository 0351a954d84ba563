//! Ticker value object

use serde::Serialize;
use std::fmt;

/// Trimmed, uppercase, non-empty instrument identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ticker(String);

impl Ticker {
    /// Trim and uppercase `raw`; `None` when nothing is left
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let ticker = raw.trim().to_uppercase();
        if ticker.is_empty() {
            None
        } else {
            Some(Self(ticker))
        }
    }

    /// Reduce a chart symbol such as `NASDAQ:AAPL` or `NYSE-BRK.B` to its base ticker.
    ///
    /// Takes the right-most token after `:` and then after `-`, keeping only
    /// ASCII letters and `.`. Pair-style symbols (`FX:EURUSD`) come through
    /// unchanged and simply resolve to no industry later.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let after_colon = symbol.trim().rsplit(':').next().unwrap_or_default();
        let after_dash = after_colon.rsplit('-').next().unwrap_or_default();
        let base: String = after_dash
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || *c == '.')
            .collect();
        Self::parse(&base)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
