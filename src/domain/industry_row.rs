//! Per-industry performance rows parsed from the groups page

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::timeframe::{Timeframe, TimeframeMap};
use crate::utils::to_number;

/// Raw performance value as it appears in the embedded row literal
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PerfValue {
    Number(f64),
    Text(String),
    Other(Value),
}

impl PerfValue {
    /// Finite numeric value, if any
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value).filter(|v| v.is_finite()),
            Self::Text(text) => to_number(text),
            Self::Other(_) => None,
        }
    }
}

impl From<f64> for PerfValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PerfValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One element of the upstream array, read as a plain JSON object.
///
/// A repeated key keeps its last value and unknown fields are ignored.
type RawIndustryRow = Map<String, Value>;

/// Rejected row
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRow {
    #[error("industry row has no string label")]
    MissingLabel,

    #[error("industry row has a blank label")]
    BlankLabel,
}

/// One industry with its five raw performance fields
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawIndustryRow")]
pub struct IndustryRow {
    label: String,
    perf: TimeframeMap<Option<PerfValue>>,
}

impl TryFrom<RawIndustryRow> for IndustryRow {
    type Error = InvalidRow;

    fn try_from(mut raw: RawIndustryRow) -> Result<Self, Self::Error> {
        let label = match raw.remove("label") {
            Some(Value::String(label)) => label,
            _ => return Err(InvalidRow::MissingLabel),
        };
        let perf = TimeframeMap::from_fn(|timeframe| {
            raw.remove(timeframe.field_name()).and_then(perf_value)
        });
        Self::new(label, perf)
    }
}

/// `null` counts as absent; other non-numeric, non-string values are kept as-is
fn perf_value(value: Value) -> Option<PerfValue> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(PerfValue::Text(text)),
        Value::Number(number) => Some(
            number
                .as_f64()
                .map_or(PerfValue::Other(Value::Number(number)), PerfValue::Number),
        ),
        other => Some(PerfValue::Other(other)),
    }
}

impl IndustryRow {
    /// Create a row; the label must contain something other than whitespace
    pub fn new(
        label: impl Into<String>,
        perf: TimeframeMap<Option<PerfValue>>,
    ) -> Result<Self, InvalidRow> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(InvalidRow::BlankLabel);
        }
        Ok(Self { label, perf })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn raw(&self, timeframe: Timeframe) -> Option<&PerfValue> {
        self.perf[timeframe].as_ref()
    }

    /// Coerced value for one timeframe; `None` when absent or not finite
    pub fn value(&self, timeframe: Timeframe) -> Option<f64> {
        self.raw(timeframe).and_then(PerfValue::to_number)
    }

    /// Coerced values for every timeframe, keyed by display key
    pub fn values(&self) -> TimeframeMap<Option<f64>> {
        TimeframeMap::from_fn(|tf| self.value(tf))
    }
}

/// Ordered industry rows, in source order
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct RowTable {
    rows: Vec<IndustryRow>,
}

impl RowTable {
    pub fn new(rows: Vec<IndustryRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[IndustryRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndustryRow> {
        self.rows.iter()
    }
}

impl FromIterator<IndustryRow> for RowTable {
    fn from_iter<I: IntoIterator<Item = IndustryRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RowTable {
    type Item = &'a IndustryRow;
    type IntoIter = std::slice::Iter<'a, IndustryRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
