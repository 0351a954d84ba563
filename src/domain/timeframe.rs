//! Performance windows tracked per industry
//!
//! Each timeframe has a display key (`1D`, `1W`, ...) used in every
//! outward-facing payload and a fixed upstream field name (`perfT`, ...)
//! used by the groups page row literal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the five fixed performance windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
}

impl Timeframe {
    /// All timeframes in display order
    pub const ALL: [Self; 5] = [
        Self::OneDay,
        Self::OneWeek,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
    ];

    /// Key used in responses and reports
    pub const fn key(self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::SixMonths => "6M",
        }
    }

    /// Field name carrying this timeframe in the groups page rows
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::OneDay => "perfT",
            Self::OneWeek => "perfW",
            Self::OneMonth => "perfM",
            Self::ThreeMonths => "perfQ",
            Self::SixMonths => "perfH",
        }
    }

    /// Reverse lookup from an upstream field name
    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tf| tf.field_name() == name)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fixed-size mapping from every timeframe to a value.
///
/// Serializes as a JSON object with the keys `1D, 1W, 1M, 3M, 6M` in that order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeframeMap<T> {
    slots: [T; 5],
}

impl<T> TimeframeMap<T> {
    /// Build a map by evaluating `f` once per timeframe, in display order
    pub fn from_fn(mut f: impl FnMut(Timeframe) -> T) -> Self {
        Self {
            slots: Timeframe::ALL.map(&mut f),
        }
    }

    pub fn get(&self, timeframe: Timeframe) -> &T {
        &self.slots[timeframe.index()]
    }

    /// Iterate `(timeframe, value)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Timeframe, &T)> {
        Timeframe::ALL.into_iter().zip(self.slots.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> TimeframeMap<U> {
        TimeframeMap::from_fn(|tf| f(self.get(tf)))
    }
}

impl<T> Index<Timeframe> for TimeframeMap<T> {
    type Output = T;

    fn index(&self, timeframe: Timeframe) -> &T {
        self.get(timeframe)
    }
}

impl<T> IndexMut<Timeframe> for TimeframeMap<T> {
    fn index_mut(&mut self, timeframe: Timeframe) -> &mut T {
        &mut self.slots[timeframe.index()]
    }
}

impl<T: Serialize> Serialize for TimeframeMap<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Timeframe::ALL.len()))?;
        for (timeframe, value) in self.iter() {
            map.serialize_entry(timeframe.key(), value)?;
        }
        map.end()
    }
}
