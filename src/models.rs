use serde::{Deserialize, Serialize};

/// Result-set sizes offered by the UI, in display order. The first entry is
/// the default selection.
pub const SIZE_CHOICES: [u32; 4] = [3, 5, 10, 20];

/// Placeholder shown as the first region option; selecting it disables the
/// region filter.
pub const REGION_WILDCARD: &str = "Select a specific region";

/// Raw CSV row as it appears in the feed. Every field arrives as text; the
/// header names (including the space in `H index`) must match exactly.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Rank")]
    pub rank: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Documents")]
    pub documents: String,
    #[serde(rename = "Citations")]
    pub citations: String,
    #[serde(rename = "H index")]
    pub h_index: String,
}

/// Tidy structure used by this crate (one row = one country-year).
///
/// Numeric fields that fail integer coercion become `None` and stay `None`
/// through filtering and rendering: a row without a rank never satisfies a
/// size bound, a row without a year only matches the unset year selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub year: Option<i32>,
    /// 1-based within its year, ascending = better. The feed is pre-sorted by
    /// rank within each year; nothing here re-sorts.
    pub rank: Option<u32>,
    pub region: String,
    pub country: String,
    pub documents: Option<u64>,
    pub citations: Option<u64>,
    pub h_index: Option<u64>,
}

fn coerce<T: std::str::FromStr>(s: &str) -> Option<T> {
    s.trim().parse::<T>().ok()
}

impl From<RawRecord> for Record {
    fn from(r: RawRecord) -> Self {
        Self {
            year: coerce(&r.year),
            rank: coerce(&r.rank),
            region: r.region,
            country: r.country,
            documents: coerce(&r.documents),
            citations: coerce(&r.citations),
            h_index: coerce(&r.h_index),
        }
    }
}

/// Current state of the four UI controls. Read fresh on every render; never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// One of [`SIZE_CHOICES`]. The filter itself places no bound on it.
    pub size: u32,
    /// `None` means "match all years".
    pub year: Option<i32>,
    /// `None` (or the literal [`REGION_WILDCARD`]) means "match all regions".
    pub region: Option<String>,
    /// When true the filtered sequence is reversed before slicing: the bottom
    /// of the top-N, not the true bottom N.
    pub flop: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            size: SIZE_CHOICES[0],
            year: None,
            region: None,
            flop: false,
        }
    }
}
