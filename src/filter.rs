//! Selection filtering and dropdown option derivation.
//!
//! Filtering is a conjunction of three per-record predicates (year, region,
//! rank-within-size) plus an optional post-filter reversal ("flop"). The
//! output is always a subsequence of the input: relative order is preserved
//! and "top N" relies entirely on the feed's rank ordering.

use crate::models::{REGION_WILDCARD, Record, Selection};
use ahash::AHashSet;

/// Apply `sel` to `records`, keeping input order; reversed when `sel.flop`.
///
/// An unset year or region matches every record. A record whose year or rank
/// failed coercion can never satisfy the corresponding exact predicate, so it
/// drops out of any year- or size-bounded view.
pub fn filter<'a>(records: &'a [Record], sel: &Selection) -> Vec<&'a Record> {
    let mut out: Vec<&Record> = records.iter().filter(|r| matches(r, sel)).collect();
    if sel.flop {
        out.reverse();
    }
    out
}

fn matches(r: &Record, sel: &Selection) -> bool {
    year_matches(r, sel.year) && region_matches(r, sel.region.as_deref()) && rank_within(r, sel.size)
}

fn year_matches(r: &Record, year: Option<i32>) -> bool {
    match year {
        None => true,
        Some(y) => r.year == Some(y),
    }
}

fn region_matches(r: &Record, region: Option<&str>) -> bool {
    match region {
        None => true,
        Some(w) if w == REGION_WILDCARD => true,
        Some(name) => r.region == name,
    }
}

fn rank_within(r: &Record, size: u32) -> bool {
    r.rank.is_some_and(|rank| rank <= size)
}

/// Distinct years present in the data, in first-occurrence order. Rows whose
/// year failed coercion contribute no option (an uncoerced selection already
/// means "all years").
pub fn distinct_years(records: &[Record]) -> Vec<i32> {
    let mut seen = AHashSet::new();
    records
        .iter()
        .filter_map(|r| r.year)
        .filter(|y| seen.insert(*y))
        .collect()
}

/// Distinct regions in first-occurrence order, preceded by the wildcard
/// placeholder. The placeholder appears exactly once even if the data itself
/// contains it as a region name.
pub fn distinct_regions(records: &[Record]) -> Vec<String> {
    let mut seen: AHashSet<&str> = AHashSet::new();
    seen.insert(REGION_WILDCARD);
    let mut out = vec![REGION_WILDCARD.to_string()];
    for r in records {
        if seen.insert(&r.region) {
            out.push(r.region.clone());
        }
    }
    out
}
