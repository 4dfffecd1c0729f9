//! Toolkit-independent table layout: maps filtered records to row and cell
//! descriptors that any renderer (terminal, egui grid) can draw.

use crate::models::Record;

/// Fixed header row of the ranking table.
pub const HEADERS: [&str; 6] = ["Pays", "Region", "Rang", "Documents", "Citations", "H-index"];

/// Rendered text shown for a numeric field that failed coercion.
pub const MISSING: &str = "NA";

/// One table cell. `numeric` drives alignment only (numbers right, text
/// left); it carries no other meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub numeric: bool,
}

impl Cell {
    /// A cell is numeric iff its rendered text parses as an integer, so a
    /// missing value (`NA`) and every country/region name classify as text.
    pub fn new(text: String) -> Self {
        let numeric = text.trim().parse::<i64>().is_ok();
        Self { text, numeric }
    }
}

fn fmt_opt<T: ToString>(v: Option<T>) -> String {
    match v {
        Some(x) => x.to_string(),
        None => MISSING.to_string(),
    }
}

/// One table row in display order. `visible` is the single source of truth
/// for hiding rows past the selected size; renderers must not second-guess it.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: [Cell; 6],
    pub visible: bool,
}

/// Lay out `records` (already filtered, already flop-reversed) as table rows.
/// Rows at 1-based position > `size` are emitted with `visible == false`;
/// this happens whenever the year filter is unset and several years each
/// contribute their own top ranks.
pub fn layout(records: &[&Record], size: u32) -> Vec<Row> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| Row {
            cells: [
                Cell::new(r.country.clone()),
                Cell::new(r.region.clone()),
                Cell::new(fmt_opt(r.rank)),
                Cell::new(fmt_opt(r.documents)),
                Cell::new(fmt_opt(r.citations)),
                Cell::new(fmt_opt(r.h_index)),
            ],
            visible: (i as u32) < size,
        })
        .collect()
}
