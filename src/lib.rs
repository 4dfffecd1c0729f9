//! scr-rs
//!
//! A lightweight Rust library for fetching, filtering, and visualizing
//! country research-output rankings (rank, documents, citations, H-index per
//! country and year). Pairs with the `scr` CLI and the `scr-gui` desktop app.
//!
//! ### Features
//! - Fetch the published ranking CSV feed into typed records
//! - Filter by result-set size, year, and region, with a "flop" reversal
//! - Lay out the filtered rows as a six-column table
//! - Render the latest year as a log-log documents/citations scatter
//! - Save any record set as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use scr_rs::{Client, Selection};
//!
//! let client = Client::default();
//! let records = client.fetch()?;
//! let top = scr_rs::filter::filter(&records, &Selection::default());
//! let rows = scr_rs::table::layout(&top, 3);
//! scr_rs::scatter::plot_scatter(&records, "scatter.svg", 1000, 600)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod feed;
pub mod filter;
pub mod models;
pub mod scatter;
pub mod storage;
pub mod table;

pub use feed::Client;
pub use models::{REGION_WILDCARD, Record, SIZE_CHOICES, Selection};
