//! Blocking client for the country-ranking CSV feed.
//!
//! The feed is a single published spreadsheet with header columns
//! `Year, Rank, Region, Country, Documents, Citations, H index`. Rows arrive
//! pre-sorted by ascending rank within each year; this module preserves that
//! order and never re-sorts.
//!
//! Typical usage:
//! ```no_run
//! # use scr_rs::Client;
//! let client = Client::default();
//! let records = client.fetch()?;
//! # Ok::<(), scr_rs::feed::FeedError>(())
//! ```

use crate::models::{RawRecord, Record};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::io::Read;
use std::time::Duration;
use thiserror::Error;

/// Published CSV endpoint for the ranking data. There is no runtime
/// configuration for this; the feed location is part of the program.
pub const FEED_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vShuV7YDfFvbcOcpku7BKY0_sN6i3SaVbva9ebY9wzgOEHNS6rb8mX21eeRNnHGQj5ns64_EY2CpJtc/pub?gid=1902854758&single=true&output=csv";

/// Sleeps between retried attempts; the attempt after the last sleep is final.
const BACKOFF_MS: [u64; 2] = [100, 300];

/// Failure while downloading or decoding the feed. Fatal to initialization:
/// callers surface it as a visible error state instead of rendering.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed with HTTP {0}")]
    Status(StatusCode),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    pub feed_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("scr_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            feed_url: FEED_URL.into(),
            http,
        }
    }
}

impl Client {
    /// Download and parse the full record set, in feed order.
    ///
    /// Transient failures (5xx, network errors) are retried with a short
    /// backoff. Per-field numeric coercion failures are *not* errors; see
    /// [`parse_csv`].
    pub fn fetch(&self) -> Result<Vec<Record>, FeedError> {
        let body = self.get_with_retry(&self.feed_url)?;
        let records = parse_csv(body.as_bytes())?;
        log::info!("fetched {} records from feed", records.len());
        Ok(records)
    }

    fn get_with_retry(&self, url: &str) -> Result<String, FeedError> {
        for backoff_ms in BACKOFF_MS {
            match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => return r.text().map_err(FeedError::Network),
                Ok(r) if r.status().is_server_error() => {
                    log::warn!("feed returned HTTP {}, retrying", r.status());
                }
                Ok(r) => return Err(FeedError::Status(r.status())),
                Err(e) => log::warn!("feed request failed ({e}), retrying"),
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        match self.http.get(url).send() {
            Ok(r) if r.status().is_success() => r.text().map_err(FeedError::Network),
            Ok(r) => Err(FeedError::Status(r.status())),
            Err(e) => Err(FeedError::Network(e)),
        }
    }
}

/// Parse feed CSV from any reader into records, preserving row order.
///
/// The header row must carry the exact feed column names. `Region` and
/// `Country` pass through unmodified; the five numeric columns coerce to
/// integers, with non-numeric values becoming `None` rather than failing the
/// row or the parse.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Record>, FeedError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut out = Vec::new();
    for row in rdr.deserialize::<RawRecord>() {
        out.push(Record::from(row?));
    }
    Ok(out)
}
