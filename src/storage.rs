use crate::models::Record;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save records as CSV using the feed's own header row, so an exported file
/// parses back through `feed::parse_csv`.
pub fn save_csv<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((
        "Year",
        "Rank",
        "Region",
        "Country",
        "Documents",
        "Citations",
        "H index",
    ))?;
    for r in records {
        wtr.serialize((
            r.year,
            r.rank,
            &r.region,
            &r.country,
            r.documents,
            r.citations,
            r.h_index,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save records as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
