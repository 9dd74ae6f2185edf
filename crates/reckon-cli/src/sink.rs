//! Per-product CSV persistence.
//!
//! Products are keyed by sanitized description. Two policies cover the two
//! callers: append-with-skip for incremental daily updates, and a full
//! rewrite with date+price dedup for bulk rebuilds.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use tracing::debug;

use reckon_core::PriceRecord;

const CSV_HEADER: [&str; 3] = ["Date", "Product", "Price"];

/// Turn a product description into a stable CSV file name.
pub fn sanitize_product_filename(description: &str) -> String {
    description
        .replace('/', "-")
        .replace(['"', ',', ':'], "")
        .replace(' ', "_")
        .replace('%', "percent")
}

fn product_path(csv_dir: &Path, description: &str) -> PathBuf {
    csv_dir.join(format!("{}.csv", sanitize_product_filename(description)))
}

/// Append one record to its product file, skipping when the file already
/// holds a row for the record's date.
///
/// Returns `true` when the record was written.
pub fn append_record(csv_dir: &Path, record: &PriceRecord) -> anyhow::Result<bool> {
    fs::create_dir_all(csv_dir)?;
    let path = product_path(csv_dir, &record.description);

    let date = record.effective_date.to_string();
    if path.exists() && date_exists(&path, &date)? {
        debug!("skipping {}: {} already present", path.display(), date);
        return Ok(false);
    }

    let is_new = !path.exists();
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut wtr = csv::Writer::from_writer(file);
    if is_new {
        wtr.write_record(CSV_HEADER)?;
    }
    wtr.write_record([
        date.as_str(),
        record.description.as_str(),
        &record.price.to_string(),
    ])?;
    wtr.flush()?;

    Ok(true)
}

fn date_exists(path: &Path, date: &str) -> anyhow::Result<bool> {
    let mut rdr =
        csv::Reader::from_path(path).with_context(|| format!("reading {}", path.display()))?;
    for row in rdr.records() {
        let row = row?;
        if row.get(0) == Some(date) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Rewrite one product's full table: dedupe by (date, price), sort by date,
/// write header plus rows.
pub fn write_product_table(
    csv_dir: &Path,
    description: &str,
    points: &[PriceRecord],
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(csv_dir)?;
    let path = product_path(csv_dir, description);

    let mut unique: HashMap<(NaiveDate, u64), &PriceRecord> = HashMap::new();
    for point in points {
        unique
            .entry((point.effective_date, point.price))
            .or_insert(point);
    }

    let mut rows: Vec<&PriceRecord> = unique.into_values().collect();
    rows.sort_by_key(|r| r.effective_date);

    let mut wtr =
        csv::Writer::from_path(&path).with_context(|| format!("writing {}", path.display()))?;
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.effective_date.to_string().as_str(),
            row.description.as_str(),
            &row.price.to_string(),
        ])?;
    }
    wtr.flush()?;

    Ok(path)
}
