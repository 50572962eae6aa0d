// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use anyhow::{bail, Result};
use chrono::Utc;
use serde_json::json;

/// Schema version stamped into backup envelopes.
pub const BACKUP_VERSION: &str = "1.0.0";

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("backup", sub)) => backup(store, sub),
        Some(("csv", sub)) => csv_bucket(store, sub),
        _ => Ok(()),
    }
}

/// Write every data bucket into one versioned JSON envelope.
fn backup(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap();
    let mut data = serde_json::Map::new();
    for bucket in Store::BACKUP_BUCKETS {
        if let Some(value) = store.raw(bucket) {
            data.insert(bucket.to_string(), value);
        }
    }
    let envelope = json!({
        "version": BACKUP_VERSION,
        "timestamp": Utc::now().to_rfc3339(),
        "data": data,
    });
    std::fs::write(out, serde_json::to_string_pretty(&envelope)?)?;
    println!("Exported backup to {}", out);
    Ok(())
}

/// Write one bucket as CSV, deriving the header from the first record.
fn csv_bucket(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let bucket = sub.get_one::<String>("bucket").unwrap();
    let out = sub.get_one::<String>("out").unwrap();

    let value = store.raw(bucket).unwrap_or_else(|| json!([]));
    let Some(rows) = value.as_array() else {
        bail!("Bucket '{}' is not a record list", bucket);
    };

    let mut wtr = csv::Writer::from_path(out)?;
    let headers: Vec<String> = rows
        .first()
        .and_then(|r| r.as_object())
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default();
    if !headers.is_empty() {
        wtr.write_record(&headers)?;
        for row in rows {
            let record: Vec<String> = headers
                .iter()
                .map(|h| match row.get(h) {
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(serde_json::Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                })
                .collect();
            wtr.write_record(&record)?;
        }
    }
    wtr.flush()?;
    println!("Exported {} to {}", bucket, out);
    Ok(())
}
