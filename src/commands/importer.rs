// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use anyhow::{bail, Context, Result};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let file = m.get_one::<String>("file").unwrap();
    let overwrite = m.get_flag("overwrite");

    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read backup file {}", file))?;
    let envelope: serde_json::Value =
        serde_json::from_str(&raw).context("Backup file is not valid JSON")?;

    if envelope.get("version").and_then(|v| v.as_str()).is_none() {
        bail!("Backup file has no version field");
    }
    let Some(data) = envelope.get("data").and_then(|d| d.as_object()) else {
        bail!("Backup file has no data section");
    };

    let mut imported = 0usize;
    let mut skipped = 0usize;
    for (bucket, value) in data {
        if !Store::BACKUP_BUCKETS.contains(&bucket.as_str()) {
            skipped += 1;
            continue;
        }
        // Without --overwrite only buckets with no existing file are filled.
        if !overwrite && store.raw(bucket).is_some() {
            skipped += 1;
            continue;
        }
        store.set_raw(bucket, value)?;
        imported += 1;
    }
    println!("Imported {} bucket(s), skipped {}", imported, skipped);
    Ok(())
}
