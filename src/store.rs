// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::analytics::PredictionData;
use crate::models::{Account, Budget, Category, Currency, Transaction};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Budgetit", "budgetit"));

/// A named storage bucket with a fixed value schema. Tying the schema to
/// the bucket name keeps deserialization failures at the store boundary
/// instead of surfacing inside the analytics engine.
pub trait Bucket {
    const NAME: &'static str;
    type Value: Serialize + DeserializeOwned + Default;
}

pub struct Transactions;
impl Bucket for Transactions {
    const NAME: &'static str = "transactions";
    type Value = Vec<Transaction>;
}

pub struct Categories;
impl Bucket for Categories {
    const NAME: &'static str = "categories";
    type Value = Vec<Category>;
}

pub struct Budgets;
impl Bucket for Budgets {
    const NAME: &'static str = "budgets";
    type Value = Vec<Budget>;
}

pub struct Accounts;
impl Bucket for Accounts {
    const NAME: &'static str = "accounts";
    type Value = Vec<Account>;
}

pub struct Currencies;
impl Bucket for Currencies {
    const NAME: &'static str = "currencies";
    type Value = Vec<Currency>;
}

pub struct PredictionCache;
impl Bucket for PredictionCache {
    const NAME: &'static str = "prediction-cache";
    type Value = Option<PredictionData>;
}

/// Exchange rates fetched from the network, with the fetch timestamp so
/// callers can apply the 6-hour reuse window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedRates {
    pub base: String,
    pub rates: HashMap<String, f64>,
    pub fetched_at: DateTime<Utc>,
}

pub struct RateCache;
impl Bucket for RateCache {
    const NAME: &'static str = "exchange-rates";
    type Value = Option<CachedRates>;
}

/// File-per-bucket JSON store. Reads are total: a missing or corrupt
/// bucket file yields the bucket's default value.
pub struct Store {
    dir: PathBuf,
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

impl Store {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(data_dir()?)
    }

    pub fn path_for(&self, bucket: &str) -> PathBuf {
        self.dir.join(format!("{}.json", bucket))
    }

    pub fn get<B: Bucket>(&self) -> B::Value {
        match fs::read_to_string(self.path_for(B::NAME)) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => B::Value::default(),
        }
    }

    pub fn set<B: Bucket>(&self, value: &B::Value) -> Result<()> {
        let path = self.path_for(B::NAME);
        let raw = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize bucket '{}'", B::NAME))?;
        // Write-then-rename so a crash mid-write never corrupts the bucket.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, raw).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }

    pub fn remove<B: Bucket>(&self) -> Result<()> {
        let path = self.path_for(B::NAME);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }

    pub fn has<B: Bucket>(&self) -> bool {
        self.path_for(B::NAME).exists()
    }

    /// Bucket names that participate in backup export/import.
    pub const BACKUP_BUCKETS: [&'static str; 5] = [
        Transactions::NAME,
        Categories::NAME,
        Budgets::NAME,
        Accounts::NAME,
        Currencies::NAME,
    ];

    /// Raw JSON value of a bucket by name, for backup export.
    pub fn raw(&self, bucket: &str) -> Option<serde_json::Value> {
        let raw = fs::read_to_string(self.path_for(bucket)).ok()?;
        serde_json::from_str(&raw).ok()
    }

    /// Overwrite a bucket from a raw JSON value, for backup import.
    pub fn set_raw(&self, bucket: &str, value: &serde_json::Value) -> Result<()> {
        let path = self.path_for(bucket);
        let raw = serde_json::to_string_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, raw).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}
