// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{sample_categories, sample_currencies};
use crate::store::{Categories, Currencies, Store};

/// Seed empty buckets with the stock categories and currency pair so a
/// fresh install has something to work with. Existing data is left alone.
pub fn handle(store: &Store) -> Result<()> {
    if store.get::<Categories>().is_empty() {
        store.set::<Categories>(&sample_categories())?;
        println!("Seeded default categories");
    }
    if store.get::<Currencies>().is_empty() {
        store.set::<Currencies>(&sample_currencies())?;
        println!("Seeded default currencies (ARS primary, USD)");
    }
    Ok(())
}
