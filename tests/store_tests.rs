// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetit::models::{sample_categories, Category};
use budgetit::store::{Categories, PredictionCache, Store, Transactions};
use tempfile::tempdir;

#[test]
fn get_returns_default_when_bucket_absent() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    assert!(store.get::<Transactions>().is_empty());
    assert!(store.get::<PredictionCache>().is_none());
    assert!(!store.has::<Transactions>());
}

#[test]
fn set_then_get_round_trips() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let categories = sample_categories();
    store.set::<Categories>(&categories).unwrap();

    assert!(store.has::<Categories>());
    let loaded: Vec<Category> = store.get::<Categories>();
    assert_eq!(loaded.len(), categories.len());
    assert_eq!(loaded[0].name, "Food");
}

#[test]
fn corrupt_bucket_reads_as_default() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    std::fs::write(store.path_for("categories"), "{not json!").unwrap();
    assert!(store.get::<Categories>().is_empty());
}

#[test]
fn wrong_shape_reads_as_default() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    // Valid JSON, wrong schema for the bucket
    std::fs::write(store.path_for("categories"), r#"{"a": 1}"#).unwrap();
    assert!(store.get::<Categories>().is_empty());
}

#[test]
fn remove_deletes_the_bucket() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.set::<Categories>(&sample_categories()).unwrap();
    assert!(store.has::<Categories>());
    store.remove::<Categories>().unwrap();
    assert!(!store.has::<Categories>());
    assert!(store.get::<Categories>().is_empty());
}
