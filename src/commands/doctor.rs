// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{Accounts, Budgets, Categories, Currencies, Store, Transactions};
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle(store: &Store) -> Result<()> {
    let mut rows = Vec::new();

    let categories = store.get::<Categories>();
    let accounts = store.get::<Accounts>();
    let transactions = store.get::<Transactions>();
    let budgets = store.get::<Budgets>();
    let currencies = store.get::<Currencies>();

    // 1) Currency invariant: exactly one primary, pinned at rate 1
    let primaries: Vec<_> = currencies.iter().filter(|c| c.is_primary).collect();
    if primaries.len() != 1 {
        rows.push(vec![
            "primary_currency_count".into(),
            primaries.len().to_string(),
        ]);
    }
    for p in &primaries {
        if p.exchange_rate != Decimal::ONE {
            rows.push(vec![
                "primary_rate_not_one".into(),
                format!("{} {}", p.code, p.exchange_rate),
            ]);
        }
    }

    // 2) Dangling references
    for t in &transactions {
        if !categories.iter().any(|c| c.id == t.category_id) {
            rows.push(vec![
                "txn_unknown_category".into(),
                format!("tx {} -> category {}", t.id, t.category_id),
            ]);
        }
        if !accounts.iter().any(|a| a.id == t.account_id) {
            rows.push(vec![
                "txn_unknown_account".into(),
                format!("tx {} -> account {}", t.id, t.account_id),
            ]);
        }
    }
    for b in &budgets {
        if !categories.iter().any(|c| c.id == b.category_id) {
            rows.push(vec![
                "budget_unknown_category".into(),
                format!("budget {} -> category {}", b.id, b.category_id),
            ]);
        }
    }

    // 3) Amounts must be positive; the kind carries the sign
    for t in &transactions {
        if t.amount.is_sign_negative() {
            rows.push(vec![
                "negative_amount".into(),
                format!("tx {} amount {}", t.id, t.amount),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
