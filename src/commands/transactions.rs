// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TransactionKind};
use crate::store::{Accounts, Categories, Store, Transactions};
use crate::utils::{
    id_for_account, id_for_category, maybe_print_json, next_id, parse_date, parse_decimal,
    parse_month, pretty_table,
};
use anyhow::{bail, Result};
use serde::Serialize;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let kind = match sub.get_one::<String>("kind").unwrap().as_str() {
        "income" => TransactionKind::Income,
        _ => TransactionKind::Expense,
    };
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if amount.is_sign_negative() {
        bail!("Amounts are always positive; use --kind expense for outgoing money");
    }
    let category = sub.get_one::<String>("category").unwrap();
    let account = sub.get_one::<String>("account").unwrap();
    let note = sub.get_one::<String>("note").map(|s| s.to_string());
    let tags: Vec<String> = sub
        .get_many::<String>("tag")
        .map(|v| v.map(|s| s.to_string()).collect())
        .unwrap_or_default();

    let category_id = id_for_category(&store.get::<Categories>(), category)?;
    let account_id = id_for_account(&store.get::<Accounts>(), account)?;

    let mut transactions = store.get::<Transactions>();
    transactions.push(Transaction {
        id: next_id(&transactions, |t| t.id),
        kind,
        amount,
        date,
        category_id,
        account_id,
        description: note,
        tags: if tags.is_empty() { None } else { Some(tags) },
        is_recurring: sub.get_flag("recurring").then_some(true),
    });
    store.set::<Transactions>(&transactions)?;
    println!("Recorded {} {} on {} ({})", kind, amount, date, category);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub account: String,
    pub note: String,
}

pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let categories = store.get::<Categories>();
    let accounts = store.get::<Accounts>();
    let mut transactions = store.get::<Transactions>();
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };
    let category = sub.get_one::<String>("category");
    let kind = sub.get_one::<String>("kind");

    let mut data = Vec::new();
    for t in &transactions {
        if let Some(m) = &month {
            if t.date.format("%Y-%m").to_string() != *m {
                continue;
            }
        }
        let cat_name = categories
            .iter()
            .find(|c| c.id == t.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        if let Some(c) = category {
            if &cat_name != c {
                continue;
            }
        }
        if let Some(k) = kind {
            if t.kind.to_string() != *k {
                continue;
            }
        }
        data.push(TransactionRow {
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            amount: t.amount.to_string(),
            category: cat_name,
            account: accounts
                .iter()
                .find(|a| a.id == t.account_id)
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            note: t.description.clone().unwrap_or_default(),
        });
        if let Some(limit) = sub.get_one::<usize>("limit") {
            if data.len() >= *limit {
                break;
            }
        }
    }
    Ok(data)
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.account.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Kind", "Amount", "Category", "Account", "Note"],
                rows,
            )
        );
    }
    Ok(())
}
