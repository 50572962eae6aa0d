// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, BudgetPeriod};
use crate::store::{Budgets, Categories, Store};
use crate::utils::{id_for_category, maybe_print_json, next_id, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let period: BudgetPeriod = sub.get_one::<String>("period").unwrap().parse()?;
    let start_date = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let category_id = id_for_category(&store.get::<Categories>(), category)?;

    let mut budgets = store.get::<Budgets>();
    // One budget per category and period; setting again replaces it.
    match budgets
        .iter_mut()
        .find(|b| b.category_id == category_id && b.period == period)
    {
        Some(existing) => {
            existing.amount = amount;
            existing.start_date = start_date;
        }
        None => budgets.push(Budget {
            id: next_id(&budgets, |b| b.id),
            category_id,
            amount,
            period,
            current_spent: Decimal::ZERO,
            start_date,
            end_date: None,
        }),
    }
    store.set::<Budgets>(&budgets)?;
    println!("Budget set for {} ({}) = {}", category, period, amount);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let categories = store.get::<Categories>();
    let budgets = store.get::<Budgets>();

    if !maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        let data = budgets
            .iter()
            .map(|b| {
                vec![
                    crate::analytics::category_name(&categories, b.category_id),
                    b.period.to_string(),
                    b.amount.to_string(),
                    b.start_date.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Period", "Limit", "Since"], data)
        );
    }
    Ok(())
}
