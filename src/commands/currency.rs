// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::CurrencyBook;
use crate::models::Currency;
use crate::store::{CachedRates, RateCache, Store};
use crate::utils::{http_client, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => list(store)?,
        Some(("add", sub)) => add(store, sub)?,
        Some(("set-primary", sub)) => set_primary(store, sub)?,
        Some(("visible", sub)) => visible(store, sub)?,
        Some(("convert", sub)) => convert(store, sub)?,
        Some(("fetch", sub)) => fetch(store, sub.get_flag("force"))?,
        _ => {}
    }
    Ok(())
}

fn list(store: &Store) -> Result<()> {
    let book = CurrencyBook::load(store);
    let data = book
        .iter()
        .map(|c| {
            vec![
                c.code.clone(),
                c.name.clone(),
                c.symbol.clone(),
                c.exchange_rate.to_string(),
                if c.is_primary { "yes" } else { "" }.to_string(),
                if c.is_visible { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Code", "Name", "Symbol", "Rate", "Primary", "Visible"], data)
    );
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let code = sub.get_one::<String>("code").unwrap().to_uppercase();
    let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
    let mut book = CurrencyBook::load(store);
    book.upsert(Currency {
        code: code.clone(),
        name: sub.get_one::<String>("name").unwrap().clone(),
        symbol: sub.get_one::<String>("symbol").unwrap().clone(),
        exchange_rate: rate,
        is_primary: sub.get_flag("primary"),
        is_visible: !sub.get_flag("hidden"),
    })?;
    book.save(store)?;
    println!("Added currency {}", code);
    Ok(())
}

fn set_primary(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let code = sub.get_one::<String>("code").unwrap().to_uppercase();
    let mut book = CurrencyBook::load(store);
    book.set_primary_and_recalculate(&code)?;
    book.save(store)?;
    println!("Primary currency set to {}; all rates re-based", code);
    Ok(())
}

fn visible(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let codes: Vec<String> = sub
        .get_many::<String>("codes")
        .unwrap()
        .map(|s| s.to_uppercase())
        .collect();
    let mut book = CurrencyBook::load(store);
    book.set_visible(&codes)?;
    book.save(store)?;
    println!(
        "Visible currencies: {}",
        book.visible()
            .iter()
            .map(|c| c.code.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}

fn convert(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let from = sub.get_one::<String>("from").unwrap().to_uppercase();
    let to = sub.get_one::<String>("to").unwrap().to_uppercase();
    let book = CurrencyBook::load(store);
    let res = book.convert(amount, &from, &to);
    println!("{} {} -> {} {}", amount, from, res.round_dp(4), to);
    Ok(())
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: std::collections::HashMap<String, f64>,
}

const RATE_CACHE_HOURS: i64 = 6;

/// Refresh the rate table from the network. Rates fetched within the
/// cache window are reused; a failed fetch falls back to whatever cached
/// rates exist, however old.
fn fetch(store: &Store, force: bool) -> Result<()> {
    let now = Utc::now();
    let cached = store.get::<RateCache>();

    let fresh = cached
        .as_ref()
        .is_some_and(|c| now - c.fetched_at < Duration::hours(RATE_CACHE_HOURS));
    let rates = if fresh && !force {
        let c = cached.context("rate cache vanished")?;
        println!("Using rates fetched {} (cache window)", c.fetched_at);
        c
    } else {
        let book = CurrencyBook::load(store);
        let base = book
            .primary()
            .map(|c| c.code.clone())
            .context("No primary currency configured; run 'budgetit init' first")?;
        match fetch_remote(&base, now) {
            Ok(fetched) => {
                store.set::<RateCache>(&Some(fetched.clone()))?;
                println!("Fetched rates for {}", base);
                fetched
            }
            Err(e) => match cached {
                Some(stale) => {
                    eprintln!("Fetch failed ({}); using stale rates from {}", e, stale.fetched_at);
                    stale
                }
                None => return Err(e),
            },
        }
    };

    apply_rates(store, &rates)
}

fn fetch_remote(base: &str, now: chrono::DateTime<Utc>) -> Result<CachedRates> {
    let url = format!("https://api.exchangerate-api.com/v4/latest/{}", base);
    let client = http_client()?;
    let resp = client.get(url).send()?.error_for_status()?;
    let parsed: RatesResponse = resp.json()?;
    Ok(CachedRates {
        base: base.to_string(),
        rates: parsed.rates,
        fetched_at: now,
    })
}

/// Push fetched rates into the currency table. Only non-primary tracked
/// codes move; the primary stays pinned at 1.
fn apply_rates(store: &Store, rates: &CachedRates) -> Result<()> {
    let mut book = CurrencyBook::load(store);
    let mut updated = 0usize;
    let codes: Vec<String> = book
        .iter()
        .filter(|c| !c.is_primary)
        .map(|c| c.code.clone())
        .collect();
    for code in codes {
        let Some(rate) = rates.rates.get(&code) else {
            continue;
        };
        let Ok(rate) = Decimal::try_from(*rate) else {
            continue;
        };
        if let Some(existing) = book.get(&code) {
            let mut c = existing.clone();
            c.exchange_rate = rate;
            book.upsert(c)?;
            updated += 1;
        }
    }
    book.save(store)?;
    println!("Updated {} currency rate(s)", updated);
    Ok(())
}
