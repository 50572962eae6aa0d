// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{AnalyticsEngine, PredictionData, Trend};
use crate::currency::CurrencyBook;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::Utc;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let engine = AnalyticsEngine::new(store);
    let now = Utc::now();
    match m.subcommand() {
        Some(("analyze", sub)) => {
            let data = engine.analyze_predictions(now)?;
            render_predictions(store, &data, sub)?;
        }
        Some(("show", sub)) => {
            let data = engine.prediction_data(now)?;
            render_predictions(store, &data, sub)?;
        }
        Some(("projections", sub)) => {
            let months = *sub.get_one::<u32>("months").unwrap_or(&3);
            let projections = engine.project_future_spending(months, now);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &projections)? {
                let headers: Vec<String> = std::iter::once("Category".to_string())
                    .chain((1..=months).map(|i| format!("+{}mo", i)))
                    .collect();
                let header_refs: Vec<&str> = headers.iter().map(|s| s.as_str()).collect();
                let rows = projections
                    .iter()
                    .map(|p| {
                        std::iter::once(p.category_name.clone())
                            .chain(p.monthly.iter().map(|v| v.to_string()))
                            .collect()
                    })
                    .collect();
                println!("{}", pretty_table(&header_refs, rows));
            }
        }
        Some(("alerts", sub)) => {
            let alerts = engine.budget_alerts(now);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &alerts)? {
                if alerts.is_empty() {
                    println!("No budgets at risk");
                    return Ok(());
                }
                let book = CurrencyBook::load(store);
                let rows = alerts
                    .iter()
                    .map(|a| {
                        vec![
                            a.category_name.clone(),
                            book.format_amount(a.budget, None),
                            book.format_amount(a.projected, None),
                            format!("{}%", a.percent_used),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Category", "Budget", "Projected", "Used"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

fn render_predictions(store: &Store, data: &PredictionData, sub: &clap::ArgMatches) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), data)? {
        return Ok(());
    }
    let book = CurrencyBook::load(store);

    let pattern_rows = data
        .patterns
        .iter()
        .map(|p| {
            vec![
                p.category_name.clone(),
                book.format_amount(p.average_monthly.round_dp(2), None),
                match p.trend {
                    Trend::Increasing => "increasing",
                    Trend::Decreasing => "decreasing",
                    Trend::Stable => "stable",
                }
                .to_string(),
                format!("{}%", p.percent_change),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Avg/month", "Trend", "Change"], pattern_rows)
    );

    if !data.anomalies.is_empty() {
        let anomaly_rows = data
            .anomalies
            .iter()
            .map(|a| {
                vec![
                    a.date.to_string(),
                    a.category_name.clone(),
                    book.format_amount(a.transaction.amount, None),
                    format!("{:?}", a.severity).to_lowercase(),
                    a.reason.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Category", "Amount", "Severity", "Reason"],
                anomaly_rows
            )
        );
    }

    if !data.suggestions.is_empty() {
        let suggestion_rows = data
            .suggestions
            .iter()
            .map(|s| {
                vec![
                    s.category_name.clone(),
                    book.format_amount(s.current_monthly_avg, None),
                    book.format_amount(s.suggested_saving, None),
                    book.format_amount(s.potential_annual_saving, None),
                    format!("{:?}", s.difficulty).to_lowercase(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Avg/month", "Save/month", "Save/year", "Difficulty"],
                suggestion_rows
            )
        );
    }

    println!(
        "Updated {} | next update {}",
        data.last_updated.format("%Y-%m-%d %H:%M"),
        data.next_update.format("%Y-%m-%d %H:%M")
    );
    Ok(())
}
