// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Category, Transaction, TransactionKind};

use super::{category_name, round1, Heuristics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// An expense flagged as unusually large for its category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyDetection {
    pub transaction: Transaction,
    pub reason: String,
    pub severity: Severity,
    pub date: NaiveDate,
    pub category_name: String,
}

#[derive(Default)]
struct CategoryStats {
    total: Decimal,
    count: u32,
}

/// Flags expenses from the last month that stand far above their
/// category's three-month average. Severity scales with the multiple.
pub fn detect_anomalies(
    transactions: &[Transaction],
    categories: &[Category],
    today: NaiveDate,
    heuristics: &Heuristics,
) -> Vec<AnomalyDetection> {
    let three_months_ago = today.checked_sub_months(Months::new(3)).unwrap_or(today);
    let one_month_ago = today.checked_sub_months(Months::new(1)).unwrap_or(today);

    let recent: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && t.date >= three_months_ago)
        .collect();

    let mut stats: HashMap<i64, CategoryStats> = HashMap::new();
    for t in &recent {
        let entry = stats.entry(t.category_id).or_default();
        entry.total += t.amount;
        entry.count += 1;
    }

    let mut anomalies = Vec::new();
    for t in recent.iter().filter(|t| t.date >= one_month_ago) {
        let Some(s) = stats.get(&t.category_id) else {
            continue;
        };
        if s.count == 0 {
            continue;
        }
        let avg = s.total / Decimal::from(s.count);
        if avg.is_zero() {
            continue;
        }
        if t.amount > avg * heuristics.anomaly_multiplier && t.amount > heuristics.anomaly_floor {
            let severity = if t.amount > avg * heuristics.high_severity_multiple {
                Severity::High
            } else if t.amount > avg * heuristics.medium_severity_multiple {
                Severity::Medium
            } else {
                Severity::Low
            };
            let ratio = round1(t.amount / avg);
            anomalies.push(AnomalyDetection {
                transaction: (*t).clone(),
                reason: format!("Expense {}x above the average for this category", ratio),
                severity,
                date: t.date,
                category_name: category_name(categories, t.category_id),
            });
        }
    }

    // Most severe first, most recent first within a severity.
    anomalies.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then(b.date.cmp(&a.date))
            .then(b.transaction.id.cmp(&a.transaction.id))
    });
    anomalies
}
