// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Category, Transaction, TransactionKind};

use super::{category_name, round1, Heuristics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

/// Per-category expense behavior over the last three calendar months.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingPattern {
    pub category_id: i64,
    pub category_name: String,
    pub average_monthly: Decimal,
    pub trend: Trend,
    pub percent_change: Decimal,
}

/// Whole-month offset between a transaction date and today (0 = this
/// month, 1 = last month, ...). Negative for future-dated entries.
pub(crate) fn months_back(today: NaiveDate, date: NaiveDate) -> i32 {
    (today.year() - date.year()) * 12 + today.month() as i32 - date.month() as i32
}

/// Buckets expenses into [current, last, two months ago] per category,
/// classifies the trend and sorts by monthly average, largest first.
/// Categories with no expense in the window are dropped.
pub fn detect_spending_patterns(
    transactions: &[Transaction],
    categories: &[Category],
    today: NaiveDate,
    heuristics: &Heuristics,
) -> Vec<SpendingPattern> {
    let mut totals: HashMap<i64, [Decimal; 3]> = categories
        .iter()
        .map(|c| (c.id, [Decimal::ZERO; 3]))
        .collect();

    for t in transactions {
        if t.kind != TransactionKind::Expense {
            continue;
        }
        let offset = months_back(today, t.date);
        if (0..3).contains(&offset) {
            let buckets = totals.entry(t.category_id).or_insert([Decimal::ZERO; 3]);
            buckets[offset as usize] += t.amount;
        }
    }

    let mut patterns = Vec::new();
    for (category_id, [current, last, two_ago]) in totals {
        if current.is_zero() && last.is_zero() && two_ago.is_zero() {
            continue;
        }
        let average_monthly = (current + last + two_ago) / Decimal::from(3);

        // Compare against last month when both ends are nonzero, falling
        // back to two months ago; otherwise the trend stays flat.
        let older = if !current.is_zero() && !last.is_zero() {
            Some(last)
        } else if !current.is_zero() && !two_ago.is_zero() {
            Some(two_ago)
        } else {
            None
        };

        let mut trend = Trend::Stable;
        let mut percent_change = Decimal::ZERO;
        if let Some(older) = older {
            let change = (current - older) / older * Decimal::from(100);
            if change > heuristics.trend_percent {
                trend = Trend::Increasing;
            } else if change < -heuristics.trend_percent {
                trend = Trend::Decreasing;
            }
            percent_change = round1(change);
        }

        patterns.push(SpendingPattern {
            category_id,
            category_name: category_name(categories, category_id),
            average_monthly,
            trend,
            percent_change,
        });
    }

    // Category id as tie-break keeps recomputation deterministic.
    patterns.sort_by(|a, b| {
        b.average_monthly
            .cmp(&a.average_monthly)
            .then(a.category_id.cmp(&b.category_id))
    });
    patterns
}
