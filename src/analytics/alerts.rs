// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Budget, BudgetPeriod, Category, Transaction, TransactionKind};

use super::{category_name, round0, round1, Heuristics};

/// A budget at risk of being blown in its current period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub category_id: i64,
    pub category_name: String,
    pub budget: Decimal,
    pub projected: Decimal,
    pub percent_used: Decimal,
}

fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(today.weekday().num_days_from_sunday() as i64)
}

fn in_current_period(date: NaiveDate, period: BudgetPeriod, today: NaiveDate) -> bool {
    match period {
        BudgetPeriod::Monthly => date.year() == today.year() && date.month() == today.month(),
        BudgetPeriod::Weekly => date >= week_start(today),
        BudgetPeriod::Yearly => date.year() == today.year(),
    }
}

fn days_in_period(period: BudgetPeriod, today: NaiveDate) -> i64 {
    match period {
        BudgetPeriod::Monthly => {
            let first = today.with_day(1).unwrap_or(today);
            let next = first.checked_add_months(Months::new(1)).unwrap_or(first);
            (next - first).num_days()
        }
        BudgetPeriod::Weekly => 7,
        BudgetPeriod::Yearly => NaiveDate::from_ymd_opt(today.year(), 12, 31)
            .map(|d| d.ordinal() as i64)
            .unwrap_or(365),
    }
}

fn days_passed(period: BudgetPeriod, today: NaiveDate) -> i64 {
    match period {
        BudgetPeriod::Monthly => today.day() as i64,
        BudgetPeriod::Weekly => today.weekday().num_days_from_sunday() as i64 + 1,
        BudgetPeriod::Yearly => today.ordinal() as i64,
    }
}

/// Recomputes each budget's spend from the transaction history (the
/// stored `current_spent` is never trusted), projects it to the end of
/// the period by the elapsed fraction, and raises an alert when the
/// budget is blown, nearly blown early, or projected to overrun.
pub fn generate_budget_alerts(
    budgets: &[Budget],
    transactions: &[Transaction],
    categories: &[Category],
    today: NaiveDate,
    heuristics: &Heuristics,
) -> Vec<BudgetAlert> {
    let mut alerts = Vec::new();
    let hundred = Decimal::from(100);

    for budget in budgets {
        if budget.amount.is_zero() {
            continue;
        }

        let current_spent: Decimal = transactions
            .iter()
            .filter(|t| {
                t.category_id == budget.category_id
                    && t.kind == TransactionKind::Expense
                    && in_current_period(t.date, budget.period, today)
            })
            .map(|t| t.amount)
            .sum();

        let period_fraction = Decimal::from(days_passed(budget.period, today))
            / Decimal::from(days_in_period(budget.period, today));
        let projected = if period_fraction > Decimal::ZERO {
            round0(current_spent / period_fraction)
        } else {
            current_spent
        };

        let percent_used = current_spent / budget.amount * hundred;
        let percent_projected = projected / budget.amount * hundred;

        let over_budget = percent_used >= heuristics.budget_used_alert;
        let early_burn = percent_used >= heuristics.budget_used_warn
            && period_fraction < heuristics.warn_period_fraction;
        let projected_overrun = percent_projected > heuristics.budget_projection_alert
            && period_fraction >= heuristics.projection_period_fraction;

        if over_budget || early_burn || projected_overrun {
            alerts.push(BudgetAlert {
                category_id: budget.category_id,
                category_name: category_name(categories, budget.category_id),
                budget: budget.amount,
                projected,
                percent_used: round1(percent_used),
            });
        }
    }

    alerts
}
