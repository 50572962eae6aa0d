// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetit::analytics::{generate_budget_alerts, Heuristics};
use budgetit::models::{Budget, BudgetPeriod, Category, Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn cat(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        icon: "Tag".to_string(),
        color: None,
        budget: None,
    }
}

fn budget(id: i64, category_id: i64, amount: i64, period: BudgetPeriod) -> Budget {
    Budget {
        id,
        category_id,
        amount: Decimal::from(amount),
        period,
        current_spent: Decimal::ZERO,
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        end_date: None,
    }
}

fn expense(id: i64, category_id: i64, amount: i64, date: NaiveDate) -> Transaction {
    Transaction {
        id,
        kind: TransactionKind::Expense,
        amount: Decimal::from(amount),
        date,
        category_id,
        account_id: 1,
        description: None,
        tags: None,
        is_recurring: None,
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn blown_budget_always_alerts() {
    let heur = Heuristics::default();
    let budgets = vec![budget(1, 1, 100, BudgetPeriod::Monthly)];
    let txs = vec![expense(1, 1, 105, d(2025, 8, 10))];
    let alerts = generate_budget_alerts(&budgets, &txs, &[cat(1, "Food")], d(2025, 8, 29), &heur);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].percent_used, Decimal::new(1050, 1));
    assert_eq!(alerts[0].category_name, "Food");
}

#[test]
fn heavy_early_spend_alerts_before_period_ends() {
    let heur = Heuristics::default();
    let budgets = vec![budget(1, 1, 100, BudgetPeriod::Monthly)];
    // 85% used on day 5 of a 31-day month
    let txs = vec![expense(1, 1, 85, d(2025, 8, 3))];
    let alerts = generate_budget_alerts(&budgets, &txs, &[cat(1, "Food")], d(2025, 8, 5), &heur);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].percent_used, Decimal::new(850, 1));
}

#[test]
fn projected_overrun_alerts_mid_period() {
    let heur = Heuristics::default();
    let budgets = vec![budget(1, 1, 100, BudgetPeriod::Monthly)];
    // Halfway through June: 60 spent projects to 120
    let txs = vec![expense(1, 1, 60, d(2025, 6, 8))];
    let alerts = generate_budget_alerts(&budgets, &txs, &[cat(1, "Food")], d(2025, 6, 15), &heur);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].projected, Decimal::from(120));
}

#[test]
fn on_track_budget_stays_silent() {
    let heur = Heuristics::default();
    let budgets = vec![budget(1, 1, 100, BudgetPeriod::Monthly)];
    // 30% used halfway through projects to 60
    let txs = vec![expense(1, 1, 30, d(2025, 6, 8))];
    let alerts = generate_budget_alerts(&budgets, &txs, &[cat(1, "Food")], d(2025, 6, 15), &heur);
    assert!(alerts.is_empty());
}

#[test]
fn weekly_window_starts_on_sunday() {
    let heur = Heuristics::default();
    let budgets = vec![budget(1, 1, 100, BudgetPeriod::Weekly)];
    let today = d(2025, 8, 13); // Wednesday; week started Sunday the 10th

    // Spend from the previous week is out of scope
    let txs = vec![expense(1, 1, 95, d(2025, 8, 8))];
    assert!(generate_budget_alerts(&budgets, &txs, &[cat(1, "Food")], today, &heur).is_empty());

    // The same spend inside the current week trips the alert
    let txs = vec![expense(1, 1, 95, d(2025, 8, 11))];
    let alerts = generate_budget_alerts(&budgets, &txs, &[cat(1, "Food")], today, &heur);
    assert_eq!(alerts.len(), 1);
}

#[test]
fn yearly_budget_uses_calendar_year() {
    let heur = Heuristics::default();
    let budgets = vec![budget(1, 1, 1200, BudgetPeriod::Yearly)];
    // Last year's spend is ignored; this year's 1300 blows the budget
    let txs = vec![
        expense(1, 1, 2000, d(2024, 11, 20)),
        expense(2, 1, 1300, d(2025, 3, 5)),
    ];
    let alerts = generate_budget_alerts(&budgets, &txs, &[cat(1, "Food")], d(2025, 8, 15), &heur);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].budget, Decimal::from(1200));
}

#[test]
fn stored_spent_field_is_ignored() {
    let heur = Heuristics::default();
    let mut b = budget(1, 1, 100, BudgetPeriod::Monthly);
    b.current_spent = Decimal::from(9999);
    let alerts = generate_budget_alerts(&[b], &[], &[cat(1, "Food")], d(2025, 8, 15), &heur);
    assert!(alerts.is_empty());
}

#[test]
fn zero_amount_budget_is_skipped() {
    let heur = Heuristics::default();
    let budgets = vec![budget(1, 1, 0, BudgetPeriod::Monthly)];
    let txs = vec![expense(1, 1, 500, d(2025, 8, 10))];
    let alerts = generate_budget_alerts(&budgets, &txs, &[cat(1, "Food")], d(2025, 8, 15), &heur);
    assert!(alerts.is_empty());
}

#[test]
fn income_does_not_count_against_budgets() {
    let heur = Heuristics::default();
    let budgets = vec![budget(1, 7, 100, BudgetPeriod::Monthly)];
    let txs = vec![Transaction {
        kind: TransactionKind::Income,
        ..expense(1, 7, 500, d(2025, 8, 10))
    }];
    let alerts = generate_budget_alerts(&budgets, &txs, &[cat(7, "Salary")], d(2025, 8, 15), &heur);
    assert!(alerts.is_empty());
}
