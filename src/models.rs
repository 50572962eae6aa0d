// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// A single ledger entry. Amounts are always positive; the kind carries
/// the direction. The analytics engine treats these as read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: i64,
    pub account_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub currency: String,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid budget period '{0}', expected monthly|weekly|yearly")]
pub struct ParsePeriodError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Monthly,
    Weekly,
    Yearly,
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetPeriod::Monthly => write!(f, "monthly"),
            BudgetPeriod::Weekly => write!(f, "weekly"),
            BudgetPeriod::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(BudgetPeriod::Monthly),
            "weekly" => Ok(BudgetPeriod::Weekly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(ParsePeriodError(other.to_string())),
        }
    }
}

/// A spending limit for one category over a rolling period.
/// `current_spent` is a denormalized UI field; alert generation always
/// recomputes the spend from the transaction history instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub current_spent: Decimal,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// One tracked currency. Rates are quoted against the primary currency,
/// whose own rate is pinned to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub symbol: String,
    pub exchange_rate: Decimal,
    pub is_primary: bool,
    pub is_visible: bool,
}

pub fn sample_categories() -> Vec<Category> {
    let cat = |id: i64, name: &str, icon: &str, color: &str| Category {
        id,
        name: name.to_string(),
        icon: icon.to_string(),
        color: Some(color.to_string()),
        budget: None,
    };
    vec![
        cat(1, "Food", "Utensils", "#FF5733"),
        cat(2, "Transport", "Car", "#33A8FF"),
        cat(3, "Housing", "Home", "#33FF57"),
        cat(4, "Entertainment", "Film", "#FF33A8"),
        cat(5, "Health", "Heart", "#33FFC7"),
        cat(6, "Education", "GraduationCap", "#C733FF"),
        cat(7, "Salary", "Briefcase", "#FFD700"),
        cat(8, "Investments", "TrendingUp", "#00FF00"),
        cat(9, "Gifts", "Gift", "#FF00FF"),
        cat(10, "Shopping", "ShoppingBag", "#964B00"),
        cat(11, "Utilities", "Lightbulb", "#FFA500"),
        cat(12, "Other income", "Plus", "#008000"),
    ]
}

pub fn sample_currencies() -> Vec<Currency> {
    vec![
        Currency {
            code: "ARS".to_string(),
            name: "Argentine Peso".to_string(),
            symbol: "$".to_string(),
            exchange_rate: Decimal::ONE,
            is_primary: true,
            is_visible: true,
        },
        Currency {
            code: "USD".to_string(),
            name: "US Dollar".to_string(),
            symbol: "US$".to_string(),
            exchange_rate: Decimal::new(11, 4),
            is_primary: false,
            is_visible: true,
        },
    ]
}
