// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use rust_decimal::Decimal;

use crate::models::Currency;
use crate::store::{Currencies, Store};

/// UI constraint carried over from the dashboard: besides the primary,
/// at most one other currency can be shown at a time.
pub const MAX_VISIBLE: usize = 2;

/// The exchange-rate table, anchored to exactly one primary currency.
///
/// Every rate is quoted against the primary (whose own rate is 1), so a
/// conversion between two non-primary currencies goes through the anchor.
pub struct CurrencyBook {
    currencies: Vec<Currency>,
}

impl CurrencyBook {
    pub fn new(currencies: Vec<Currency>) -> Self {
        Self { currencies }
    }

    pub fn load(store: &Store) -> Self {
        Self::new(store.get::<Currencies>())
    }

    pub fn save(&self, store: &Store) -> Result<()> {
        store.set::<Currencies>(&self.currencies)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.iter()
    }

    pub fn get(&self, code: &str) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.code == code)
    }

    pub fn primary(&self) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.is_primary)
    }

    pub fn visible(&self) -> Vec<&Currency> {
        self.currencies.iter().filter(|c| c.is_visible).collect()
    }

    /// Add a currency or replace the one with the same code. A currency
    /// flagged primary on the way in triggers a full re-base. The visible
    /// cap applies here too: an entry that would exceed it lands hidden.
    pub fn upsert(&mut self, mut currency: Currency) -> Result<()> {
        let code = currency.code.clone();
        let make_primary = currency.is_primary;
        if currency.is_visible {
            let visible_others = self
                .currencies
                .iter()
                .filter(|c| c.is_visible && c.code != code)
                .count();
            if visible_others >= MAX_VISIBLE {
                currency.is_visible = false;
            }
        }
        match self.currencies.iter_mut().find(|c| c.code == code) {
            Some(existing) => *existing = currency,
            None => self.currencies.push(currency),
        }
        if make_primary {
            self.set_primary_and_recalculate(&code)?;
        }
        Ok(())
    }

    /// Best-effort conversion: unknown codes and unusable rates fall back
    /// to returning the amount unchanged rather than erroring.
    pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Decimal {
        if from == to {
            return amount;
        }
        let (Some(from_ccy), Some(to_ccy)) = (self.get(from), self.get(to)) else {
            return amount;
        };
        match from_ccy.exchange_rate.checked_div(to_ccy.exchange_rate) {
            Some(ratio) => amount * ratio,
            None => amount,
        }
    }

    /// Re-anchor the table on `code`: its rate becomes exactly 1 and every
    /// other rate is divided by its old rate, preserving all cross ratios.
    pub fn set_primary_and_recalculate(&mut self, code: &str) -> Result<()> {
        let anchor = match self.get(code) {
            Some(c) => c.exchange_rate,
            None => bail!("Currency '{}' not found", code),
        };
        if anchor.is_zero() {
            bail!("Currency '{}' has a zero exchange rate and cannot anchor the table", code);
        }
        for c in &mut self.currencies {
            if c.code == code {
                c.exchange_rate = Decimal::ONE;
                c.is_primary = true;
                c.is_visible = true;
            } else {
                c.exchange_rate /= anchor;
                c.is_primary = false;
            }
        }
        // Forcing the new primary visible can overflow the cap; keep the
        // first non-primary visible entries and hide the rest.
        let mut kept = 1;
        for c in &mut self.currencies {
            if c.is_primary || !c.is_visible {
                continue;
            }
            if kept < MAX_VISIBLE {
                kept += 1;
            } else {
                c.is_visible = false;
            }
        }
        Ok(())
    }

    /// Replace the visible set. The primary is always visible; together
    /// with `codes` the visible set may not exceed [`MAX_VISIBLE`].
    pub fn set_visible(&mut self, codes: &[String]) -> Result<()> {
        for code in codes {
            if self.get(code).is_none() {
                bail!("Currency '{}' not found", code);
            }
        }
        let primary = self.primary().map(|c| c.code.clone());
        let mut visible: Vec<String> = codes.to_vec();
        if let Some(p) = &primary {
            if !visible.contains(p) {
                visible.push(p.clone());
            }
        }
        if visible.len() > MAX_VISIBLE {
            bail!(
                "At most {} currencies can be visible (primary included)",
                MAX_VISIBLE
            );
        }
        for c in &mut self.currencies {
            c.is_visible = visible.contains(&c.code);
        }
        Ok(())
    }

    /// Render an amount in the given currency (primary when omitted).
    /// Unknown codes degrade to the bare number.
    pub fn format_amount(&self, amount: Decimal, code: Option<&str>) -> String {
        let ccy = match code {
            Some(c) => self.get(c),
            None => self.primary(),
        };
        match ccy {
            Some(c) => format!("{}{}", c.symbol, amount.round_dp(2)),
            None => amount.round_dp(2).to_string(),
        }
    }
}
