// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{round0, Heuristics, SpendingPattern};

/// Projected spend per month for one category, whole currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProjection {
    pub category_id: i64,
    pub category_name: String,
    pub monthly: Vec<Decimal>,
}

/// Extrapolates each pattern's monthly average forward by its percent
/// change, compounding month over month. The growth factor is clamped
/// so a one-off swing cannot run away over a long horizon.
pub fn project_future_spending(
    patterns: &[SpendingPattern],
    months: u32,
    heuristics: &Heuristics,
) -> Vec<CategoryProjection> {
    patterns
        .iter()
        .map(|pattern| {
            let mut factor = Decimal::ONE + pattern.percent_change / Decimal::from(100);
            factor = factor.clamp(heuristics.growth_clamp_min, heuristics.growth_clamp_max);

            let mut amount = pattern.average_monthly;
            let mut monthly = Vec::with_capacity(months as usize);
            for _ in 0..months {
                monthly.push(round0(amount));
                amount *= factor;
            }
            CategoryProjection {
                category_id: pattern.category_id,
                category_name: pattern.category_name.clone(),
                monthly,
            }
        })
        .collect()
}
