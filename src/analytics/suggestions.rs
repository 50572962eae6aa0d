// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{round0, Heuristics, SpendingPattern, Trend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

/// A concrete monthly reduction proposed for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingSuggestion {
    pub category_id: i64,
    pub category_name: String,
    pub current_monthly_avg: Decimal,
    pub suggested_saving: Decimal,
    pub potential_annual_saving: Decimal,
    pub difficulty: Difficulty,
}

/// Proposes savings for the heaviest-spending categories. The cut and
/// its difficulty depend on the trend: growing spend is the easiest to
/// trim, shrinking spend the hardest to trim further.
pub fn generate_saving_suggestions(
    patterns: &[SpendingPattern],
    heuristics: &Heuristics,
) -> Vec<SavingSuggestion> {
    let mut suggestions = Vec::new();

    for pattern in patterns.iter().take(heuristics.suggestion_categories) {
        if pattern.average_monthly < heuristics.suggestion_floor {
            continue;
        }

        let avg = pattern.average_monthly;
        let (suggested_saving, difficulty) = if pattern.trend == Trend::Increasing {
            (round0(avg * heuristics.increasing_cut), Difficulty::Easy)
        } else if pattern.trend == Trend::Stable && avg > heuristics.stable_tier_floor {
            let difficulty = if avg > heuristics.moderate_tier_floor {
                Difficulty::Moderate
            } else {
                Difficulty::Easy
            };
            (round0(avg * heuristics.stable_cut), difficulty)
        } else if avg > heuristics.decreasing_tier_floor {
            (round0(avg * heuristics.decreasing_cut), Difficulty::Challenging)
        } else {
            continue;
        };

        if suggested_saving >= heuristics.min_suggested_saving {
            suggestions.push(SavingSuggestion {
                category_id: pattern.category_id,
                category_name: pattern.category_name.clone(),
                current_monthly_avg: round0(avg),
                suggested_saving,
                potential_annual_saving: suggested_saving * Decimal::from(12),
                difficulty,
            });
        }
    }

    suggestions
}
