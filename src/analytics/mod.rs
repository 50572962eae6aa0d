// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Predictive spending analytics: pattern detection, anomaly flagging,
//! saving suggestions, spending projections and budget-risk alerts,
//! derived from the raw transaction history by plain aggregation.

pub mod alerts;
pub mod anomalies;
pub mod patterns;
pub mod projection;
pub mod suggestions;

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, Months, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::Category;
use crate::store::{Budgets, Categories, PredictionCache, Store, Transactions};

pub use alerts::{generate_budget_alerts, BudgetAlert};
pub use anomalies::{detect_anomalies, AnomalyDetection, Severity};
pub use patterns::{detect_spending_patterns, SpendingPattern, Trend};
pub use projection::{project_future_spending, CategoryProjection};
pub use suggestions::{generate_saving_suggestions, Difficulty, SavingSuggestion};

/// Every threshold the engine uses. The defaults reproduce the numbers
/// the dashboard shipped with; none of them is calibrated beyond that.
#[derive(Debug, Clone)]
pub struct Heuristics {
    /// Percent change beyond which a category trend counts as moving.
    pub trend_percent: Decimal,
    /// An expense is anomalous above this multiple of the category average.
    pub anomaly_multiplier: Decimal,
    /// Absolute floor below which no expense is flagged, to spare
    /// categories where the average itself is tiny.
    pub anomaly_floor: Decimal,
    pub high_severity_multiple: Decimal,
    pub medium_severity_multiple: Decimal,
    /// How many top-spend categories are considered for suggestions.
    pub suggestion_categories: usize,
    /// Categories averaging below this get no suggestion.
    pub suggestion_floor: Decimal,
    /// Suggestions saving less than this are discarded.
    pub min_suggested_saving: Decimal,
    pub increasing_cut: Decimal,
    pub stable_cut: Decimal,
    pub decreasing_cut: Decimal,
    pub stable_tier_floor: Decimal,
    pub moderate_tier_floor: Decimal,
    pub decreasing_tier_floor: Decimal,
    /// Clamp on the monthly growth factor used for projections.
    pub growth_clamp_min: Decimal,
    pub growth_clamp_max: Decimal,
    /// Budget alert triggers, in percent of the budget limit.
    pub budget_used_alert: Decimal,
    pub budget_used_warn: Decimal,
    pub budget_projection_alert: Decimal,
    /// Period-progress fractions gating the warn/projection triggers.
    pub warn_period_fraction: Decimal,
    pub projection_period_fraction: Decimal,
    /// Cached predictions older than this are recomputed.
    pub cache_max_age_days: i64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            trend_percent: Decimal::from(10),
            anomaly_multiplier: Decimal::from(2),
            anomaly_floor: Decimal::from(50),
            high_severity_multiple: Decimal::from(5),
            medium_severity_multiple: Decimal::from(3),
            suggestion_categories: 5,
            suggestion_floor: Decimal::from(50),
            min_suggested_saving: Decimal::from(10),
            increasing_cut: Decimal::new(15, 2),
            stable_cut: Decimal::new(10, 2),
            decreasing_cut: Decimal::new(5, 2),
            stable_tier_floor: Decimal::from(100),
            moderate_tier_floor: Decimal::from(300),
            decreasing_tier_floor: Decimal::from(200),
            growth_clamp_min: Decimal::new(8, 1),
            growth_clamp_max: Decimal::new(12, 1),
            budget_used_alert: Decimal::from(100),
            budget_used_warn: Decimal::from(80),
            budget_projection_alert: Decimal::from(105),
            warn_period_fraction: Decimal::new(75, 2),
            projection_period_fraction: Decimal::new(3, 1),
            cache_max_age_days: 3,
        }
    }
}

/// The cached output of one full analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionData {
    pub patterns: Vec<SpendingPattern>,
    pub anomalies: Vec<AnomalyDetection>,
    pub suggestions: Vec<SavingSuggestion>,
    pub last_updated: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

impl PredictionData {
    /// Stale after three days, or as soon as the calendar month rolls
    /// over (month-bucketed patterns shift at the boundary).
    pub fn is_stale(&self, now: DateTime<Utc>, heuristics: &Heuristics) -> bool {
        now - self.last_updated > Duration::days(heuristics.cache_max_age_days)
            || now.month() != self.last_updated.month()
    }
}

/// Derives insights from whatever the store currently holds. All entry
/// points take `now` explicitly so callers (and tests) control the clock.
pub struct AnalyticsEngine<'a> {
    store: &'a Store,
    categories: Vec<Category>,
    heuristics: Heuristics,
}

impl<'a> AnalyticsEngine<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self::with_heuristics(store, Heuristics::default())
    }

    pub fn with_heuristics(store: &'a Store, heuristics: Heuristics) -> Self {
        let categories = store.get::<Categories>();
        Self {
            store,
            categories,
            heuristics,
        }
    }

    /// Run a full analysis pass and overwrite the prediction cache.
    /// The computation itself is total; only the cache write can fail.
    pub fn analyze_predictions(&self, now: DateTime<Utc>) -> Result<PredictionData> {
        let transactions = self.store.get::<Transactions>();
        let today = now.date_naive();

        let patterns =
            detect_spending_patterns(&transactions, &self.categories, today, &self.heuristics);
        let anomalies = detect_anomalies(&transactions, &self.categories, today, &self.heuristics);
        let suggestions = generate_saving_suggestions(&patterns, &self.heuristics);

        let data = PredictionData {
            patterns,
            anomalies,
            suggestions,
            last_updated: now,
            next_update: next_update_at(now),
        };
        self.store.set::<PredictionCache>(&Some(data.clone()))?;
        Ok(data)
    }

    /// Cached predictions when fresh, a recompute-and-store otherwise.
    pub fn prediction_data(&self, now: DateTime<Utc>) -> Result<PredictionData> {
        match self.store.get::<PredictionCache>() {
            Some(cached) if !cached.is_stale(now, &self.heuristics) => Ok(cached),
            _ => self.analyze_predictions(now),
        }
    }

    /// Per-category spend projections for the next `months` months.
    pub fn project_future_spending(
        &self,
        months: u32,
        now: DateTime<Utc>,
    ) -> Vec<CategoryProjection> {
        let transactions = self.store.get::<Transactions>();
        let patterns = detect_spending_patterns(
            &transactions,
            &self.categories,
            now.date_naive(),
            &self.heuristics,
        );
        project_future_spending(&patterns, months, &self.heuristics)
    }

    /// Budget-risk alerts for the current period of every budget.
    pub fn budget_alerts(&self, now: DateTime<Utc>) -> Vec<BudgetAlert> {
        let budgets = self.store.get::<Budgets>();
        let transactions = self.store.get::<Transactions>();
        generate_budget_alerts(
            &budgets,
            &transactions,
            &self.categories,
            now.date_naive(),
            &self.heuristics,
        )
    }
}

/// Next scheduled refresh: first of the next month when we are near the
/// month boundary, otherwise three days out.
fn next_update_at(now: DateTime<Utc>) -> DateTime<Utc> {
    if now.day() >= 28 {
        let shifted = now + Months::new(1);
        shifted.with_day(1).unwrap_or(shifted)
    } else {
        now + Duration::days(3)
    }
}

pub(crate) fn category_name(categories: &[Category], id: i64) -> String {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

// Half-up rounding, matching how the dashboard rounded its figures.
pub(crate) fn round0(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn round1(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
