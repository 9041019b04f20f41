use std::collections::HashMap;

use crate::records::CostRecord;
use crate::storage::config::ShopConfig;

use super::period::Period;

/// Split of a period's cost records as the costs dashboard shows them:
/// operational spend versus excluded draws, paid versus pending, and
/// per-category totals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostBreakdown {
    pub operational_total: f64,
    /// Owner draws and one-off items, excluded from amortization.
    pub excluded_total: f64,
    pub paid_total: f64,
    pub pending_total: f64,
    /// Operational categories with their totals, largest first.
    pub by_category: Vec<(String, f64)>,
}

pub fn cost_breakdown(period: &Period, costs: &[CostRecord], config: &ShopConfig) -> CostBreakdown {
    let mut breakdown = CostBreakdown::default();
    let mut by_category: HashMap<String, f64> = HashMap::new();

    for cost in costs {
        let Some(date) = cost.parsed_date() else {
            tracing::warn!(category = %cost.category, raw = %cost.date, "skipping cost with unparseable date");
            continue;
        };
        if !period.contains(date) {
            continue;
        }
        if !config.is_operational_cost(&cost.category) {
            breakdown.excluded_total += cost.amount;
            continue;
        }
        breakdown.operational_total += cost.amount;
        if cost.is_paid() {
            breakdown.paid_total += cost.amount;
        } else {
            breakdown.pending_total += cost.amount;
        }
        *by_category.entry(cost.category.clone()).or_default() += cost.amount;
    }

    breakdown.by_category = by_category.into_iter().collect();
    breakdown
        .by_category
        .sort_by(|(a_name, a), (b_name, b)| b.total_cmp(a).then(a_name.cmp(b_name)));
    breakdown
}
