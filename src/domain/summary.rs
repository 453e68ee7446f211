//! Report types produced by the engine: resolved rates, cost breakdowns,
//! and the dashboard summary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Provenance of a resolved labor rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Override,
    Global,
}

/// The effective shop/external per-minute labor rate for an account and
/// optional department. When an override is accepted, both values come
/// from the override record verbatim, including a zero in the field that
/// did not trigger acceptance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EffectiveRate {
    pub shop: f64,
    pub external: f64,
    pub source: RateSource,
}

impl EffectiveRate {
    pub fn global(shop: f64, external: f64) -> Self {
        Self {
            shop,
            external,
            source: RateSource::Global,
        }
    }

    pub fn overridden(shop: f64, external: f64) -> Self {
        Self {
            shop,
            external,
            source: RateSource::Override,
        }
    }
}

/// Recomputed display costs for one recipe. Never persisted; the write
/// path stores only the unit ingredient cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostBreakdown {
    pub batch_ingredient_cost: f64,
    pub unit_ingredient_cost: f64,
    pub batch_labor_cost: f64,
    pub unit_labor_cost: f64,
    pub unit_packing_cost: f64,
    pub total_unit_cost: f64,
}

/// Month total for one cost category. Categories with no records in the
/// period are simply absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub total: f64,
}

/// Twelve monthly cost/income/net values for one year, with yearly totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearSeries {
    pub year: i32,
    pub cost: [f64; 12],
    pub income: [f64; 12],
    pub net: [f64; 12],
    pub total_cost: f64,
    pub total_income: f64,
    pub total_net: f64,
}

impl YearSeries {
    pub fn from_monthly(year: i32, cost: [f64; 12], income: [f64; 12]) -> Self {
        let mut net = [0.0; 12];
        for m in 0..12 {
            net[m] = income[m] - cost[m];
        }
        Self {
            year,
            cost,
            income,
            net,
            total_cost: cost.iter().sum(),
            total_income: income.iter().sum(),
            total_net: income.iter().sum::<f64>() - cost.iter().sum::<f64>(),
        }
    }

    /// Net value for a 1-based month number.
    pub fn net_for_month(&self, month: u32) -> f64 {
        self.net[(month.clamp(1, 12) - 1) as usize]
    }

    /// Income value for a 1-based month number.
    pub fn income_for_month(&self, month: u32) -> f64 {
        self.income[(month.clamp(1, 12) - 1) as usize]
    }
}

/// Dashboard rollup over the visible-account set for one selected month,
/// comparing the selected year against the previous one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub year: i32,
    pub month: u32,
    /// Category totals for the selected month of the selected year.
    pub per_category: Vec<CategoryTotal>,
    pub this_year: YearSeries,
    pub last_year: YearSeries,
    /// Distinct years that carry cost records, newest first.
    pub available_years: Vec<i32>,
    pub income_this_month: f64,
    pub income_last_year_same_month: f64,
    /// 1-based month with the maximum net in the selected year; first
    /// month wins ties.
    pub best_month: u32,
    pub best_net: f64,
    /// None when all twelve monthly nets are identical: there is no
    /// distinct worst month.
    pub worst_month: Option<u32>,
    pub worst_net: f64,
}
