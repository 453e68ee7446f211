//! Year-over-year financial rollups for the dashboard.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use uuid::Uuid;

use crate::domain::{
    account::Account,
    summary::{CategoryTotal, DashboardSummary, YearSeries},
};
use crate::utils::rounding::{all_equal, first_max, first_min};
use crate::workspace::Workspace;

use super::VisibilityService;

/// Aggregates cost and income records over the visible-account set.
/// Missing records resolve to zero contributions; nothing here divides,
/// so no guard is needed.
pub struct DashboardService;

impl DashboardService {
    /// Builds the dashboard summary for a selected year and month:
    /// category totals for that month, twelve-month cost/income/net
    /// series for the year and the previous one, yearly totals, and the
    /// best/worst month selection.
    pub fn dashboard(
        workspace: &Workspace,
        actor: &Account,
        year: i32,
        month: u32,
    ) -> DashboardSummary {
        let visible = VisibilityService::visible_accounts(workspace, actor);
        let month = month.clamp(1, 12);
        let last_year = year - 1;

        let mut category_totals: BTreeMap<Option<Uuid>, f64> = BTreeMap::new();
        let mut cost_this = [0.0; 12];
        let mut cost_last = [0.0; 12];
        let mut income_this = [0.0; 12];
        let mut income_last = [0.0; 12];
        let mut years: BTreeSet<i32> = BTreeSet::new();

        for record in &workspace.cost_records {
            if !visible.contains(&record.account_id) {
                continue;
            }
            let record_year = record.due_date.year();
            years.insert(record_year);
            let slot = (record.due_date.month() - 1) as usize;
            if record_year == year {
                cost_this[slot] += record.amount;
                if record.due_date.month() == month {
                    *category_totals.entry(record.category_id).or_insert(0.0) += record.amount;
                }
            } else if record_year == last_year {
                cost_last[slot] += record.amount;
            }
        }

        for record in &workspace.income_records {
            if !visible.contains(&record.account_id) {
                continue;
            }
            let slot = (record.date.month() - 1) as usize;
            if record.date.year() == year {
                income_this[slot] += record.amount;
            } else if record.date.year() == last_year {
                income_last[slot] += record.amount;
            }
        }

        let per_category = category_totals
            .into_iter()
            .map(|(category_id, total)| CategoryTotal {
                category_id,
                name: category_id
                    .and_then(|id| workspace.cost_category(id))
                    .map(|category| category.name.clone())
                    .unwrap_or_else(|| "Uncategorized".into()),
                total,
            })
            .collect();

        let this_year = YearSeries::from_monthly(year, cost_this, income_this);
        let last_year_series = YearSeries::from_monthly(last_year, cost_last, income_last);

        let best_index = first_max(&this_year.net).unwrap_or(0);
        let best_net = this_year.net[best_index];
        let (worst_month, worst_net) = if all_equal(&this_year.net) {
            // Twelve identical nets: there is no distinct worst month.
            (None, best_net)
        } else {
            let worst_index = first_min(&this_year.net).unwrap_or(0);
            (Some(worst_index as u32 + 1), this_year.net[worst_index])
        };

        DashboardSummary {
            year,
            month,
            per_category,
            income_this_month: this_year.income_for_month(month),
            income_last_year_same_month: last_year_series.income_for_month(month),
            available_years: years.into_iter().rev().collect(),
            best_month: best_index as u32 + 1,
            best_net,
            worst_month,
            worst_net,
            this_year,
            last_year: last_year_series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::{CostCategory, CostRecord, IncomeRecord};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn seeded_workspace() -> (Workspace, Account) {
        let mut workspace = Workspace::new("Dashboard");
        let root = Account::new("Owner");
        let root_id = workspace.add_account(root.clone());
        let child_id = workspace.add_account(Account::child_of("Member", root_id));

        let supplies = workspace.add_cost_category(CostCategory::new("Supplies", root_id));
        workspace.add_cost_record(
            CostRecord::new(root_id, "Mill", 120.0, date(2025, 3, 5)).with_category(supplies),
        );
        workspace.add_cost_record(CostRecord::new(child_id, "Dairy", 80.0, date(2025, 3, 20)));
        workspace.add_cost_record(CostRecord::new(root_id, "Mill", 50.0, date(2024, 3, 5)));
        workspace.add_income_record(IncomeRecord::new(root_id, 400.0, date(2025, 3, 10)));
        workspace.add_income_record(IncomeRecord::new(child_id, 90.0, date(2024, 3, 12)));
        (workspace, root)
    }

    #[test]
    fn category_totals_cover_only_the_selected_month() {
        let (workspace, actor) = seeded_workspace();
        let summary = DashboardService::dashboard(&workspace, &actor, 2025, 3);

        assert_eq!(summary.per_category.len(), 2);
        let uncategorized = summary
            .per_category
            .iter()
            .find(|entry| entry.category_id.is_none())
            .unwrap();
        assert_eq!(uncategorized.total, 80.0);
        assert_eq!(uncategorized.name, "Uncategorized");

        let april = DashboardService::dashboard(&workspace, &actor, 2025, 4);
        assert!(april.per_category.is_empty());
    }

    #[test]
    fn series_compare_two_consecutive_years() {
        let (workspace, actor) = seeded_workspace();
        let summary = DashboardService::dashboard(&workspace, &actor, 2025, 3);

        assert_eq!(summary.this_year.cost[2], 200.0);
        assert_eq!(summary.this_year.income[2], 400.0);
        assert_eq!(summary.this_year.net_for_month(3), 200.0);
        assert_eq!(summary.last_year.cost[2], 50.0);
        assert_eq!(summary.last_year.income[2], 90.0);
        assert_eq!(summary.this_year.total_net, 200.0);
        assert_eq!(summary.income_this_month, 400.0);
        assert_eq!(summary.income_last_year_same_month, 90.0);
        assert_eq!(summary.available_years, vec![2025, 2024]);
    }

    #[test]
    fn best_and_worst_months_use_first_index_on_ties() {
        let (mut workspace, actor) = seeded_workspace();
        let root_id = actor.id;
        // June matches March's net of 200; March must keep "best".
        workspace.add_income_record(IncomeRecord::new(root_id, 200.0, date(2025, 6, 1)));
        let summary = DashboardService::dashboard(&workspace, &actor, 2025, 3);

        assert_eq!(summary.best_month, 3);
        assert_eq!(summary.best_net, 200.0);
        // Months with no records share net zero; January is the first.
        assert_eq!(summary.worst_month, Some(1));
        assert_eq!(summary.worst_net, 0.0);
    }

    #[test]
    fn sibling_tenant_records_stay_invisible() {
        let (mut workspace, actor) = seeded_workspace();
        let stranger = workspace.add_account(Account::new("Stranger"));
        workspace.add_cost_record(CostRecord::new(stranger, "Mill", 999.0, date(2025, 3, 5)));

        let summary = DashboardService::dashboard(&workspace, &actor, 2025, 3);
        assert_eq!(summary.this_year.cost[2], 200.0);
    }
}
