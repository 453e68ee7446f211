//! Labor-rate resolution across the department hierarchy.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::domain::{account::Account, rate::RateRecord, summary::EffectiveRate};
use crate::utils::rounding::round6;
use crate::workspace::Workspace;

use super::{ServiceError, ServiceResult, VisibilityService};

/// Resolves effective shop/external per-minute rates and records new
/// rate entries.
pub struct LaborRateService;

impl LaborRateService {
    /// The effective rate for a root account and optional department.
    ///
    /// The most recent department override wins over the most recent
    /// global record, but only when at least one of its two rates is
    /// strictly positive. An accepted override is returned verbatim as a
    /// pair: a zero in its other field is kept, never back-filled from
    /// the global rate. Absent data resolves to zero rates, never a
    /// failure.
    pub fn effective_rate(
        workspace: &Workspace,
        root_id: Uuid,
        department_id: Option<Uuid>,
    ) -> EffectiveRate {
        let global = Self::latest_global(workspace, root_id)
            .map(|record| (record.shop_cost_per_min, record.external_cost_per_min))
            .unwrap_or((0.0, 0.0));

        let Some(department_id) = department_id else {
            return EffectiveRate::global(global.0, global.1);
        };

        match Self::latest_override(workspace, root_id, department_id) {
            Some(record) if record.is_materially_set() => {
                EffectiveRate::overridden(record.shop_cost_per_min, record.external_cost_per_min)
            }
            _ => EffectiveRate::global(global.0, global.1),
        }
    }

    /// The AJAX-style lookup used by recipe forms: the effective rate for
    /// the actor's group root and one department, rounded to six decimal
    /// places for display.
    pub fn department_rates(
        workspace: &Workspace,
        actor: &Account,
        department_id: Uuid,
    ) -> ServiceResult<EffectiveRate> {
        if workspace.department(department_id).is_none() {
            return Err(ServiceError::Invalid("Department not found".into()));
        }
        let rate = Self::effective_rate(workspace, actor.group_root_id(), Some(department_id));
        Ok(EffectiveRate {
            shop: round6(rate.shop),
            external: round6(rate.external),
            source: rate.source,
        })
    }

    /// Effective rates for each listed department plus the global
    /// default, as prefetched for form rendering.
    pub fn rates_by_department(
        workspace: &Workspace,
        root_id: Uuid,
        department_ids: &[Uuid],
    ) -> DepartmentRateMap {
        let per_department = department_ids
            .iter()
            .map(|&dept| {
                (
                    dept,
                    Self::effective_rate(workspace, root_id, Some(dept)),
                )
            })
            .collect();
        DepartmentRateMap {
            default: Self::effective_rate(workspace, root_id, None),
            per_department,
        }
    }

    /// Appends a new rate record for the actor's group. Rates always
    /// belong to the root account; a department scopes the record as an
    /// override. Returns the stamped recency version.
    pub fn record_rate(
        workspace: &mut Workspace,
        actor: &Account,
        department_id: Option<Uuid>,
        shop_cost_per_min: f64,
        external_cost_per_min: f64,
    ) -> ServiceResult<u64> {
        let root_id = actor.group_root_id();
        VisibilityService::ensure_visible(workspace, actor, root_id)?;
        if let Some(dept) = department_id {
            if workspace.department(dept).is_none() {
                return Err(ServiceError::Invalid("Department not found".into()));
            }
        }
        let version = workspace.add_rate_record(RateRecord::new(
            root_id,
            department_id,
            shop_cost_per_min,
            external_cost_per_min,
        ));
        tracing::info!(
            root = %root_id,
            department = ?department_id,
            version,
            "recorded labor rate"
        );
        Ok(version)
    }

    fn latest_global(workspace: &Workspace, root_id: Uuid) -> Option<&RateRecord> {
        workspace
            .rate_records
            .iter()
            .filter(|record| record.account_id == root_id && record.department_id.is_none())
            .max_by_key(|record| record.version)
    }

    fn latest_override(
        workspace: &Workspace,
        root_id: Uuid,
        department_id: Uuid,
    ) -> Option<&RateRecord> {
        workspace
            .rate_records
            .iter()
            .filter(|record| {
                record.account_id == root_id && record.department_id == Some(department_id)
            })
            .max_by_key(|record| record.version)
    }
}

/// Effective rates keyed by department, plus the no-department default.
#[derive(Debug, Clone)]
pub struct DepartmentRateMap {
    pub default: EffectiveRate,
    pub per_department: BTreeMap<Uuid, EffectiveRate>,
}
