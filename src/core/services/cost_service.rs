//! Validated CRUD for cost records under tenant visibility.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::domain::{
    account::Account,
    records::{CostCategory, CostRecord},
};
use crate::workspace::Workspace;

use super::{ServiceError, ServiceResult, VisibilityService};

pub struct CostService;

impl CostService {
    /// Adds a cost record. The owner must be visible to the actor and the
    /// selected category must be in the actor's allowed set.
    pub fn add(workspace: &mut Workspace, actor: &Account, record: CostRecord) -> ServiceResult<Uuid> {
        VisibilityService::ensure_visible(workspace, actor, record.account_id)?;
        Self::ensure_category_allowed(workspace, actor, record.category_id)?;
        Ok(workspace.add_cost_record(record))
    }

    /// Updates the record identified by `id` with the provided field values.
    pub fn edit(
        workspace: &mut Workspace,
        actor: &Account,
        id: Uuid,
        changes: CostRecord,
    ) -> ServiceResult<()> {
        let owner_id = workspace
            .cost_record(id)
            .ok_or_else(|| ServiceError::Invalid("Cost record not found".into()))?
            .account_id;
        VisibilityService::ensure_visible(workspace, actor, owner_id)?;
        Self::ensure_category_allowed(workspace, actor, changes.category_id)?;

        let record = workspace
            .cost_record_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Cost record not found".into()))?;
        record.supplier = changes.supplier;
        record.identifier = changes.identifier;
        record.amount = changes.amount;
        record.due_date = changes.due_date;
        record.category_id = changes.category_id;
        workspace.touch();
        Ok(())
    }

    /// Removes the record identified by `id`, returning the removed instance.
    pub fn remove(
        workspace: &mut Workspace,
        actor: &Account,
        id: Uuid,
    ) -> ServiceResult<CostRecord> {
        let owner_id = workspace
            .cost_record(id)
            .ok_or_else(|| ServiceError::Invalid("Cost record not found".into()))?
            .account_id;
        VisibilityService::ensure_visible(workspace, actor, owner_id)?;
        workspace
            .remove_cost_record(id)
            .ok_or_else(|| ServiceError::Invalid("Cost record not found".into()))
    }

    /// Cost records visible to the actor, newest due date first.
    pub fn list<'a>(workspace: &'a Workspace, actor: &Account) -> Vec<&'a CostRecord> {
        let visible = VisibilityService::visible_accounts(workspace, actor);
        let mut records: Vec<&CostRecord> = workspace
            .cost_records
            .iter()
            .filter(|record| visible.contains(&record.account_id))
            .collect();
        records.sort_by(|a, b| b.due_date.cmp(&a.due_date));
        records
    }

    /// Category ids the actor may assign: global categories plus those
    /// owned by a visible account.
    pub fn allowed_category_ids(workspace: &Workspace, actor: &Account) -> BTreeSet<Uuid> {
        let visible = VisibilityService::visible_accounts(workspace, actor);
        workspace
            .cost_categories
            .iter()
            .filter(|category| {
                category
                    .account_id
                    .map_or(true, |owner| visible.contains(&owner))
            })
            .map(|category| category.id)
            .collect()
    }

    /// Categories for selection, global entries first, then by name.
    pub fn categories_for<'a>(workspace: &'a Workspace, actor: &Account) -> Vec<&'a CostCategory> {
        let allowed = Self::allowed_category_ids(workspace, actor);
        let mut categories: Vec<&CostCategory> = workspace
            .cost_categories
            .iter()
            .filter(|category| allowed.contains(&category.id))
            .collect();
        categories.sort_by_key(|category| (category.account_id.is_some(), category.name.clone()));
        categories
    }

    fn ensure_category_allowed(
        workspace: &Workspace,
        actor: &Account,
        category_id: Option<Uuid>,
    ) -> ServiceResult<()> {
        let Some(id) = category_id else {
            return Ok(());
        };
        if workspace.cost_category(id).is_none() {
            return Err(ServiceError::Invalid("Cost category not found".into()));
        }
        if Self::allowed_category_ids(workspace, actor).contains(&id) {
            Ok(())
        } else {
            Err(ServiceError::Authorization(
                "Cost category is not available to this account".into(),
            ))
        }
    }
}
