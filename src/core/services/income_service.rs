//! Validated CRUD for income records under tenant visibility.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::domain::{
    account::Account,
    records::{IncomeCategory, IncomeRecord},
};
use crate::workspace::Workspace;

use super::{ServiceError, ServiceResult, VisibilityService};

pub struct IncomeService;

impl IncomeService {
    /// Adds an income record under the same ownership and category rules
    /// as costs.
    pub fn add(
        workspace: &mut Workspace,
        actor: &Account,
        record: IncomeRecord,
    ) -> ServiceResult<Uuid> {
        VisibilityService::ensure_visible(workspace, actor, record.account_id)?;
        Self::ensure_category_allowed(workspace, actor, record.category_id)?;
        Ok(workspace.add_income_record(record))
    }

    pub fn edit(
        workspace: &mut Workspace,
        actor: &Account,
        id: Uuid,
        changes: IncomeRecord,
    ) -> ServiceResult<()> {
        let owner_id = workspace
            .income_record(id)
            .ok_or_else(|| ServiceError::Invalid("Income record not found".into()))?
            .account_id;
        VisibilityService::ensure_visible(workspace, actor, owner_id)?;
        Self::ensure_category_allowed(workspace, actor, changes.category_id)?;

        let record = workspace
            .income_record_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Income record not found".into()))?;
        record.identifier = changes.identifier;
        record.amount = changes.amount;
        record.date = changes.date;
        record.category_id = changes.category_id;
        workspace.touch();
        Ok(())
    }

    pub fn remove(
        workspace: &mut Workspace,
        actor: &Account,
        id: Uuid,
    ) -> ServiceResult<IncomeRecord> {
        let owner_id = workspace
            .income_record(id)
            .ok_or_else(|| ServiceError::Invalid("Income record not found".into()))?
            .account_id;
        VisibilityService::ensure_visible(workspace, actor, owner_id)?;
        workspace
            .remove_income_record(id)
            .ok_or_else(|| ServiceError::Invalid("Income record not found".into()))
    }

    /// Income records visible to the actor, newest first.
    pub fn list<'a>(workspace: &'a Workspace, actor: &Account) -> Vec<&'a IncomeRecord> {
        let visible = VisibilityService::visible_accounts(workspace, actor);
        let mut records: Vec<&IncomeRecord> = workspace
            .income_records
            .iter()
            .filter(|record| visible.contains(&record.account_id))
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    pub fn allowed_category_ids(workspace: &Workspace, actor: &Account) -> BTreeSet<Uuid> {
        let visible = VisibilityService::visible_accounts(workspace, actor);
        workspace
            .income_categories
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
    pub fn categories_for<'a>(
        workspace: &'a Workspace,
        actor: &Account,
    ) -> Vec<&'a IncomeCategory> {
        let allowed = Self::allowed_category_ids(workspace, actor);
        let mut categories: Vec<&IncomeCategory> = workspace
            .income_categories
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
        if workspace.income_category(id).is_none() {
            return Err(ServiceError::Invalid("Income category not found".into()));
        }
        if Self::allowed_category_ids(workspace, actor).contains(&id) {
            Ok(())
        } else {
            Err(ServiceError::Authorization(
                "Income category is not available to this account".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn uncategorized_income_is_always_accepted() {
        let mut workspace = Workspace::new("Income");
        let root = Account::new("Owner");
        let root_id = workspace.add_account(root.clone());

        IncomeService::add(
            &mut workspace,
            &root,
            IncomeRecord::new(root_id, 120.0, date(2025, 4, 2)),
        )
        .expect("uncategorized income is valid");
    }

    #[test]
    fn parent_can_edit_child_income() {
        let mut workspace = Workspace::new("Income");
        let root = Account::new("Owner");
        let root_id = workspace.add_account(root.clone());
        let child_id = workspace.add_account(Account::child_of("Member", root_id));
        let record_id =
            workspace.add_income_record(IncomeRecord::new(child_id, 75.0, date(2025, 4, 2)));

        let changes = IncomeRecord::new(child_id, 95.0, date(2025, 4, 3));
        IncomeService::edit(&mut workspace, &root, record_id, changes)
            .expect("parent may edit child records");
        assert_eq!(workspace.income_record(record_id).unwrap().amount, 95.0);
    }

    #[test]
    fn categories_for_lists_global_entries_first() {
        let mut workspace = Workspace::new("Income");
        let root = Account::new("Owner");
        let root_id = workspace.add_account(root.clone());
        workspace.add_income_category(IncomeCategory::new("Wholesale", root_id));
        workspace.add_income_category(IncomeCategory::global("Retail"));

        let names: Vec<&str> = IncomeService::categories_for(&workspace, &root)
            .iter()
            .map(|category| category.name.as_str())
            .collect();
        assert_eq!(names, vec!["Retail", "Wholesale"]);
    }
}
