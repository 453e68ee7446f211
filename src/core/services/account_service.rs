use uuid::Uuid;

use crate::domain::account::Account;
use crate::workspace::Workspace;

use super::{ServiceError, ServiceResult};

/// Registration and lookup for tenant accounts. The hierarchy is one
/// level deep: a child's parent must itself be a root.
pub struct AccountService;

impl AccountService {
    pub fn add(workspace: &mut Workspace, account: Account) -> ServiceResult<Uuid> {
        Self::validate_name(workspace, None, &account.name)?;
        if let Some(parent_id) = account.parent_id {
            Self::validate_parent(workspace, parent_id)?;
        }
        Ok(workspace.add_account(account))
    }

    pub fn list<'a>(workspace: &'a Workspace) -> Vec<&'a Account> {
        workspace.accounts.iter().collect()
    }

    fn validate_name(
        workspace: &Workspace,
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> ServiceResult<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = workspace.accounts.iter().any(|account| {
            let name = account.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| account.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Account `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }

    fn validate_parent(workspace: &Workspace, parent_id: Uuid) -> ServiceResult<()> {
        let parent = workspace
            .account(parent_id)
            .ok_or_else(|| ServiceError::Invalid("Parent account not found".into()))?;
        if parent.is_root() {
            Ok(())
        } else {
            Err(ServiceError::Invalid(
                "Accounts cannot nest below a child account".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grandchild_accounts_are_rejected() {
        let mut workspace = Workspace::new("Accounts");
        let root_id = AccountService::add(&mut workspace, Account::new("Owner")).unwrap();
        let child_id =
            AccountService::add(&mut workspace, Account::child_of("Member", root_id)).unwrap();

        let err = AccountService::add(&mut workspace, Account::child_of("Nested", child_id))
            .expect_err("grandchild must be rejected");
        assert!(matches!(err, ServiceError::Invalid(ref message) if message.contains("nest")));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut workspace = Workspace::new("Accounts");
        AccountService::add(&mut workspace, Account::new("Owner")).unwrap();
        let err = AccountService::add(&mut workspace, Account::new(" owner "))
            .expect_err("duplicate name must be rejected");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn missing_parent_is_rejected() {
        let mut workspace = Workspace::new("Accounts");
        let err = AccountService::add(&mut workspace, Account::child_of("Orphan", Uuid::new_v4()))
            .expect_err("unknown parent must be rejected");
        assert!(matches!(err, ServiceError::Invalid(ref message) if message.contains("not found")));
    }
}
