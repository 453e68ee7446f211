use uuid::Uuid;

use crate::domain::{account::Account, department::Department};
use crate::workspace::Workspace;

use super::{ServiceResult, VisibilityService};

/// Department management. Departments without an owning account are
/// shared and visible to every tenant.
pub struct DepartmentService;

impl DepartmentService {
    pub fn add(
        workspace: &mut Workspace,
        actor: &Account,
        department: Department,
    ) -> ServiceResult<Uuid> {
        if let Some(owner_id) = department.account_id {
            VisibilityService::ensure_visible(workspace, actor, owner_id)?;
        }
        Ok(workspace.add_department(department))
    }

    /// Departments visible to the actor, shared ones included, by name.
    pub fn list<'a>(workspace: &'a Workspace, actor: &Account) -> Vec<&'a Department> {
        let visible = VisibilityService::visible_accounts(workspace, actor);
        let mut departments: Vec<&Department> = workspace
            .departments
            .iter()
            .filter(|dept| dept.account_id.map_or(true, |owner| visible.contains(&owner)))
            .collect();
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        departments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ServiceError;

    #[test]
    fn shared_departments_are_visible_to_every_tenant() {
        let mut workspace = Workspace::new("Departments");
        let root = Account::new("Owner");
        let root_id = workspace.add_account(root.clone());
        workspace.add_department(Department::shared("Packaging"));
        workspace.add_department(Department::new("Bakery", root_id));
        let stranger_id = workspace.add_account(Account::new("Stranger"));
        workspace.add_department(Department::new("Hidden", stranger_id));

        let names: Vec<&str> = DepartmentService::list(&workspace, &root)
            .iter()
            .map(|dept| dept.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bakery", "Packaging"]);
    }

    #[test]
    fn foreign_owner_is_rejected() {
        let mut workspace = Workspace::new("Departments");
        let root = Account::new("Owner");
        workspace.add_account(root.clone());
        let stranger_id = workspace.add_account(Account::new("Stranger"));

        let err = DepartmentService::add(
            &mut workspace,
            &root,
            Department::new("Foreign", stranger_id),
        )
        .expect_err("foreign department owner must be rejected");
        assert!(matches!(err, ServiceError::Authorization(_)));
    }
}
