use std::collections::BTreeSet;

use uuid::Uuid;

use crate::domain::account::Account;
use crate::workspace::Workspace;

use super::{ServiceError, ServiceResult};

/// Resolves which accounts' data an actor may see and modify.
pub struct VisibilityService;

impl VisibilityService {
    /// The set of account identifiers visible to the actor: a root sees
    /// itself plus all of its children, a child sees itself plus its
    /// parent. Always non-empty and always contains the actor.
    pub fn visible_accounts(workspace: &Workspace, actor: &Account) -> BTreeSet<Uuid> {
        let mut visible = BTreeSet::new();
        visible.insert(actor.id);
        match actor.parent_id {
            None => {
                for child in workspace.children_of(actor.id) {
                    visible.insert(child.id);
                }
            }
            Some(parent_id) => {
                visible.insert(parent_id);
            }
        }
        visible
    }

    /// Rejects an operation targeting an owner outside the actor's
    /// visible set before any computation proceeds.
    pub fn ensure_visible(
        workspace: &Workspace,
        actor: &Account,
        owner_id: Uuid,
    ) -> ServiceResult<()> {
        if Self::visible_accounts(workspace, actor).contains(&owner_id) {
            Ok(())
        } else {
            Err(ServiceError::Authorization(format!(
                "account {} is outside the visible set of `{}`",
                owner_id, actor.name
            )))
        }
    }
}
