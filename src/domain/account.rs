use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A tenant account. Roots own their data directly; children share data
/// with their parent. The hierarchy is one level deep: a child's parent
/// is always a root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
}

impl Account {
    /// Creates a new root account.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parent_id: None,
        }
    }

    /// Creates a child of the given root account.
    pub fn child_of(name: impl Into<String>, parent_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parent_id: Some(parent_id),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// The root of this account's group: itself, or its parent.
    pub fn group_root_id(&self) -> Uuid {
        self.parent_id.unwrap_or(self.id)
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        match self.parent_id {
            None => format!("{} (root)", self.name),
            Some(_) => format!("{} (member)", self.name),
        }
    }
}
