use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A production department. Departments without an owning account are
/// shared across all tenants. The share percent is carried for callers
/// and never interpreted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default)]
    pub share_percent: f64,
}

impl Department {
    pub fn new(name: impl Into<String>, account_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            account_id: Some(account_id),
            share_percent: 0.0,
        }
    }

    /// Creates a department shared across all tenants.
    pub fn shared(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            account_id: None,
            share_percent: 0.0,
        }
    }

    pub fn with_share_percent(mut self, share_percent: f64) -> Self {
        self.share_percent = share_percent;
        self
    }
}

impl Identifiable for Department {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Department {
    fn name(&self) -> &str {
        &self.name
    }
}
