use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;

/// A labor-rate record, expressed per minute of work. Records are
/// append-only: a rate change is a new record, never an update. The
/// `version` field is stamped by the workspace from a monotonic counter
/// and is the only recency order the resolvers consult.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateRecord {
    pub id: Uuid,
    #[serde(default)]
    pub version: u64,
    /// Owning root account. Rates are always recorded against the group root.
    pub account_id: Uuid,
    /// None marks the global record for the root; Some scopes an override
    /// to one department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<Uuid>,
    pub shop_cost_per_min: f64,
    pub external_cost_per_min: f64,
    pub created_at: DateTime<Utc>,
}

impl RateRecord {
    pub fn new(
        account_id: Uuid,
        department_id: Option<Uuid>,
        shop_cost_per_min: f64,
        external_cost_per_min: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            account_id,
            department_id,
            shop_cost_per_min,
            external_cost_per_min,
            created_at: Utc::now(),
        }
    }

    /// An override is accepted only when at least one of its two rates is
    /// strictly positive.
    pub fn is_materially_set(&self) -> bool {
        self.shop_cost_per_min > 0.0 || self.external_cost_per_min > 0.0
    }
}

impl Identifiable for RateRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}
