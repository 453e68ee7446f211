//! Raw cost and income records and their categories.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A single cost entry owned by one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub supplier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub amount: f64,
    pub due_date: NaiveDate,
    /// None means uncategorized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
}

impl CostRecord {
    pub fn new(
        account_id: Uuid,
        supplier: impl Into<String>,
        amount: f64,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            supplier: supplier.into(),
            identifier: None,
            amount,
            due_date,
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

impl Identifiable for CostRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// A single income entry owned by one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
}

impl IncomeRecord {
    pub fn new(account_id: Uuid, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            identifier: None,
            amount,
            date,
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

impl Identifiable for IncomeRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// A cost category. Categories without an owning account are global and
/// visible to all tenants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostCategory {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
}

impl CostCategory {
    pub fn new(name: impl Into<String>, account_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            account_id: Some(account_id),
        }
    }

    pub fn global(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            account_id: None,
        }
    }
}

impl Identifiable for CostCategory {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for CostCategory {
    fn name(&self) -> &str {
        &self.name
    }
}

/// An income category, with the same global/tenant ownership rule as
/// `CostCategory`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeCategory {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
}

impl IncomeCategory {
    pub fn new(name: impl Into<String>, account_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            account_id: Some(account_id),
        }
    }

    pub fn global(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            account_id: None,
        }
    }
}

impl Identifiable for IncomeCategory {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for IncomeCategory {
    fn name(&self) -> &str {
        &self.name
    }
}
