use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A purchasable ingredient, priced per kilogram. An ingredient carrying
/// a `recipe_id` back-link is the shadow entry of that recipe: the recipe
/// exposed as a component for other recipes. At most one shadow entry
/// exists per (recipe, owning account) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub price_per_kg: f64,
    pub account_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<Uuid>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, price_per_kg: f64, account_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price_per_kg,
            account_id,
            recipe_id: None,
        }
    }

    /// Marks this ingredient as the shadow entry of a recipe.
    pub fn shadow_of(mut self, recipe_id: Uuid) -> Self {
        self.recipe_id = Some(recipe_id);
        self
    }

    pub fn is_shadow(&self) -> bool {
        self.recipe_id.is_some()
    }
}

impl Identifiable for Ingredient {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Ingredient {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Ingredient {
    fn display_label(&self) -> String {
        format!("{} ({:.2}/kg)", self.name, self.price_per_kg)
    }
}
