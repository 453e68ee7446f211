//! Domain types for recipes and their ingredient lines.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Pricing basis for a recipe: per finished piece or per kilogram of output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SellMode {
    Piece,
    Weight,
}

impl fmt::Display for SellMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SellMode::Piece => "piece",
            SellMode::Weight => "weight",
        };
        f.write_str(label)
    }
}

/// Which of the two labor rates a recipe is costed against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LaborCostMode {
    Shop,
    External,
}

/// One ingredient line of a recipe, quantity in grams. Lines are owned
/// exclusively by their recipe and are replaced wholesale on update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeIngredientLine {
    pub ingredient_id: Uuid,
    pub quantity_g: f64,
}

impl RecipeIngredientLine {
    pub fn new(ingredient_id: Uuid, quantity_g: f64) -> Self {
        Self {
            ingredient_id,
            quantity_g,
        }
    }
}

/// A recipe category. Categories without an owning account are defaults
/// visible to every tenant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeCategory {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
}

impl RecipeCategory {
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

/// A recipe and its costing inputs.
///
/// The `declared_*` fields, the selling prices, and `production_cost_per_kg`
/// are persisted exactly as submitted by the write path and never
/// recomputed; `unit_ingredient_cost` is the single server-computed field
/// persisted at write time. Display costs are recomputed on every read and
/// never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub department_id: Uuid,
    pub sell_mode: SellMode,
    pub labor_cost_mode: LaborCostMode,
    pub labour_minutes: f64,
    pub total_pieces: u32,
    pub recipe_weight_g: f64,
    pub packing_cost: f64,
    pub selling_price_per_piece: f64,
    pub selling_price_per_kg: f64,
    pub production_cost_per_kg: f64,
    pub declared_total_cost: f64,
    pub declared_margin: f64,
    pub declared_margin_pct: f64,
    pub vat_rate: f64,
    /// When set, the recipe is published as a purchasable shadow
    /// ingredient priced at `production_cost_per_kg`.
    #[serde(default)]
    pub expose_as_ingredient: bool,
    pub unit_ingredient_cost: f64,
    #[serde(default)]
    pub lines: Vec<RecipeIngredientLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Builds a recipe from validated draft fields. The caller supplies
    /// the server-computed unit ingredient cost.
    pub fn from_draft(account_id: Uuid, draft: RecipeDraft, unit_ingredient_cost: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id,
            name: draft.name,
            category_id: draft.category_id,
            department_id: draft.department_id,
            sell_mode: draft.sell_mode,
            labor_cost_mode: draft.labor_cost_mode,
            labour_minutes: draft.labour_minutes,
            total_pieces: draft.total_pieces,
            recipe_weight_g: draft.recipe_weight_g,
            packing_cost: draft.packing_cost,
            selling_price_per_piece: draft.selling_price_per_piece,
            selling_price_per_kg: draft.selling_price_per_kg,
            production_cost_per_kg: draft.production_cost_per_kg,
            declared_total_cost: draft.declared_total_cost,
            declared_margin: draft.declared_margin,
            declared_margin_pct: draft.declared_margin_pct,
            vat_rate: draft.vat_rate,
            expose_as_ingredient: draft.expose_as_ingredient,
            unit_ingredient_cost,
            lines: draft.lines,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of line quantities in grams.
    pub fn lines_weight_g(&self) -> f64 {
        self.lines.iter().map(|line| line.quantity_g).sum()
    }
}

impl Identifiable for Recipe {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Recipe {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Recipe {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.sell_mode)
    }
}

/// Validated form fields for recipe create and update. The write path
/// persists the declared totals and margins verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub name: String,
    pub category_id: Uuid,
    pub department_id: Uuid,
    pub sell_mode: SellMode,
    pub labor_cost_mode: LaborCostMode,
    pub labour_minutes: f64,
    pub total_pieces: u32,
    pub recipe_weight_g: f64,
    pub packing_cost: f64,
    pub selling_price_per_piece: f64,
    pub selling_price_per_kg: f64,
    pub production_cost_per_kg: f64,
    pub declared_total_cost: f64,
    pub declared_margin: f64,
    pub declared_margin_pct: f64,
    pub vat_rate: f64,
    pub expose_as_ingredient: bool,
    pub lines: Vec<RecipeIngredientLine>,
}

impl RecipeDraft {
    /// A minimal draft with zeroed costing fields, useful as a starting
    /// point for builders and tests.
    pub fn new(
        name: impl Into<String>,
        category_id: Uuid,
        department_id: Uuid,
        sell_mode: SellMode,
    ) -> Self {
        Self {
            name: name.into(),
            category_id,
            department_id,
            sell_mode,
            labor_cost_mode: LaborCostMode::Shop,
            labour_minutes: 0.0,
            total_pieces: 0,
            recipe_weight_g: 0.0,
            packing_cost: 0.0,
            selling_price_per_piece: 0.0,
            selling_price_per_kg: 0.0,
            production_cost_per_kg: 0.0,
            declared_total_cost: 0.0,
            declared_margin: 0.0,
            declared_margin_pct: 0.0,
            vat_rate: 0.0,
            expose_as_ingredient: false,
            lines: Vec::new(),
        }
    }

    pub fn with_lines(mut self, lines: Vec<RecipeIngredientLine>) -> Self {
        self.lines = lines;
        self
    }
}
