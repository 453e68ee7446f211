//! Recipe unit-cost computation under the two sell modes.

use crate::domain::{
    ingredient::Ingredient,
    recipe::{LaborCostMode, Recipe, RecipeIngredientLine, SellMode},
    summary::{CostBreakdown, EffectiveRate},
};
use crate::utils::rounding::{kilogram_divisor, piece_divisor, round2};
use crate::workspace::Workspace;

use super::{LaborRateService, ServiceError, ServiceResult};

/// Computes batch and unit costs for a recipe. Pure: the same inputs
/// always yield the same breakdown, and degenerate quantities resolve to
/// floored divisors instead of errors.
pub struct RecipeCostService;

impl RecipeCostService {
    /// Recomputes the display costs for a recipe against current
    /// ingredient prices and the given resolved rate. Every intermediate
    /// sum is rounded to two decimals before the next step.
    pub fn compute(workspace: &Workspace, recipe: &Recipe, rate: &EffectiveRate) -> CostBreakdown {
        let batch_ingredient_cost = Self::batch_ingredient_cost(workspace, &recipe.lines);

        let divisor = Self::divisor(
            recipe.sell_mode,
            recipe.total_pieces,
            recipe.recipe_weight_g,
            &recipe.lines,
        );
        let unit_ingredient_cost = round2(batch_ingredient_cost / divisor);

        let per_minute = match recipe.labor_cost_mode {
            LaborCostMode::External => rate.external,
            LaborCostMode::Shop => rate.shop,
        };
        let batch_labor_cost = round2(recipe.labour_minutes * per_minute);
        let unit_labor_cost = round2(batch_labor_cost / divisor);

        // Packing is per piece in piece mode but already per kilogram in
        // weight mode, so it is not divided there.
        let unit_packing_cost = match recipe.sell_mode {
            SellMode::Piece => round2(recipe.packing_cost / divisor),
            SellMode::Weight => round2(recipe.packing_cost),
        };

        let total_unit_cost = round2(unit_ingredient_cost + unit_labor_cost + unit_packing_cost);

        CostBreakdown {
            batch_ingredient_cost,
            unit_ingredient_cost,
            batch_labor_cost,
            unit_labor_cost,
            unit_packing_cost,
            total_unit_cost,
        }
    }

    /// Read-path entry point: resolves the owner's effective rate for the
    /// recipe's department, then recomputes the breakdown against current
    /// prices. Invoked on every list/show render; stored display values
    /// are never trusted.
    pub fn cost_breakdown(workspace: &Workspace, recipe_id: uuid::Uuid) -> ServiceResult<CostBreakdown> {
        let recipe = workspace
            .recipe(recipe_id)
            .ok_or_else(|| ServiceError::Invalid("Recipe not found".into()))?;
        let owner = workspace
            .account(recipe.account_id)
            .ok_or_else(|| ServiceError::Invalid("Recipe owner not found".into()))?;
        let rate = LaborRateService::effective_rate(
            workspace,
            owner.group_root_id(),
            Some(recipe.department_id),
        );
        Ok(Self::compute(workspace, recipe, &rate))
    }

    /// Price quote for a single ingredient line: price per kilogram
    /// applied to a quantity in grams, two decimals.
    pub fn line_cost(ingredient: &Ingredient, quantity_g: f64) -> f64 {
        round2(ingredient.price_per_kg / 1000.0 * quantity_g)
    }

    /// Batch ingredient cost from current prices; a missing ingredient
    /// contributes zero.
    pub(crate) fn batch_ingredient_cost(
        workspace: &Workspace,
        lines: &[RecipeIngredientLine],
    ) -> f64 {
        let sum: f64 = lines
            .iter()
            .map(|line| {
                let price_per_kg = workspace
                    .ingredient(line.ingredient_id)
                    .map(|ing| ing.price_per_kg)
                    .unwrap_or(0.0);
                line.quantity_g / 1000.0 * price_per_kg
            })
            .sum();
        round2(sum)
    }

    /// The divisor shared by every per-unit figure: pieces floored at
    /// one, or kilograms floored at one gram, with the declared weight
    /// falling back to the summed line weights.
    pub(crate) fn divisor(
        sell_mode: SellMode,
        total_pieces: u32,
        recipe_weight_g: f64,
        lines: &[RecipeIngredientLine],
    ) -> f64 {
        match sell_mode {
            SellMode::Piece => piece_divisor(total_pieces),
            SellMode::Weight => {
                let weight_g = if recipe_weight_g > 0.0 {
                    recipe_weight_g
                } else {
                    lines.iter().map(|line| line.quantity_g).sum()
                };
                kilogram_divisor(weight_g)
            }
        }
    }
}
