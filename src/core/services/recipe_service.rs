//! Recipe write path: create, update, delete, duplicate, and the
//! shadow-ingredient lifecycle.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    account::Account,
    ingredient::Ingredient,
    recipe::{Recipe, RecipeDraft},
    summary::CostBreakdown,
};
use crate::utils::rounding::round2;
use crate::workspace::Workspace;

use super::{
    LaborRateService, RecipeCostService, ServiceError, ServiceResult, VisibilityService,
};

/// Validated CRUD for recipes. Create and update validate every referent
/// before the first mutation, so a rejected draft leaves the workspace in
/// its prior state: no partial line sets, no stray shadow ingredients.
pub struct RecipeService;

impl RecipeService {
    /// Creates a recipe owned by the actor. The declared totals and
    /// margins in the draft are persisted verbatim; only the unit
    /// ingredient cost is computed here.
    pub fn create(
        workspace: &mut Workspace,
        actor: &Account,
        draft: RecipeDraft,
    ) -> ServiceResult<Uuid> {
        Self::validate_draft(workspace, actor, &draft, None)?;
        let unit_ingredient_cost = Self::unit_ingredient_cost(workspace, &draft);
        let recipe = Recipe::from_draft(actor.id, draft, unit_ingredient_cost);
        let recipe_id = workspace.add_recipe(recipe);
        Self::sync_shadow(workspace, recipe_id);
        tracing::info!(recipe = %recipe_id, owner = %actor.id, "created recipe");
        Ok(recipe_id)
    }

    /// Updates a recipe from a fresh draft. The full line set is deleted
    /// and re-created; lines are never patched in place.
    pub fn update(
        workspace: &mut Workspace,
        actor: &Account,
        recipe_id: Uuid,
        draft: RecipeDraft,
    ) -> ServiceResult<()> {
        let owner_id = workspace
            .recipe(recipe_id)
            .ok_or_else(|| ServiceError::Invalid("Recipe not found".into()))?
            .account_id;
        VisibilityService::ensure_visible(workspace, actor, owner_id)?;
        Self::validate_draft(workspace, actor, &draft, Some(recipe_id))?;
        let unit_ingredient_cost = Self::unit_ingredient_cost(workspace, &draft);

        let recipe = workspace
            .recipe_mut(recipe_id)
            .ok_or_else(|| ServiceError::Invalid("Recipe not found".into()))?;
        recipe.name = draft.name;
        recipe.category_id = draft.category_id;
        recipe.department_id = draft.department_id;
        recipe.sell_mode = draft.sell_mode;
        recipe.labor_cost_mode = draft.labor_cost_mode;
        recipe.labour_minutes = draft.labour_minutes;
        recipe.total_pieces = draft.total_pieces;
        recipe.recipe_weight_g = draft.recipe_weight_g;
        recipe.packing_cost = draft.packing_cost;
        recipe.selling_price_per_piece = draft.selling_price_per_piece;
        recipe.selling_price_per_kg = draft.selling_price_per_kg;
        recipe.production_cost_per_kg = draft.production_cost_per_kg;
        recipe.declared_total_cost = draft.declared_total_cost;
        recipe.declared_margin = draft.declared_margin;
        recipe.declared_margin_pct = draft.declared_margin_pct;
        recipe.vat_rate = draft.vat_rate;
        recipe.expose_as_ingredient = draft.expose_as_ingredient;
        recipe.unit_ingredient_cost = unit_ingredient_cost;
        recipe.lines = draft.lines;
        recipe.updated_at = Utc::now();
        workspace.touch();
        Self::sync_shadow(workspace, recipe_id);
        Ok(())
    }

    /// Removes a recipe together with its lines and shadow ingredient.
    pub fn delete(
        workspace: &mut Workspace,
        actor: &Account,
        recipe_id: Uuid,
    ) -> ServiceResult<Recipe> {
        let owner_id = workspace
            .recipe(recipe_id)
            .ok_or_else(|| ServiceError::Invalid("Recipe not found".into()))?
            .account_id;
        VisibilityService::ensure_visible(workspace, actor, owner_id)?;
        workspace.remove_shadow_ingredient(recipe_id, owner_id);
        workspace
            .remove_recipe(recipe_id)
            .ok_or_else(|| ServiceError::Invalid("Recipe not found".into()))
    }

    /// Duplicates a recipe and its lines under a fresh identity. The copy
    /// starts unexposed: it has no shadow ingredient until it is edited
    /// and saved with the flag set.
    pub fn duplicate(
        workspace: &mut Workspace,
        actor: &Account,
        recipe_id: Uuid,
    ) -> ServiceResult<Uuid> {
        let source = workspace
            .recipe(recipe_id)
            .ok_or_else(|| ServiceError::Invalid("Recipe not found".into()))?
            .clone();
        VisibilityService::ensure_visible(workspace, actor, source.account_id)?;

        let now = Utc::now();
        let mut copy = source;
        copy.id = Uuid::new_v4();
        copy.name = format!("Copy of {}", copy.name);
        copy.expose_as_ingredient = false;
        copy.created_at = now;
        copy.updated_at = now;
        Ok(workspace.add_recipe(copy))
    }

    /// Recipes visible to the actor.
    pub fn list<'a>(workspace: &'a Workspace, actor: &Account) -> Vec<&'a Recipe> {
        let visible = VisibilityService::visible_accounts(workspace, actor);
        workspace
            .recipes
            .iter()
            .filter(|recipe| visible.contains(&recipe.account_id))
            .collect()
    }

    /// Visible recipes with their display costs recomputed against the
    /// latest prices and rates, as the list render requires.
    pub fn list_with_costs<'a>(
        workspace: &'a Workspace,
        actor: &Account,
    ) -> Vec<(&'a Recipe, CostBreakdown)> {
        Self::list(workspace, actor)
            .into_iter()
            .map(|recipe| {
                let root_id = workspace
                    .account(recipe.account_id)
                    .map(|owner| owner.group_root_id())
                    .unwrap_or(recipe.account_id);
                let rate = LaborRateService::effective_rate(
                    workspace,
                    root_id,
                    Some(recipe.department_id),
                );
                let breakdown = RecipeCostService::compute(workspace, recipe, &rate);
                (recipe, breakdown)
            })
            .collect()
    }

    fn unit_ingredient_cost(workspace: &Workspace, draft: &RecipeDraft) -> f64 {
        let batch = RecipeCostService::batch_ingredient_cost(workspace, &draft.lines);
        let divisor = RecipeCostService::divisor(
            draft.sell_mode,
            draft.total_pieces,
            draft.recipe_weight_g,
            &draft.lines,
        );
        round2(batch / divisor)
    }

    fn validate_draft(
        workspace: &Workspace,
        actor: &Account,
        draft: &RecipeDraft,
        existing: Option<Uuid>,
    ) -> ServiceResult<()> {
        let visible = VisibilityService::visible_accounts(workspace, actor);

        let category = workspace
            .recipe_category(draft.category_id)
            .ok_or_else(|| ServiceError::Invalid("Recipe category not found".into()))?;
        if let Some(owner) = category.account_id {
            if !visible.contains(&owner) {
                return Err(ServiceError::Authorization(
                    "Recipe category is not available to this account".into(),
                ));
            }
        }

        let department = workspace
            .department(draft.department_id)
            .ok_or_else(|| ServiceError::Invalid("Department not found".into()))?;
        if let Some(owner) = department.account_id {
            if !visible.contains(&owner) {
                return Err(ServiceError::Authorization(
                    "Department is not available to this account".into(),
                ));
            }
        }

        if draft.lines.is_empty() {
            return Err(ServiceError::Invalid(
                "Recipe needs at least one ingredient line".into(),
            ));
        }
        for line in &draft.lines {
            let ingredient = workspace.ingredient(line.ingredient_id).ok_or_else(|| {
                ServiceError::Invalid(format!("Ingredient {} not found", line.ingredient_id))
            })?;
            if !visible.contains(&ingredient.account_id) {
                return Err(ServiceError::Authorization(format!(
                    "Ingredient `{}` is not available to this account",
                    ingredient.name
                )));
            }
            if existing.is_some() && ingredient.recipe_id == existing {
                return Err(ServiceError::Invalid(format!(
                    "Recipe cannot list its own shadow ingredient `{}`",
                    ingredient.name
                )));
            }
        }
        Ok(())
    }

    /// Aligns the shadow ingredient with the recipe's expose flag:
    /// upserted at the declared production cost when set, removed when
    /// cleared. Keyed by (recipe, owning account).
    fn sync_shadow(workspace: &mut Workspace, recipe_id: Uuid) {
        let Some(recipe) = workspace.recipe(recipe_id) else {
            return;
        };
        let account_id = recipe.account_id;
        let name = recipe.name.clone();
        let price_per_kg = recipe.production_cost_per_kg;
        let expose = recipe.expose_as_ingredient;

        if expose {
            let position = workspace
                .ingredients
                .iter()
                .position(|ing| ing.recipe_id == Some(recipe_id) && ing.account_id == account_id);
            match position {
                Some(index) => {
                    let shadow = &mut workspace.ingredients[index];
                    shadow.name = name;
                    shadow.price_per_kg = price_per_kg;
                    workspace.touch();
                }
                None => {
                    workspace.add_ingredient(
                        Ingredient::new(name, price_per_kg, account_id).shadow_of(recipe_id),
                    );
                }
            }
        } else {
            workspace.remove_shadow_ingredient(recipe_id, account_id);
        }
    }
}
