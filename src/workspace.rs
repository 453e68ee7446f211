use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    account::Account,
    department::Department,
    ingredient::Ingredient,
    rate::RateRecord,
    recipe::{Recipe, RecipeCategory},
    records::{CostCategory, CostRecord, IncomeCategory, IncomeRecord},
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The record store for one organization group: every entity the engine
/// reads or writes lives here. Services borrow the workspace for the
/// duration of a computation, which is what gives each invocation its
/// point-in-time snapshot of prices and rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub rate_records: Vec<RateRecord>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub recipe_categories: Vec<RecipeCategory>,
    #[serde(default)]
    pub cost_records: Vec<CostRecord>,
    #[serde(default)]
    pub income_records: Vec<IncomeRecord>,
    #[serde(default)]
    pub cost_categories: Vec<CostCategory>,
    #[serde(default)]
    pub income_categories: Vec<IncomeCategory>,
    #[serde(default)]
    next_rate_version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Workspace::schema_version_default")]
    pub schema_version: u8,
}

impl Workspace {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            accounts: Vec::new(),
            departments: Vec::new(),
            rate_records: Vec::new(),
            ingredients: Vec::new(),
            recipes: Vec::new(),
            recipe_categories: Vec::new(),
            cost_records: Vec::new(),
            income_records: Vec::new(),
            cost_categories: Vec::new(),
            income_categories: Vec::new(),
            next_rate_version: 0,
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Child accounts of the given root.
    pub fn children_of(&self, root_id: Uuid) -> impl Iterator<Item = &Account> {
        self.accounts
            .iter()
            .filter(move |account| account.parent_id == Some(root_id))
    }

    pub fn add_department(&mut self, department: Department) -> Uuid {
        let id = department.id;
        self.departments.push(department);
        self.touch();
        id
    }

    pub fn department(&self, id: Uuid) -> Option<&Department> {
        self.departments.iter().find(|dept| dept.id == id)
    }

    /// Appends a rate record, stamping the next monotonic version.
    /// Returns the stamped version.
    pub fn add_rate_record(&mut self, mut record: RateRecord) -> u64 {
        self.next_rate_version += 1;
        record.version = self.next_rate_version;
        self.rate_records.push(record);
        self.touch();
        self.next_rate_version
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) -> Uuid {
        let id = ingredient.id;
        self.ingredients.push(ingredient);
        self.touch();
        id
    }

    pub fn ingredient(&self, id: Uuid) -> Option<&Ingredient> {
        self.ingredients.iter().find(|ing| ing.id == id)
    }

    pub fn ingredient_mut(&mut self, id: Uuid) -> Option<&mut Ingredient> {
        self.ingredients.iter_mut().find(|ing| ing.id == id)
    }

    /// The shadow ingredient derived from a recipe for an owning account,
    /// if the recipe is currently exposed.
    pub fn shadow_ingredient(&self, recipe_id: Uuid, account_id: Uuid) -> Option<&Ingredient> {
        self.ingredients
            .iter()
            .find(|ing| ing.recipe_id == Some(recipe_id) && ing.account_id == account_id)
    }

    pub fn remove_shadow_ingredient(&mut self, recipe_id: Uuid, account_id: Uuid) -> bool {
        let before = self.ingredients.len();
        self.ingredients
            .retain(|ing| !(ing.recipe_id == Some(recipe_id) && ing.account_id == account_id));
        let removed = self.ingredients.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn add_recipe(&mut self, recipe: Recipe) -> Uuid {
        let id = recipe.id;
        self.recipes.push(recipe);
        self.touch();
        id
    }

    pub fn recipe(&self, id: Uuid) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    pub fn recipe_mut(&mut self, id: Uuid) -> Option<&mut Recipe> {
        self.recipes.iter_mut().find(|recipe| recipe.id == id)
    }

    pub fn remove_recipe(&mut self, id: Uuid) -> Option<Recipe> {
        let index = self.recipes.iter().position(|recipe| recipe.id == id)?;
        let removed = self.recipes.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn add_recipe_category(&mut self, category: RecipeCategory) -> Uuid {
        let id = category.id;
        self.recipe_categories.push(category);
        self.touch();
        id
    }

    pub fn recipe_category(&self, id: Uuid) -> Option<&RecipeCategory> {
        self.recipe_categories.iter().find(|cat| cat.id == id)
    }

    pub fn add_cost_record(&mut self, record: CostRecord) -> Uuid {
        let id = record.id;
        self.cost_records.push(record);
        self.touch();
        id
    }

    pub fn cost_record(&self, id: Uuid) -> Option<&CostRecord> {
        self.cost_records.iter().find(|record| record.id == id)
    }

    pub fn cost_record_mut(&mut self, id: Uuid) -> Option<&mut CostRecord> {
        self.cost_records.iter_mut().find(|record| record.id == id)
    }

    pub fn remove_cost_record(&mut self, id: Uuid) -> Option<CostRecord> {
        let index = self.cost_records.iter().position(|record| record.id == id)?;
        let removed = self.cost_records.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn add_income_record(&mut self, record: IncomeRecord) -> Uuid {
        let id = record.id;
        self.income_records.push(record);
        self.touch();
        id
    }

    pub fn income_record(&self, id: Uuid) -> Option<&IncomeRecord> {
        self.income_records.iter().find(|record| record.id == id)
    }

    pub fn income_record_mut(&mut self, id: Uuid) -> Option<&mut IncomeRecord> {
        self.income_records.iter_mut().find(|record| record.id == id)
    }

    pub fn remove_income_record(&mut self, id: Uuid) -> Option<IncomeRecord> {
        let index = self
            .income_records
            .iter()
            .position(|record| record.id == id)?;
        let removed = self.income_records.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn add_cost_category(&mut self, category: CostCategory) -> Uuid {
        let id = category.id;
        self.cost_categories.push(category);
        self.touch();
        id
    }

    pub fn cost_category(&self, id: Uuid) -> Option<&CostCategory> {
        self.cost_categories.iter().find(|cat| cat.id == id)
    }

    pub fn add_income_category(&mut self, category: IncomeCategory) -> Uuid {
        let id = category.id;
        self.income_categories.push(category);
        self.touch();
        id
    }

    pub fn income_category(&self, id: Uuid) -> Option<&IncomeCategory> {
        self.income_categories.iter().find(|cat| cat.id == id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn current_schema_version() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
