use costing_core::{
    core::services::{LaborRateService, RecipeService},
    domain::{
        account::Account,
        department::Department,
        ingredient::Ingredient,
        recipe::{RecipeCategory, RecipeDraft, RecipeIngredientLine, SellMode},
    },
    storage::{JsonStorage, StorageBackend},
    workspace::Workspace,
};

use tempfile::tempdir;

fn populated_workspace() -> (Workspace, Account) {
    let mut workspace = Workspace::new("Persisted Bakery");
    let root = Account::new("Owner");
    let root_id = workspace.add_account(root.clone());
    let department = workspace.add_department(Department::new("Bakery", root_id));
    let category = workspace.add_recipe_category(RecipeCategory::new("Breads", root_id));
    let flour = workspace.add_ingredient(Ingredient::new("Flour", 10.0, root_id));

    LaborRateService::record_rate(&mut workspace, &root, None, 0.3, 0.5).unwrap();
    LaborRateService::record_rate(&mut workspace, &root, Some(department), 1.0, 2.0).unwrap();

    let draft = RecipeDraft::new("Loaf", category, department, SellMode::Weight)
        .with_lines(vec![RecipeIngredientLine::new(flour, 500.0)]);
    RecipeService::create(&mut workspace, &root, draft).unwrap();
    (workspace, root)
}

#[test]
fn workspace_roundtrips_through_json() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let (workspace, _root) = populated_workspace();

    storage.save(&workspace, "bakery").unwrap();
    let loaded = storage.load("bakery").unwrap();

    assert_eq!(loaded.id, workspace.id);
    assert_eq!(loaded.accounts.len(), 1);
    assert_eq!(loaded.rate_records.len(), 2);
    assert_eq!(loaded.recipes.len(), 1);
    assert_eq!(loaded.recipes[0].lines.len(), 1);
}

#[test]
fn rate_version_counter_survives_reload() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let (workspace, root) = populated_workspace();
    storage.save(&workspace, "bakery").unwrap();

    let mut loaded = storage.load("bakery").unwrap();
    let next = LaborRateService::record_rate(&mut loaded, &root, None, 0.4, 0.6).unwrap();
    assert_eq!(next, 3, "counter must continue past persisted versions");

    let rate = LaborRateService::effective_rate(&loaded, root.id, None);
    assert_eq!(rate.shop, 0.4);
}

#[test]
fn list_and_delete_manage_snapshots() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let (workspace, _root) = populated_workspace();

    storage.save(&workspace, "First Bakery").unwrap();
    storage.save(&workspace, "Second Bakery").unwrap();
    assert_eq!(
        storage.list().unwrap(),
        vec!["first_bakery".to_string(), "second_bakery".to_string()]
    );

    storage.delete("First Bakery").unwrap();
    assert_eq!(storage.list().unwrap(), vec!["second_bakery".to_string()]);
}
