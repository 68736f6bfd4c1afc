//! On-disk datasets and a seeded SQLite corpus.
//!
//! Ingredients: egg(1) flour(2) milk(3) salt(4, pantry) baking powder(5) butter(6)
//! margarine(7) eggplant(8) tomatoes(9) cherry tomato(10).

use std::fs;
use std::path::Path;

use larder::store::{RecipeRecord, SqliteRecipeStore, StoreError};

pub const INGREDIENTS_CSV: &str = "\
ingredient_id,ingredient_name
1,egg
2,flour
3,milk
4,salt
5,baking powder
6,butter
7,margarine
8,eggplant
9,tomatoes
10,cherry tomato
";

pub const PANTRY_CSV: &str = "\
ingredient_id,ingredient_name
4,salt
";

pub const SUBSTITUTIONS_JSON: &str = r#"{
  "butter": ["margarine"],
  "milk": ["oat milk"]
}"#;

pub const RECIPE_A: i64 = 1;
pub const RECIPE_B: i64 = 2;
pub const MARGARINE_CAKE: i64 = 3;
pub const UNRATED_BAKE: i64 = 4;

/// Writes the three startup datasets into `dir` under their default names.
pub fn write_data_dir(dir: &Path) -> std::io::Result<()> {
    fs::write(dir.join("ingredients.csv"), INGREDIENTS_CSV)?;
    fs::write(dir.join("pantry_ingredients.csv"), PANTRY_CSV)?;
    fs::write(dir.join("substitutions.json"), SUBSTITUTIONS_JSON)?;
    Ok(())
}

/// Recipes and their ingredient ids.
pub fn recipes() -> Vec<(RecipeRecord, Vec<i64>)> {
    vec![
        (recipe(RECIPE_A, "Recipe A", Some(4.2), Some(4.0)), vec![1, 2, 3, 4]),
        (recipe(RECIPE_B, "Recipe B", Some(4.6), Some(4.4)), vec![1, 2, 4, 5, 6]),
        (
            recipe(MARGARINE_CAKE, "Margarine cake", Some(4.0), Some(3.9)),
            vec![7, 2, 5, 1, 3, 4],
        ),
        (recipe(UNRATED_BAKE, "Unrated bake", None, None), vec![1, 2, 3, 4, 5]),
    ]
}

pub async fn seed_store(store: &SqliteRecipeStore) -> Result<(), StoreError> {
    store.ensure_schema().await?;
    for (record, ingredients) in recipes() {
        store.upsert_recipe(&record).await?;
        for ingredient in ingredients {
            store.add_ingredient(record.recipe_id, ingredient, None).await?;
        }
    }
    Ok(())
}

fn recipe(id: i64, title: &str, rating: Option<f64>, weighted: Option<f64>) -> RecipeRecord {
    RecipeRecord {
        recipe_id: id,
        title: title.to_string(),
        url: format!("https://recipes.test/{id}"),
        image_url: Some(format!("https://recipes.test/{id}.jpg")),
        rating,
        weighted_rating: weighted,
    }
}
