use std::future::Future;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use super::error::StoreError;
use super::model::{CoverageQuery, RecipeCoverage, RecipeId, RecipeRecord};
use crate::catalog::IngredientId;

/// Storage collaborator used by the scoring engine.
pub trait RecipeStore: Send + Sync {
    /// Groups the ingredient associations per recipe in a single read.
    ///
    /// Only recipes with at least one matched ingredient need to be returned.
    fn aggregate_recipe_coverage(
        &self,
        query: &CoverageQuery,
    ) -> impl Future<Output = Result<Vec<RecipeCoverage>, StoreError>> + Send;

    /// Cheap liveness probe.
    fn health_check(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

const CREATE_RECIPES: &str = r"
    CREATE TABLE IF NOT EXISTS recipes (
        recipe_id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        url TEXT NOT NULL,
        image_url TEXT,
        rating REAL,
        weighted_rating REAL
    )";

const CREATE_RECIPE_INGREDIENTS: &str = r"
    CREATE TABLE IF NOT EXISTS recipe_ingredients (
        recipe_id INTEGER NOT NULL,
        ingredient_id INTEGER NOT NULL,
        gram_weight REAL
    )";

const CREATE_RECIPE_INGREDIENTS_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_recipe
    ON recipe_ingredients (recipe_id, ingredient_id)";

// ?1 matched ids (JSON array), ?2 pantry ids (JSON array), ?3 alpha.
const AGGREGATE_COVERAGE: &str = r"
    WITH matched AS (
        SELECT value AS ingredient_id FROM json_each(?1)
    ),
    pantry AS (
        SELECT value AS ingredient_id FROM json_each(?2)
    ),
    associations AS (
        SELECT DISTINCT recipe_id, ingredient_id FROM recipe_ingredients
    ),
    matches AS (
        SELECT
            a.recipe_id,
            CASE WHEN a.ingredient_id IN (SELECT ingredient_id FROM matched)
                THEN 1 ELSE 0
            END AS used_ingredient,
            CASE
                WHEN a.ingredient_id NOT IN (SELECT ingredient_id FROM matched) THEN 0.0
                WHEN a.ingredient_id IN (SELECT ingredient_id FROM pantry) THEN 1.0
                ELSE 1.0 + ?3
            END AS score
        FROM associations a
    ),
    coverage AS (
        SELECT
            recipe_id,
            CAST(SUM(used_ingredient) AS INTEGER) AS n_used,
            CAST(COUNT(*) AS INTEGER) AS total_ingredients,
            CAST(SUM(score) AS REAL) AS total_score
        FROM matches
        GROUP BY recipe_id
    )
    SELECT
        r.recipe_id,
        r.title,
        r.url,
        r.image_url,
        r.rating,
        r.weighted_rating,
        c.n_used,
        c.total_ingredients,
        c.total_score
    FROM recipes r
    JOIN coverage c ON r.recipe_id = c.recipe_id
    WHERE c.n_used > 0";

#[derive(Debug, sqlx::FromRow)]
struct CoverageRow {
    recipe_id: RecipeId,
    title: String,
    url: String,
    image_url: Option<String>,
    rating: Option<f64>,
    weighted_rating: Option<f64>,
    n_used: i64,
    total_ingredients: i64,
    total_score: f64,
}

impl CoverageRow {
    fn into_coverage(self) -> Result<RecipeCoverage, StoreError> {
        let count = |value: i64, column: &str| {
            u32::try_from(value).map_err(|_| StoreError::QueryFailed {
                message: format!("{column} out of range for recipe {}: {value}", self.recipe_id),
            })
        };
        let n_used = count(self.n_used, "n_used")?;
        let total_ingredients = count(self.total_ingredients, "total_ingredients")?;

        Ok(RecipeCoverage {
            recipe: RecipeRecord {
                recipe_id: self.recipe_id,
                title: self.title,
                url: self.url,
                image_url: self.image_url,
                rating: self.rating,
                weighted_rating: self.weighted_rating,
            },
            n_used,
            total_ingredients,
            total_score: self.total_score,
        })
    }
}

#[derive(Clone)]
/// SQLite-backed recipe corpus.
pub struct SqliteRecipeStore {
    pool: SqlitePool,
    url: String,
}

impl std::fmt::Debug for SqliteRecipeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRecipeStore")
            .field("url", &self.url)
            .finish()
    }
}

impl SqliteRecipeStore {
    const MAX_CONNECTIONS: u32 = 8;

    /// Opens a pool for `url` (e.g. `sqlite://./data/recipes.db`), creating the file if needed.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let connection_failed = |message: String| StoreError::ConnectionFailed {
            url: url.to_string(),
            message,
        };

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| connection_failed(e.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(Self::MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| connection_failed(e.to_string()))?;

        Ok(Self {
            pool,
            url: url.to_string(),
        })
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            url: "<pool>".to_string(),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Creates the corpus tables if they are missing.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in [
            CREATE_RECIPES,
            CREATE_RECIPE_INGREDIENTS,
            CREATE_RECIPE_INGREDIENTS_INDEX,
        ] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::SchemaFailed {
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Inserts or replaces a recipe row.
    pub async fn upsert_recipe(&self, recipe: &RecipeRecord) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT OR REPLACE INTO recipes
              (recipe_id, title, url, image_url, rating, weighted_rating)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(recipe.recipe_id)
        .bind(&recipe.title)
        .bind(&recipe.url)
        .bind(&recipe.image_url)
        .bind(recipe.rating)
        .bind(recipe.weighted_rating)
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;
        Ok(())
    }

    /// Records that `recipe_id` uses `ingredient_id`.
    pub async fn add_ingredient(
        &self,
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
        gram_weight: Option<f64>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO recipe_ingredients (recipe_id, ingredient_id, gram_weight)
              VALUES (?1, ?2, ?3)",
        )
        .bind(recipe_id)
        .bind(ingredient_id)
        .bind(gram_weight)
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;
        Ok(())
    }

    /// Runs the coverage aggregation as one statement.
    pub async fn aggregate_recipe_coverage(
        &self,
        query: &CoverageQuery,
    ) -> Result<Vec<RecipeCoverage>, StoreError> {
        let matched = id_array(&query.matched_ids)?;
        let pantry = id_array(&query.pantry_ids)?;

        let rows: Vec<CoverageRow> = sqlx::query_as(AGGREGATE_COVERAGE)
            .bind(matched)
            .bind(pantry)
            .bind(query.alpha)
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed)?;

        debug!(
            matched = query.matched_ids.len(),
            pantry = query.pantry_ids.len(),
            rows = rows.len(),
            "Coverage aggregation complete"
        );

        rows.into_iter().map(CoverageRow::into_coverage).collect()
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}

impl RecipeStore for SqliteRecipeStore {
    async fn aggregate_recipe_coverage(
        &self,
        query: &CoverageQuery,
    ) -> Result<Vec<RecipeCoverage>, StoreError> {
        self.aggregate_recipe_coverage(query).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.health_check().await
    }
}

fn query_failed(e: sqlx::Error) -> StoreError {
    StoreError::QueryFailed {
        message: e.to_string(),
    }
}

/// Encodes an id set as a JSON array for `json_each` binding.
fn id_array<'a, I>(ids: I) -> Result<String, StoreError>
where
    I: IntoIterator<Item = &'a IngredientId>,
{
    let ids: Vec<IngredientId> = ids.into_iter().copied().collect();
    serde_json::to_string(&ids).map_err(|e| StoreError::QueryFailed {
        message: format!("failed to encode id set: {e}"),
    })
}
