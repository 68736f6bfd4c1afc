use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use crate::constants::{DEFAULT_RANK_LIMIT, DEFAULT_SEARCH_LIMIT};
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    IngredientIdsRequest, IngredientIdsResponse, IngredientsResponse, RecipeView,
    RecipesResponse, SearchParams,
};
use crate::gateway::state::HandlerState;
use crate::gateway::{SEARCH_CACHE_HEADER, SEARCH_CACHE_HIT, SEARCH_CACHE_MISS};
use crate::search::SearchQuery;
use crate::store::RecipeStore;

#[instrument(skip(state, params))]
pub async fn search_ingredient_handler<S>(
    State(state): State<HandlerState<S>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, GatewayError>
where
    S: RecipeStore + 'static,
{
    let query = SearchQuery::new(params.q.as_deref().unwrap_or_default())?;
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

    let (results, cache_status) = match state.search_cache.lookup(&query, limit) {
        Some(hit) => (hit, SEARCH_CACHE_HIT),
        None => {
            let results = state
                .search_cache
                .get_or_insert_with(&query, limit, || state.recommender.search(&query, limit));
            (results, SEARCH_CACHE_MISS)
        }
    };

    debug!(
        query = %query,
        returned = results.len(),
        cache = cache_status,
        "Search request served"
    );

    let mut headers = HeaderMap::new();
    headers.insert(SEARCH_CACHE_HEADER, HeaderValue::from_static(cache_status));

    let body: IngredientsResponse = results.iter().collect();
    Ok((StatusCode::OK, headers, Json(body)).into_response())
}

#[instrument(skip(state))]
pub async fn pantry_ingredients_handler<S>(State(state): State<HandlerState<S>>) -> Response
where
    S: RecipeStore + 'static,
{
    let body: IngredientsResponse = state.recommender.catalogs().pantry.presets().iter().collect();
    Json(body).into_response()
}

#[instrument(skip(state, request))]
pub async fn substitutes_handler<S>(
    State(state): State<HandlerState<S>>,
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    S: RecipeStore + 'static,
{
    let request = parse_ingredient_ids(request)?;
    let ingredient_ids = state.recommender.resolve_substitutes(&request.ingredient_ids);

    debug!(
        chosen = request.ingredient_ids.len(),
        resolved = ingredient_ids.len(),
        "Substitutes resolved"
    );

    Ok(Json(IngredientIdsResponse { ingredient_ids }).into_response())
}

#[instrument(skip(state, request), fields(chosen = tracing::field::Empty))]
pub async fn find_best_recipes_handler<S>(
    State(state): State<HandlerState<S>>,
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    S: RecipeStore + 'static,
{
    let request = parse_ingredient_ids(request)?;
    tracing::Span::current().record("chosen", request.ingredient_ids.len());

    let limit = request.limit.unwrap_or(DEFAULT_RANK_LIMIT);
    let ranked = state
        .recommender
        .rank_recipes(&request.ingredient_ids, limit)
        .await?;

    debug!(returned = ranked.len(), "Recipes ranked for request");

    let body = RecipesResponse {
        recipes: ranked.into_iter().map(RecipeView::from).collect(),
    };
    Ok(Json(body).into_response())
}

pub(crate) fn parse_ingredient_ids(
    request: serde_json::Value,
) -> Result<IngredientIdsRequest, GatewayError> {
    serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
}
