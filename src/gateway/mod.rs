//! HTTP gateway (Axum) for ingredient search and recipe ranking.
//!
//! This module is primarily used by the `larder` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use error::GatewayError;
pub use handler::{
    find_best_recipes_handler, pantry_ingredients_handler, search_ingredient_handler,
    substitutes_handler,
};
pub use state::HandlerState;

use crate::store::RecipeStore;

pub const LARDER_STATUS_HEADER: &str = "X-Larder-Status";
pub const LARDER_STATUS_HEALTHY: &str = "healthy";
pub const LARDER_STATUS_READY: &str = "ready";
pub const LARDER_STATUS_ERROR: &str = "error";

pub const SEARCH_CACHE_HEADER: &str = "X-Larder-Search-Cache";
pub const SEARCH_CACHE_HIT: &str = "HIT";
pub const SEARCH_CACHE_MISS: &str = "MISS";

pub fn create_router_with_state<S>(state: HandlerState<S>) -> Router
where
    S: RecipeStore + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<S>))
        .route("/search-ingredient", get(search_ingredient_handler::<S>))
        .route("/pantry-ingredients", get(pantry_ingredients_handler::<S>))
        .route("/api/ingredients/presets", get(pantry_ingredients_handler::<S>))
        .route("/substitutes", post(substitutes_handler::<S>))
        .route("/find-best-recipes", post(find_best_recipes_handler::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the given origins; unparseable origins are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub catalog: &'static str,
    pub store: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        LARDER_STATUS_HEADER,
        HeaderValue::from_static(LARDER_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<S>(State(state): State<HandlerState<S>>) -> Response
where
    S: RecipeStore + 'static,
{
    let catalog_status = if state.recommender.catalogs().ingredients.is_empty() {
        LARDER_STATUS_ERROR
    } else {
        LARDER_STATUS_READY
    };

    let store_status = match state.recommender.health_check().await {
        Ok(()) => LARDER_STATUS_READY,
        Err(e) => {
            warn!(error = %e, "Recipe store health check failed");
            LARDER_STATUS_ERROR
        }
    };

    let components = ComponentStatus {
        http: LARDER_STATUS_READY,
        catalog: catalog_status,
        store: store_status,
    };

    let is_ready =
        components.catalog == LARDER_STATUS_READY && components.store == LARDER_STATUS_READY;

    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status_msg = if is_ready { "ok" } else { "pending" };

    let mut headers = HeaderMap::new();
    headers.insert(LARDER_STATUS_HEADER, HeaderValue::from_static(status_msg));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
