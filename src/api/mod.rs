//! API handlers for the shelter REST endpoints

pub mod adoptions;
pub mod animals;
pub mod health;
pub mod openapi;
pub mod stats;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::{IntoParams, ToSchema};

use crate::{config::CorsConfig, services::images::PUBLIC_PREFIX, AppState};

pub const DEFAULT_SKIP: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 100;

/// Offset pagination parameters
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct Pagination {
    /// Number of records to skip (default: 0)
    pub skip: Option<i64>,
    /// Maximum number of records to return (default: 100)
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(DEFAULT_SKIP)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

/// Plain confirmation message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);
    let upload_limit = state.config.storage.max_upload_bytes;
    let uploads = ServeDir::new(&state.config.storage.upload_dir);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Animals
        .route(
            "/animals",
            get(animals::list_animals)
                .post(animals::create_animal)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/animals/:id",
            get(animals::get_animal)
                .put(animals::update_animal)
                .delete(animals::delete_animal)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/animals/:id/adopt", patch(animals::mark_as_adopted))
        // Adoptions
        .route(
            "/adoptions",
            get(adoptions::list_adoptions).post(adoptions::create_adoption),
        )
        .route("/adoptions/housing-options", get(adoptions::get_housing_options))
        .route(
            "/adoptions/:id",
            get(adoptions::get_adoption)
                .put(adoptions::update_adoption)
                .delete(adoptions::delete_adoption),
        )
        .route("/adoptions/:id/approve", patch(adoptions::approve_adoption))
        .route("/adoptions/:id/reject", patch(adoptions::reject_adoption))
        // Statistics
        .route("/statistics", get(stats::get_summary_statistics))
        .route("/statistics/fallback", get(stats::get_fallback_statistics))
        .route("/statistics/adoptions", get(stats::get_adoption_statistics))
        .route("/statistics/animal-types", get(stats::get_animal_type_distribution))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", api_v1)
        .nest_service(&format!("/{}", PUBLIC_PREFIX), uploads)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to Summer Shelter API. Visit /swagger-ui for API documentation.".to_string(),
    })
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
