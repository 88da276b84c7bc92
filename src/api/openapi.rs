//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{adoptions, animals, health, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Summer Shelter API",
        version = "1.0.0",
        description = "Animal shelter management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Animals
        animals::create_animal,
        animals::list_animals,
        animals::get_animal,
        animals::update_animal,
        animals::delete_animal,
        animals::mark_as_adopted,
        // Adoptions
        adoptions::create_adoption,
        adoptions::list_adoptions,
        adoptions::get_housing_options,
        adoptions::get_adoption,
        adoptions::update_adoption,
        adoptions::delete_adoption,
        adoptions::approve_adoption,
        adoptions::reject_adoption,
        // Statistics
        stats::get_summary_statistics,
        stats::get_fallback_statistics,
        stats::get_adoption_statistics,
        stats::get_animal_type_distribution,
    ),
    components(
        schemas(
            // Animals
            crate::models::animal::AnimalRead,
            crate::models::animal::CreateAnimal,
            crate::models::animal::AnimalPatch,
            crate::models::animal::AnimalQuery,
            animals::AnimalForm,
            // Adoptions
            crate::models::adoption::Adoption,
            crate::models::adoption::CreateAdoption,
            crate::models::adoption::AdoptionPatch,
            crate::models::adoption::HousingOptions,
            crate::models::enums::AdoptionStatus,
            crate::models::enums::HousingSituation,
            crate::models::enums::HomeOwnership,
            // Statistics
            stats::SummaryStatistics,
            stats::AdoptionStatistics,
            stats::TypeCounts,
            stats::TypeDistribution,
            // Common
            crate::api::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "animals", description = "Animal registry"),
        (name = "adoptions", description = "Adoption applications"),
        (name = "statistics", description = "Shelter statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
