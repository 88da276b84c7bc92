//! Statistics endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;

/// Shelter summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryStatistics {
    /// Total number of animals
    pub total_animals: i64,
    /// Animals flagged as adopted (including reserved ones)
    pub adopted_animals: i64,
    /// Animals registered in the last 30 days
    pub new_admissions: i64,
    /// Estimated number of rescued animals
    pub rescued_animals: i64,
}

impl SummaryStatistics {
    /// Fixed figures for dashboards that must render without the database
    pub fn fallback() -> Self {
        Self {
            total_animals: 300,
            adopted_animals: 120,
            new_admissions: 50,
            rescued_animals: 150,
        }
    }
}

/// Adoption application statistics
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdoptionStatistics {
    pub total_adoptions: i64,
    pub pending_adoptions: i64,
    pub approved_adoptions: i64,
    pub rejected_adoptions: i64,
    /// Approved applications per animal, in percent with one decimal
    pub adoption_rate: f64,
}

/// Animal counts per reporting category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TypeCounts {
    pub dog: i64,
    pub cat: i64,
    pub bird: i64,
    pub rabbit: i64,
    pub other: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TypeDistribution {
    pub type_distribution: TypeCounts,
}

/// Get shelter summary statistics
#[utoipa::path(
    get,
    path = "/statistics",
    tag = "statistics",
    responses(
        (status = 200, description = "Summary statistics", body = SummaryStatistics)
    )
)]
pub async fn get_summary_statistics(
    State(state): State<crate::AppState>,
) -> AppResult<Json<SummaryStatistics>> {
    let stats = state.services.stats.get_summary().await?;
    Ok(Json(stats))
}

/// Get fixed placeholder statistics; never touches the database
#[utoipa::path(
    get,
    path = "/statistics/fallback",
    tag = "statistics",
    responses(
        (status = 200, description = "Placeholder summary statistics", body = SummaryStatistics)
    )
)]
pub async fn get_fallback_statistics() -> Json<SummaryStatistics> {
    Json(SummaryStatistics::fallback())
}

/// Get adoption application statistics
#[utoipa::path(
    get,
    path = "/statistics/adoptions",
    tag = "statistics",
    responses(
        (status = 200, description = "Adoption statistics", body = AdoptionStatistics)
    )
)]
pub async fn get_adoption_statistics(
    State(state): State<crate::AppState>,
) -> AppResult<Json<AdoptionStatistics>> {
    let stats = state.services.stats.get_adoption_statistics().await?;
    Ok(Json(stats))
}

/// Get the animal type distribution
#[utoipa::path(
    get,
    path = "/statistics/animal-types",
    tag = "statistics",
    responses(
        (status = 200, description = "Animals per type category", body = TypeDistribution)
    )
)]
pub async fn get_animal_type_distribution(
    State(state): State<crate::AppState>,
) -> AppResult<Json<TypeDistribution>> {
    let distribution = state.services.stats.get_type_distribution().await?;
    Ok(Json(distribution))
}
