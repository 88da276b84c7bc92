//! Adoption application endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::adoption::{Adoption, AdoptionPatch, AdoptionQuery, CreateAdoption, HousingOptions},
    AppState,
};

use super::{MessageResponse, Pagination};

/// Submit an adoption application
#[utoipa::path(
    post,
    path = "/adoptions",
    tag = "adoptions",
    request_body = CreateAdoption,
    responses(
        (status = 201, description = "Application submitted", body = Adoption),
        (status = 404, description = "Animal not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Animal already adopted", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_adoption(
    State(state): State<AppState>,
    Json(data): Json<CreateAdoption>,
) -> AppResult<(StatusCode, Json<Adoption>)> {
    let adoption = state.services.adoptions.submit(&data).await?;
    Ok((StatusCode::CREATED, Json(adoption)))
}

/// List applications, filtered by animal or status when given
#[utoipa::path(
    get,
    path = "/adoptions",
    tag = "adoptions",
    params(Pagination, AdoptionQuery),
    responses(
        (status = 200, description = "Adoption applications", body = Vec<Adoption>)
    )
)]
pub async fn list_adoptions(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
    Query(query): Query<AdoptionQuery>,
) -> AppResult<Json<Vec<Adoption>>> {
    let service = &state.services.adoptions;
    let adoptions = match (query.animal_id, query.status) {
        (Some(animal_id), _) => service.list_by_animal(animal_id).await?,
        (None, Some(status)) => service.list_by_status(status).await?,
        (None, None) => service.list(page.skip(), page.limit()).await?,
    };
    Ok(Json(adoptions))
}

/// Housing options offered by the application form
#[utoipa::path(
    get,
    path = "/adoptions/housing-options",
    tag = "adoptions",
    responses(
        (status = 200, description = "Housing options", body = HousingOptions)
    )
)]
pub async fn get_housing_options() -> Json<HousingOptions> {
    Json(HousingOptions::all())
}

/// Get application by ID
#[utoipa::path(
    get,
    path = "/adoptions/{id}",
    tag = "adoptions",
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application details", body = Adoption),
        (status = 404, description = "Application not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_adoption(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Adoption>> {
    let adoption = state.services.adoptions.get_by_id(id).await?;
    Ok(Json(adoption))
}

/// Update application fields
#[utoipa::path(
    put,
    path = "/adoptions/{id}",
    tag = "adoptions",
    params(("id" = i32, Path, description = "Application ID")),
    request_body = AdoptionPatch,
    responses(
        (status = 200, description = "Application updated", body = Adoption),
        (status = 404, description = "Application or animal not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_adoption(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<AdoptionPatch>,
) -> AppResult<Json<Adoption>> {
    let adoption = state.services.adoptions.update(id, patch).await?;
    Ok(Json(adoption))
}

/// Delete an application
#[utoipa::path(
    delete,
    path = "/adoptions/{id}",
    tag = "adoptions",
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application deleted", body = MessageResponse),
        (status = 404, description = "Application not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_adoption(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.adoptions.delete(id).await?;
    Ok(Json(MessageResponse {
        message: format!("Adoption application with ID {} deleted successfully", id),
    }))
}

/// Approve a pending application
#[utoipa::path(
    patch,
    path = "/adoptions/{id}/approve",
    tag = "adoptions",
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application approved", body = Adoption),
        (status = 404, description = "Application not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Application not pending or animal already adopted", body = crate::error::ErrorResponse)
    )
)]
pub async fn approve_adoption(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Adoption>> {
    let adoption = state.services.adoptions.approve(id).await?;
    Ok(Json(adoption))
}

/// Reject a pending application
#[utoipa::path(
    patch,
    path = "/adoptions/{id}/reject",
    tag = "adoptions",
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application rejected", body = Adoption),
        (status = 404, description = "Application not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Application not pending", body = crate::error::ErrorResponse)
    )
)]
pub async fn reject_adoption(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Adoption>> {
    let adoption = state.services.adoptions.reject(id).await?;
    Ok(Json(adoption))
}
