//! Animal registry endpoints
//!
//! Create and update take `multipart/form-data` so an image can travel with
//! the record fields.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::animal::{Animal, AnimalPatch, AnimalQuery, AnimalRead, CreateAnimal},
    services::images::ImageUpload,
    AppState,
};

use super::{MessageResponse, Pagination};

/// Multipart form accepted by create and update. Empty text fields count as absent.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AnimalForm {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub animal_type: Option<String>,
    pub age: Option<f64>,
    pub breed: Option<String>,
    pub gender: Option<String>,
    pub health_status: Option<String>,
    pub description: Option<String>,
    /// Only honoured on update
    pub is_adopted: Option<bool>,
    /// Image file
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<ImageUpload>,
}

impl AnimalForm {
    /// Collect the form fields from a multipart body
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = AnimalForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "image" {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid image upload: {}", e)))?;
                // Browsers send an empty part when no file was picked
                if !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid value for '{}': {}", name, e)))?;
            form.set_text(&name, value)?;
        }

        Ok(form)
    }

    fn set_text(&mut self, field: &str, value: String) -> AppResult<()> {
        if value.is_empty() {
            return Ok(());
        }
        match field {
            "name" => self.name = Some(value),
            "type" => self.animal_type = Some(value),
            "age" => self.age = Some(parse_age(&value)?),
            "breed" => self.breed = Some(value),
            "gender" => self.gender = Some(value),
            "health_status" => self.health_status = Some(value),
            "description" => self.description = Some(value),
            "is_adopted" => self.is_adopted = Some(parse_bool(field, &value)?),
            other => tracing::debug!("Ignoring unknown form field '{}'", other),
        }
        Ok(())
    }

    /// Build a create request; every required field must be present.
    pub fn into_create(self) -> AppResult<(CreateAnimal, Option<ImageUpload>)> {
        let data = CreateAnimal {
            name: required(self.name, "name")?,
            animal_type: required(self.animal_type, "type")?,
            age: required(self.age, "age")?,
            breed: required(self.breed, "breed")?,
            gender: self.gender,
            health_status: required(self.health_status, "health_status")?,
            description: required(self.description, "description")?,
            image_path: None,
        };
        Ok((data, self.image))
    }

    pub fn into_patch(self) -> (AnimalPatch, Option<ImageUpload>) {
        let patch = AnimalPatch {
            name: self.name,
            animal_type: self.animal_type,
            age: self.age,
            breed: self.breed,
            gender: self.gender,
            health_status: self.health_status,
            description: self.description,
            image_path: None,
            is_adopted: self.is_adopted,
        };
        (patch, self.image)
    }
}

fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::Validation(format!("Field '{}' is required", field)))
}

fn parse_age(value: &str) -> AppResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|age| age.is_finite())
        .ok_or_else(|| AppError::BadRequest(format!("Invalid age: {}", value)))
}

fn parse_bool(field: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(AppError::BadRequest(format!(
            "Invalid boolean for '{}': {}",
            field, value
        ))),
    }
}

fn to_read(state: &AppState, animal: Animal) -> AnimalRead {
    AnimalRead::from_animal(animal, &state.config.server.public_url)
}

/// Register a new animal
#[utoipa::path(
    post,
    path = "/animals",
    tag = "animals",
    request_body(content = AnimalForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Animal created", body = AnimalRead),
        (status = 400, description = "Invalid form data", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_animal(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<AnimalRead>)> {
    let (data, image) = AnimalForm::from_multipart(multipart).await?.into_create()?;
    let animal = state.services.animals.create(data, image).await?;
    Ok((StatusCode::CREATED, Json(to_read(&state, animal))))
}

/// List animals, or search them when any filter is given
#[utoipa::path(
    get,
    path = "/animals",
    tag = "animals",
    params(Pagination, AnimalQuery),
    responses(
        (status = 200, description = "Animals", body = Vec<AnimalRead>)
    )
)]
pub async fn list_animals(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
    Query(query): Query<AnimalQuery>,
) -> AppResult<Json<Vec<AnimalRead>>> {
    let animals = if query.has_filters() {
        state.services.animals.search(&query).await?
    } else {
        state.services.animals.list(page.skip(), page.limit()).await?
    };

    Ok(Json(animals.into_iter().map(|a| to_read(&state, a)).collect()))
}

/// Get animal by ID
#[utoipa::path(
    get,
    path = "/animals/{id}",
    tag = "animals",
    params(("id" = i32, Path, description = "Animal ID")),
    responses(
        (status = 200, description = "Animal details", body = AnimalRead),
        (status = 404, description = "Animal not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_animal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AnimalRead>> {
    let animal = state.services.animals.get_by_id(id).await?;
    Ok(Json(to_read(&state, animal)))
}

/// Update an animal; only supplied fields change
#[utoipa::path(
    put,
    path = "/animals/{id}",
    tag = "animals",
    params(("id" = i32, Path, description = "Animal ID")),
    request_body(content = AnimalForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Animal updated", body = AnimalRead),
        (status = 404, description = "Animal not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_animal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<AnimalRead>> {
    let (patch, image) = AnimalForm::from_multipart(multipart).await?.into_patch();
    let animal = state.services.animals.update(id, patch, image).await?;
    Ok(Json(to_read(&state, animal)))
}

/// Delete an animal
#[utoipa::path(
    delete,
    path = "/animals/{id}",
    tag = "animals",
    params(("id" = i32, Path, description = "Animal ID")),
    responses(
        (status = 200, description = "Animal deleted", body = MessageResponse),
        (status = 404, description = "Animal not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Animal has adoption applications", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_animal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.animals.delete(id).await?;
    Ok(Json(MessageResponse {
        message: format!("Animal with ID {} deleted successfully", id),
    }))
}

/// Mark an animal as adopted
#[utoipa::path(
    patch,
    path = "/animals/{id}/adopt",
    tag = "animals",
    params(("id" = i32, Path, description = "Animal ID")),
    responses(
        (status = 200, description = "Animal marked as adopted", body = AnimalRead),
        (status = 404, description = "Animal not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn mark_as_adopted(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AnimalRead>> {
    let animal = state.services.animals.mark_adopted(id).await?;
    Ok(Json(to_read(&state, animal)))
}
