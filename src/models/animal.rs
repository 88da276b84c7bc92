//! Animal model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Animal record from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Animal {
    pub id: i32,
    pub name: String,
    /// Species (e.g. "Dog", "Cat")
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub animal_type: String,
    pub age: f64,
    pub breed: String,
    pub gender: Option<String>,
    pub health_status: String,
    pub description: String,
    /// Reference returned by the image store (e.g. `uploads/animals/rex_0a1b.jpg`)
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_adopted: bool,
}

/// Animal as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnimalRead {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub animal_type: String,
    pub age: f64,
    pub breed: String,
    pub gender: Option<String>,
    pub health_status: String,
    pub description: String,
    pub image_path: Option<String>,
    /// Absolute URL of the image, if any
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_adopted: bool,
}

impl AnimalRead {
    pub fn from_animal(animal: Animal, public_url: &str) -> Self {
        let image_url = animal
            .image_path
            .as_deref()
            .map(|path| format!("{}/{}", public_url.trim_end_matches('/'), path));

        Self {
            id: animal.id,
            name: animal.name,
            animal_type: animal.animal_type,
            age: animal.age,
            breed: animal.breed,
            gender: animal.gender,
            health_status: animal.health_status,
            description: animal.description,
            image_path: animal.image_path,
            image_url,
            created_at: animal.created_at,
            updated_at: animal.updated_at,
            is_adopted: animal.is_adopted,
        }
    }
}

/// Create animal request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAnimal {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub animal_type: String,
    #[validate(range(min = 0.0, message = "Age must not be negative"))]
    pub age: f64,
    #[validate(length(min = 1, message = "Breed is required"))]
    pub breed: String,
    pub gender: Option<String>,
    #[validate(length(min = 1, message = "Health status is required"))]
    pub health_status: String,
    pub description: String,
    pub image_path: Option<String>,
}

/// Partial update of an animal. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AnimalPatch {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type must not be empty"))]
    pub animal_type: Option<String>,
    #[validate(range(min = 0.0, message = "Age must not be negative"))]
    pub age: Option<f64>,
    pub breed: Option<String>,
    pub gender: Option<String>,
    pub health_status: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub is_adopted: Option<bool>,
}

impl AnimalPatch {
    /// Merge the supplied fields into `animal` and stamp `updated_at`.
    /// Returns the image reference a new image replaced, if any.
    pub fn apply_to(self, animal: &mut Animal, now: DateTime<Utc>) -> Option<String> {
        let AnimalPatch {
            name,
            animal_type,
            age,
            breed,
            gender,
            health_status,
            description,
            image_path,
            is_adopted,
        } = self;

        if let Some(v) = name {
            animal.name = v;
        }
        if let Some(v) = animal_type {
            animal.animal_type = v;
        }
        if let Some(v) = age {
            animal.age = v;
        }
        if let Some(v) = breed {
            animal.breed = v;
        }
        if let Some(v) = gender {
            animal.gender = Some(v);
        }
        if let Some(v) = health_status {
            animal.health_status = v;
        }
        if let Some(v) = description {
            animal.description = v;
        }
        let mut replaced = None;
        if let Some(v) = image_path {
            replaced = animal.image_path.replace(v).filter(|old| animal.image_path.as_ref() != Some(old));
        }
        if let Some(v) = is_adopted {
            animal.is_adopted = v;
        }
        animal.updated_at = now;
        replaced
    }
}

/// Animal search filters. All supplied predicates must match.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct AnimalQuery {
    /// Case-sensitive substring of the name
    pub name: Option<String>,
    /// Exact type
    #[serde(rename = "type")]
    pub animal_type: Option<String>,
    /// Case-sensitive substring of the breed
    pub breed: Option<String>,
    pub is_adopted: Option<bool>,
}

impl AnimalQuery {
    /// Whether any filter is set; empty strings count as unset.
    pub fn has_filters(&self) -> bool {
        non_empty(&self.name).is_some()
            || non_empty(&self.animal_type).is_some()
            || non_empty(&self.breed).is_some()
            || self.is_adopted.is_some()
    }

    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn animal_type(&self) -> Option<&str> {
        non_empty(&self.animal_type)
    }

    pub fn breed(&self) -> Option<&str> {
        non_empty(&self.breed)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
