//! Adoption application model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{AdoptionStatus, HomeOwnership, HousingSituation};

/// Adoption application from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Adoption {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub housing_situation: HousingSituation,
    pub home_ownership: HomeOwnership,
    pub has_other_pets: Option<bool>,
    pub previous_pet_experience: Option<String>,
    pub adoption_reason: String,
    /// Animal this application is for
    pub animal_id: i32,
    pub status: AdoptionStatus,
    pub created_at: DateTime<Utc>,
}

/// Submit adoption application request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAdoption {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub housing_situation: HousingSituation,
    pub home_ownership: HomeOwnership,
    pub has_other_pets: Option<bool>,
    pub previous_pet_experience: Option<String>,
    #[validate(length(min = 1, message = "Adoption reason is required"))]
    pub adoption_reason: String,
    pub animal_id: i32,
}

/// Partial update of an adoption application. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AdoptionPatch {
    #[validate(length(min = 1, message = "Full name must not be empty"))]
    pub full_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub housing_situation: Option<HousingSituation>,
    pub home_ownership: Option<HomeOwnership>,
    pub has_other_pets: Option<bool>,
    pub previous_pet_experience: Option<String>,
    pub adoption_reason: Option<String>,
    pub animal_id: Option<i32>,
    pub status: Option<AdoptionStatus>,
}

impl AdoptionPatch {
    /// Merge the supplied fields into `adoption`.
    pub fn apply_to(self, adoption: &mut Adoption) {
        let AdoptionPatch {
            full_name,
            email,
            phone,
            address,
            housing_situation,
            home_ownership,
            has_other_pets,
            previous_pet_experience,
            adoption_reason,
            animal_id,
            status,
        } = self;

        if let Some(v) = full_name {
            adoption.full_name = v;
        }
        if let Some(v) = email {
            adoption.email = v;
        }
        if let Some(v) = phone {
            adoption.phone = v;
        }
        if let Some(v) = address {
            adoption.address = v;
        }
        if let Some(v) = housing_situation {
            adoption.housing_situation = v;
        }
        if let Some(v) = home_ownership {
            adoption.home_ownership = v;
        }
        if let Some(v) = has_other_pets {
            adoption.has_other_pets = Some(v);
        }
        if let Some(v) = previous_pet_experience {
            adoption.previous_pet_experience = Some(v);
        }
        if let Some(v) = adoption_reason {
            adoption.adoption_reason = v;
        }
        if let Some(v) = animal_id {
            adoption.animal_id = v;
        }
        if let Some(v) = status {
            adoption.status = v;
        }
    }
}

/// Adoption list filters. `animal_id` wins over `status`; pagination applies
/// only when neither is set.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct AdoptionQuery {
    pub animal_id: Option<i32>,
    pub status: Option<AdoptionStatus>,
}

/// Options offered by the adoption form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HousingOptions {
    pub housing_situations: Vec<&'static str>,
    pub home_ownership: Vec<&'static str>,
}

impl HousingOptions {
    pub fn all() -> Self {
        Self {
            housing_situations: HousingSituation::ALL.iter().map(|h| h.as_str()).collect(),
            home_ownership: HomeOwnership::ALL.iter().map(|o| o.as_str()).collect(),
        }
    }
}
