//! Adoption workflow service
//!
//! Applications move `Pending -> Approved` or `Pending -> Rejected`. Submitting
//! an application reserves the animal (`is_adopted = true`) in the same
//! transaction that inserts the application, so an animal can only ever have
//! one application submitted while it is available.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        adoption::{Adoption, AdoptionPatch, CreateAdoption},
        animal::Animal,
        enums::AdoptionStatus,
    },
    repository::{
        adoptions::{self as adoptions_repo, AdoptionsRepository},
        animals::{self as animals_repo, AnimalsRepository},
        Repository,
    },
};

use super::validate_page;

#[derive(Clone)]
pub struct AdoptionsService {
    repository: Repository,
}

impl AdoptionsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Submit an application and reserve the animal atomically
    pub async fn submit(&self, data: &CreateAdoption) -> AppResult<Adoption> {
        data.validate()?;

        let mut tx = self.repository.pool.begin().await?;

        let animal = AnimalsRepository::fetch_for_update(&mut tx, data.animal_id)
            .await?
            .ok_or_else(|| animals_repo::not_found(data.animal_id))?;
        ensure_available(&animal)?;

        let adoption = AdoptionsRepository::insert(&mut tx, data).await?;
        AnimalsRepository::set_adopted(&mut tx, animal.id).await?;

        tx.commit().await?;

        tracing::info!(
            "Adoption application {} submitted for animal {}",
            adoption.id,
            adoption.animal_id
        );
        Ok(adoption)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Adoption> {
        self.repository.adoptions.get_by_id(id).await
    }

    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Adoption>> {
        validate_page(skip, limit)?;
        self.repository.adoptions.list(skip, limit).await
    }

    pub async fn list_by_animal(&self, animal_id: i32) -> AppResult<Vec<Adoption>> {
        self.repository.adoptions.list_by_animal(animal_id).await
    }

    pub async fn list_by_status(&self, status: AdoptionStatus) -> AppResult<Vec<Adoption>> {
        self.repository.adoptions.list_by_status(status).await
    }

    /// Edit application fields. No availability check or side effects.
    pub async fn update(&self, id: i32, patch: AdoptionPatch) -> AppResult<Adoption> {
        patch.validate()?;
        self.repository.adoptions.update(id, patch).await
    }

    /// Delete an application. The animal stays reserved.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.adoptions.delete(id).await?;
        tracing::info!("Deleted adoption application {}", id);
        Ok(())
    }

    /// Approve a pending application and mark its animal adopted
    pub async fn approve(&self, id: i32) -> AppResult<Adoption> {
        let mut tx = self.repository.pool.begin().await?;

        let adoption = AdoptionsRepository::fetch_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| adoptions_repo::not_found(id))?;
        let animal = AnimalsRepository::fetch_for_update(&mut tx, adoption.animal_id)
            .await?
            .ok_or_else(|| animals_repo::not_found(adoption.animal_id))?;

        let other_approved =
            AdoptionsRepository::other_approved_exists(&mut tx, animal.id, adoption.id).await?;
        check_approval(&adoption, other_approved)?;

        let approved = AdoptionsRepository::set_status(&mut tx, id, AdoptionStatus::Approved).await?;
        AnimalsRepository::set_adopted(&mut tx, animal.id).await?;

        tx.commit().await?;

        tracing::info!("Adoption application {} approved for animal {}", id, animal.id);
        Ok(approved)
    }

    /// Reject a pending application. The animal's adoption flag is not changed.
    pub async fn reject(&self, id: i32) -> AppResult<Adoption> {
        let mut tx = self.repository.pool.begin().await?;

        let adoption = AdoptionsRepository::fetch_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| adoptions_repo::not_found(id))?;
        ensure_pending(&adoption)?;

        let rejected = AdoptionsRepository::set_status(&mut tx, id, AdoptionStatus::Rejected).await?;

        tx.commit().await?;

        tracing::info!("Adoption application {} rejected", id);
        Ok(rejected)
    }
}

/// An application can only be submitted for an animal that is not yet adopted.
fn ensure_available(animal: &Animal) -> AppResult<()> {
    if animal.is_adopted {
        tracing::warn!("Rejected application for already adopted animal {}", animal.id);
        return Err(AppError::Conflict(format!(
            "Animal with ID {} is already adopted",
            animal.id
        )));
    }
    Ok(())
}

/// Only pending applications can change status.
fn ensure_pending(adoption: &Adoption) -> AppResult<()> {
    if adoption.status.is_terminal() {
        tracing::warn!(
            "Status change refused for adoption application {} ({})",
            adoption.id,
            adoption.status
        );
        return Err(AppError::Conflict(format!(
            "Adoption application with ID {} is already {}",
            adoption.id, adoption.status
        )));
    }
    Ok(())
}

/// The reservation made at submission belongs to the application under
/// review, so an adopted animal only conflicts when a different application
/// has already been approved for it.
fn check_approval(adoption: &Adoption, other_approved: bool) -> AppResult<()> {
    ensure_pending(adoption)?;
    if other_approved {
        tracing::warn!(
            "Approval refused for application {}: animal {} already has an approved application",
            adoption.id,
            adoption.animal_id
        );
        return Err(AppError::Conflict(format!(
            "Animal with ID {} is already adopted",
            adoption.animal_id
        )));
    }
    Ok(())
}
