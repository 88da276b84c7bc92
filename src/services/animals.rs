//! Animal registry service

use validator::Validate;

use crate::{
    error::AppResult,
    models::animal::{Animal, AnimalPatch, AnimalQuery, CreateAnimal},
    repository::Repository,
};

use super::{
    images::{ImageStorage, ImageUpload},
    validate_page,
};

#[derive(Clone)]
pub struct AnimalsService {
    repository: Repository,
    images: ImageStorage,
}

impl AnimalsService {
    pub fn new(repository: Repository, images: ImageStorage) -> Self {
        Self { repository, images }
    }

    /// Register a new animal, storing its image first when one is supplied
    pub async fn create(&self, mut data: CreateAnimal, image: Option<ImageUpload>) -> AppResult<Animal> {
        data.validate()?;

        if let Some(image) = image {
            data.image_path = Some(self.images.save_animal_image(&data.name, &image).await?);
        }

        match self.repository.animals.create(&data).await {
            Ok(animal) => {
                tracing::info!("Registered animal {} ({}, {})", animal.id, animal.name, animal.animal_type);
                Ok(animal)
            }
            Err(e) => {
                if let Some(path) = &data.image_path {
                    self.images.remove(path).await;
                }
                Err(e)
            }
        }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Animal> {
        self.repository.animals.get_by_id(id).await
    }

    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Animal>> {
        validate_page(skip, limit)?;
        self.repository.animals.list(skip, limit).await
    }

    pub async fn search(&self, query: &AnimalQuery) -> AppResult<Vec<Animal>> {
        self.repository.animals.search(query).await
    }

    /// Apply a partial update. A new image replaces the stored reference and
    /// the previous file is removed once the update commits.
    pub async fn update(&self, id: i32, mut patch: AnimalPatch, image: Option<ImageUpload>) -> AppResult<Animal> {
        patch.validate()?;

        let mut uploaded = None;
        if let Some(image) = image {
            let hint = patch.name.clone().unwrap_or_else(|| format!("animal_{}", id));
            let path = self.images.save_animal_image(&hint, &image).await?;
            patch.image_path = Some(path.clone());
            uploaded = Some(path);
        }

        match self.repository.animals.update(id, patch).await {
            Ok((animal, replaced)) => {
                if let Some(old) = replaced {
                    self.images.remove(&old).await;
                    tracing::debug!("Removed replaced image {} of animal {}", old, id);
                }
                Ok(animal)
            }
            Err(e) => {
                if let Some(path) = &uploaded {
                    self.images.remove(path).await;
                }
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.animals.delete(id).await?;
        tracing::info!("Deleted animal {}", id);
        Ok(())
    }

    /// Mark an animal as adopted (idempotent)
    pub async fn mark_adopted(&self, id: i32) -> AppResult<Animal> {
        let animal = self.repository.animals.mark_adopted(id).await?;
        tracing::info!("Animal {} marked as adopted", id);
        Ok(animal)
    }
}
