//! Business logic services

pub mod adoptions;
pub mod animals;
pub mod images;
pub mod stats;

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub animals: animals::AnimalsService,
    pub adoptions: adoptions::AdoptionsService,
    pub stats: stats::StatsService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository and image storage
    pub fn new(repository: Repository, images: images::ImageStorage) -> Self {
        Self {
            animals: animals::AnimalsService::new(repository.clone(), images),
            adoptions: adoptions::AdoptionsService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            repository,
        }
    }
}

/// Reject negative pagination bounds
pub(crate) fn validate_page(skip: i64, limit: i64) -> AppResult<()> {
    if skip < 0 {
        return Err(AppError::Validation("skip must not be negative".to_string()));
    }
    if limit < 0 {
        return Err(AppError::Validation("limit must not be negative".to_string()));
    }
    Ok(())
}
