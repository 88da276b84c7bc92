//! Data models for the shelter

pub mod adoption;
pub mod animal;
pub mod enums;

// Re-export commonly used types
pub use adoption::{Adoption, AdoptionPatch, CreateAdoption};
pub use animal::{Animal, AnimalPatch, AnimalRead, CreateAnimal};
pub use enums::{AdoptionStatus, AnimalCategory, HomeOwnership, HousingSituation};
