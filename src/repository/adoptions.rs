//! Adoption applications repository for database operations

use chrono::Utc;
use sqlx::{FromRow, PgConnection, Pool, Postgres};

use super::animals::AnimalsRepository;
use crate::{
    error::{AppError, AppResult},
    models::{
        adoption::{Adoption, AdoptionPatch, CreateAdoption},
        enums::AdoptionStatus,
    },
};

/// Aggregate application counts used by statistics
#[derive(Debug, Clone, Copy, FromRow)]
pub struct AdoptionCounts {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[derive(Clone)]
pub struct AdoptionsRepository {
    pool: Pool<Postgres>,
}

impl AdoptionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get application by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Adoption> {
        sqlx::query_as::<_, Adoption>("SELECT * FROM adoptions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Adoption>> {
        let rows = sqlx::query_as::<_, Adoption>(
            "SELECT * FROM adoptions ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// All applications for an animal, any status
    pub async fn list_by_animal(&self, animal_id: i32) -> AppResult<Vec<Adoption>> {
        let rows = sqlx::query_as::<_, Adoption>(
            "SELECT * FROM adoptions WHERE animal_id = $1 ORDER BY id",
        )
        .bind(animal_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_status(&self, status: AdoptionStatus) -> AppResult<Vec<Adoption>> {
        let rows = sqlx::query_as::<_, Adoption>(
            "SELECT * FROM adoptions WHERE status = $1 ORDER BY id",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Apply a partial update under a row lock. Animal availability is not
    /// re-checked, but a new `animal_id` must reference an existing animal.
    pub async fn update(&self, id: i32, patch: AdoptionPatch) -> AppResult<Adoption> {
        let mut tx = self.pool.begin().await?;

        let mut adoption = Self::fetch_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if let Some(animal_id) = patch.animal_id {
            if !AnimalsRepository::exists(&mut tx, animal_id).await? {
                return Err(super::animals::not_found(animal_id));
            }
        }

        patch.apply_to(&mut adoption);
        let saved = Self::save(&mut tx, &adoption).await?;

        tx.commit().await?;
        Ok(saved)
    }

    /// Delete an application. The animal's adoption flag is left untouched.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM adoptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Application counts per status in one snapshot
    pub async fn counts(&self) -> AppResult<AdoptionCounts> {
        let counts = sqlx::query_as::<_, AdoptionCounts>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'Pending') AS pending,
                   COUNT(*) FILTER (WHERE status = 'Approved') AS approved,
                   COUNT(*) FILTER (WHERE status = 'Rejected') AS rejected
            FROM adoptions
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }

    // =========================================================================
    // TRANSACTION HELPERS
    // =========================================================================

    /// Load an application and lock its row until the surrounding transaction ends
    pub async fn fetch_for_update(conn: &mut PgConnection, id: i32) -> AppResult<Option<Adoption>> {
        let adoption = sqlx::query_as::<_, Adoption>("SELECT * FROM adoptions WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(adoption)
    }

    /// Insert a new Pending application
    pub async fn insert(conn: &mut PgConnection, data: &CreateAdoption) -> AppResult<Adoption> {
        let adoption = sqlx::query_as::<_, Adoption>(
            r#"
            INSERT INTO adoptions (full_name, email, phone, address, housing_situation,
                                   home_ownership, has_other_pets, previous_pet_experience,
                                   adoption_reason, animal_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(data.housing_situation)
        .bind(data.home_ownership)
        .bind(data.has_other_pets)
        .bind(&data.previous_pet_experience)
        .bind(&data.adoption_reason)
        .bind(data.animal_id)
        .bind(AdoptionStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;
        Ok(adoption)
    }

    pub async fn set_status(conn: &mut PgConnection, id: i32, status: AdoptionStatus) -> AppResult<Adoption> {
        sqlx::query_as::<_, Adoption>("UPDATE adoptions SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Whether an application other than `exclude_id` is already approved for the animal
    pub async fn other_approved_exists(
        conn: &mut PgConnection,
        animal_id: i32,
        exclude_id: i32,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM adoptions WHERE animal_id = $1 AND id <> $2 AND status = $3)",
        )
        .bind(animal_id)
        .bind(exclude_id)
        .bind(AdoptionStatus::Approved)
        .fetch_one(&mut *conn)
        .await?;
        Ok(exists)
    }

    async fn save(conn: &mut PgConnection, adoption: &Adoption) -> AppResult<Adoption> {
        let saved = sqlx::query_as::<_, Adoption>(
            r#"
            UPDATE adoptions
            SET full_name = $2, email = $3, phone = $4, address = $5,
                housing_situation = $6, home_ownership = $7, has_other_pets = $8,
                previous_pet_experience = $9, adoption_reason = $10, animal_id = $11,
                status = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(adoption.id)
        .bind(&adoption.full_name)
        .bind(&adoption.email)
        .bind(&adoption.phone)
        .bind(&adoption.address)
        .bind(adoption.housing_situation)
        .bind(adoption.home_ownership)
        .bind(adoption.has_other_pets)
        .bind(&adoption.previous_pet_experience)
        .bind(&adoption.adoption_reason)
        .bind(adoption.animal_id)
        .bind(adoption.status)
        .fetch_one(&mut *conn)
        .await?;
        Ok(saved)
    }
}

pub(crate) fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Adoption application with ID {} not found", id))
}
