//! Animals repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::animal::{Animal, AnimalPatch, AnimalQuery, CreateAnimal},
};

/// Aggregate animal counts used by statistics
#[derive(Debug, Clone, Copy, FromRow)]
pub struct AnimalCounts {
    pub total: i64,
    pub adopted: i64,
    pub new_admissions: i64,
}

#[derive(Clone)]
pub struct AnimalsRepository {
    pool: Pool<Postgres>,
}

impl AnimalsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// Get animal by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Animal> {
        sqlx::query_as::<_, Animal>("SELECT * FROM animals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// List animals in insertion order
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Animal>> {
        let rows = sqlx::query_as::<_, Animal>(
            "SELECT * FROM animals ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Search animals; every supplied filter must match
    pub async fn search(&self, query: &AnimalQuery) -> AppResult<Vec<Animal>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM animals WHERE TRUE");

        // strpos keeps substring matching case-sensitive without LIKE escaping
        if let Some(name) = query.name() {
            builder.push(" AND strpos(name, ").push_bind(name.to_string()).push(") > 0");
        }
        if let Some(animal_type) = query.animal_type() {
            builder.push(" AND type = ").push_bind(animal_type.to_string());
        }
        if let Some(breed) = query.breed() {
            builder.push(" AND strpos(breed, ").push_bind(breed.to_string()).push(") > 0");
        }
        if let Some(is_adopted) = query.is_adopted {
            builder.push(" AND is_adopted = ").push_bind(is_adopted);
        }
        builder.push(" ORDER BY id");

        let rows = builder
            .build_query_as::<Animal>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Create a new animal, available for adoption
    pub async fn create(&self, data: &CreateAnimal) -> AppResult<Animal> {
        let now = Utc::now();

        let animal = sqlx::query_as::<_, Animal>(
            r#"
            INSERT INTO animals (name, type, age, breed, gender, health_status, description,
                                 image_path, created_at, updated_at, is_adopted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9, FALSE)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.animal_type)
        .bind(data.age)
        .bind(&data.breed)
        .bind(&data.gender)
        .bind(&data.health_status)
        .bind(&data.description)
        .bind(&data.image_path)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(animal)
    }

    /// Apply a partial update under a row lock. Also returns the image
    /// reference the update replaced.
    pub async fn update(&self, id: i32, patch: AnimalPatch) -> AppResult<(Animal, Option<String>)> {
        let mut tx = self.pool.begin().await?;

        let mut animal = Self::fetch_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        let replaced = patch.apply_to(&mut animal, Utc::now());
        let saved = Self::save(&mut tx, &animal).await?;

        tx.commit().await?;
        Ok((saved, replaced))
    }

    /// Delete an animal. Refused while adoption applications reference it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        Self::fetch_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let applications: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM adoptions WHERE animal_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if applications > 0 {
            return Err(AppError::Conflict(format!(
                "Animal with ID {} has {} adoption application(s)",
                id, applications
            )));
        }

        sqlx::query("DELETE FROM animals WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Mark an animal as adopted. Already-adopted animals are left as they are.
    pub async fn mark_adopted(&self, id: i32) -> AppResult<Animal> {
        sqlx::query_as::<_, Animal>(
            "UPDATE animals SET is_adopted = TRUE, updated_at = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    // =========================================================================
    // STATS
    // =========================================================================

    /// Total, adopted and recently admitted animals in one snapshot
    pub async fn counts(&self, admitted_since: DateTime<Utc>) -> AppResult<AnimalCounts> {
        let counts = sqlx::query_as::<_, AnimalCounts>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE is_adopted) AS adopted,
                   COUNT(*) FILTER (WHERE created_at >= $1) AS new_admissions
            FROM animals
            "#,
        )
        .bind(admitted_since)
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }

    pub async fn count_all(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM animals")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Number of animals per distinct type value
    pub async fn count_by_type(&self) -> AppResult<Vec<(String, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT type, COUNT(*) FROM animals GROUP BY type",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // =========================================================================
    // TRANSACTION HELPERS
    // =========================================================================

    /// Load an animal and lock its row until the surrounding transaction ends
    pub async fn fetch_for_update(conn: &mut PgConnection, id: i32) -> AppResult<Option<Animal>> {
        let animal = sqlx::query_as::<_, Animal>("SELECT * FROM animals WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(animal)
    }

    pub async fn exists(conn: &mut PgConnection, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM animals WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(exists)
    }

    pub async fn set_adopted(conn: &mut PgConnection, id: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE animals SET is_adopted = TRUE, updated_at = $2 WHERE id = $1")
            .bind(id)
            .bind(Utc::now())
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn save(conn: &mut PgConnection, animal: &Animal) -> AppResult<Animal> {
        let saved = sqlx::query_as::<_, Animal>(
            r#"
            UPDATE animals
            SET name = $2, type = $3, age = $4, breed = $5, gender = $6,
                health_status = $7, description = $8, image_path = $9,
                is_adopted = $10, updated_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(animal.id)
        .bind(&animal.name)
        .bind(&animal.animal_type)
        .bind(animal.age)
        .bind(&animal.breed)
        .bind(&animal.gender)
        .bind(&animal.health_status)
        .bind(&animal.description)
        .bind(&animal.image_path)
        .bind(animal.is_adopted)
        .bind(animal.updated_at)
        .fetch_one(&mut *conn)
        .await?;
        Ok(saved)
    }
}

pub(crate) fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Animal with ID {} not found", id))
}
