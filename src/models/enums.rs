//! Closed domain enums, stored in the database as their display label

use serde::{Deserialize, Serialize};
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef},
    Decode, Encode, Postgres,
};
use utoipa::ToSchema;

/// Implements `Display`, `FromStr` and TEXT-backed sqlx conversions for an enum
/// exposing `as_str()` and `ALL`.
macro_rules! text_enum {
    ($ty:ident) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| format!("Invalid {}: {}", stringify!($ty), s))
            }
        }

        impl sqlx::Type<Postgres> for $ty {
            fn type_info() -> PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
                let s = <&str as Decode<Postgres>>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// AdoptionStatus
// ---------------------------------------------------------------------------

/// Adoption application status. `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum AdoptionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl AdoptionStatus {
    pub const ALL: [AdoptionStatus; 3] = [
        AdoptionStatus::Pending,
        AdoptionStatus::Approved,
        AdoptionStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdoptionStatus::Pending => "Pending",
            AdoptionStatus::Approved => "Approved",
            AdoptionStatus::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AdoptionStatus::Pending)
    }
}

text_enum!(AdoptionStatus);

// ---------------------------------------------------------------------------
// HousingSituation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum HousingSituation {
    House,
    Apartment,
    Condo,
    #[serde(rename = "Mobile Home")]
    MobileHome,
    Other,
}

impl HousingSituation {
    pub const ALL: [HousingSituation; 5] = [
        HousingSituation::House,
        HousingSituation::Apartment,
        HousingSituation::Condo,
        HousingSituation::MobileHome,
        HousingSituation::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HousingSituation::House => "House",
            HousingSituation::Apartment => "Apartment",
            HousingSituation::Condo => "Condo",
            HousingSituation::MobileHome => "Mobile Home",
            HousingSituation::Other => "Other",
        }
    }
}

text_enum!(HousingSituation);

// ---------------------------------------------------------------------------
// HomeOwnership
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum HomeOwnership {
    Own,
    Rent,
    Other,
}

impl HomeOwnership {
    pub const ALL: [HomeOwnership; 3] = [HomeOwnership::Own, HomeOwnership::Rent, HomeOwnership::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeOwnership::Own => "Own",
            HomeOwnership::Rent => "Rent",
            HomeOwnership::Other => "Other",
        }
    }
}

text_enum!(HomeOwnership);

// ---------------------------------------------------------------------------
// AnimalCategory
// ---------------------------------------------------------------------------

/// Fixed reporting categories for animal types.
///
/// Matching is exact and case-sensitive: `"dog"` falls into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimalCategory {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Other,
}

impl AnimalCategory {
    pub fn from_type(animal_type: &str) -> Self {
        match animal_type {
            "Dog" => AnimalCategory::Dog,
            "Cat" => AnimalCategory::Cat,
            "Bird" => AnimalCategory::Bird,
            "Rabbit" => AnimalCategory::Rabbit,
            _ => AnimalCategory::Other,
        }
    }
}
