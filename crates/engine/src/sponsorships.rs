//! Recurring animal sponsorships.
//!
//! A sponsorship is a soft-deleted pledge: cancellation flips the status and
//! stamps `cancelled_at`, but the record is retained.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SponsorshipStatus {
    Active,
    Cancelled,
}

impl SponsorshipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for SponsorshipStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EngineError::InvalidRecord(format!(
                "invalid sponsorship status: {other}"
            ))),
        }
    }
}

/// Caller-supplied profile of the animal being sponsored.
///
/// Only the identifying fields and the fee are persisted;
/// `impact_metric`/`adoption_level` are presentation data echoed back to the
/// caller in the created record's context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimalProfile {
    pub id: String,
    pub name: String,
    pub species: String,
    pub monthly_fee: Money,
    pub impact_metric: String,
    pub adoption_level: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sponsorship {
    pub id: Uuid,
    pub user_id: String,
    pub animal_id: String,
    pub animal_name: String,
    pub species: String,
    pub monthly_fee: Money,
    pub status: SponsorshipStatus,
    pub created_at: DateTime<Utc>,
    pub next_charge_date: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Sponsorship {
    /// Creates an active sponsorship with the next charge 30 days out.
    pub fn new(user_id: &str, animal: &AnimalProfile, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            animal_id: animal.id.clone(),
            animal_name: animal.name.clone(),
            species: animal.species.clone(),
            monthly_fee: animal.monthly_fee,
            status: SponsorshipStatus::Active,
            created_at,
            next_charge_date: created_at + Duration::days(30),
            cancelled_at: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SponsorshipStatus::Active
    }
}

/// Partial update applied to a stored sponsorship.
///
/// Mirrors the store's field-overwrite contract: only the fields carried
/// here change, everything else is left as-is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SponsorshipPatch {
    pub status: SponsorshipStatus,
    pub cancelled_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sponsorships")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub animal_id: String,
    pub animal_name: String,
    pub species: String,
    pub monthly_fee_minor: i64,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub next_charge_date: DateTimeUtc,
    pub cancelled_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Sponsorship> for ActiveModel {
    fn from(sponsorship: &Sponsorship) -> Self {
        Self {
            id: ActiveValue::Set(sponsorship.id.to_string()),
            user_id: ActiveValue::Set(sponsorship.user_id.clone()),
            animal_id: ActiveValue::Set(sponsorship.animal_id.clone()),
            animal_name: ActiveValue::Set(sponsorship.animal_name.clone()),
            species: ActiveValue::Set(sponsorship.species.clone()),
            monthly_fee_minor: ActiveValue::Set(sponsorship.monthly_fee.minor()),
            status: ActiveValue::Set(sponsorship.status.as_str().to_string()),
            created_at: ActiveValue::Set(sponsorship.created_at),
            next_charge_date: ActiveValue::Set(sponsorship.next_charge_date),
            cancelled_at: ActiveValue::Set(sponsorship.cancelled_at),
        }
    }
}

impl TryFrom<Model> for Sponsorship {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::InvalidRecord("invalid sponsorship id".to_string()))?,
            user_id: model.user_id,
            animal_id: model.animal_id,
            animal_name: model.animal_name,
            species: model.species,
            monthly_fee: Money::new(model.monthly_fee_minor),
            status: SponsorshipStatus::try_from(model.status.as_str())?,
            created_at: model.created_at,
            next_charge_date: model.next_charge_date,
            cancelled_at: model.cancelled_at,
        })
    }
}
