//! Ledger primitives.
//!
//! A `Transaction` is an immutable record of one processed operation. The
//! ledger is append-only: records are never updated or deleted, and each one
//! carries the split ratios and impact values that produced it so the
//! computation can be reconstructed for audit.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Sale,
    EventReward,
    Donation,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::EventReward => "event_reward",
            Self::Donation => "donation",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "sale" => Ok(Self::Sale),
            "event_reward" => Ok(Self::EventReward),
            "donation" => Ok(Self::Donation),
            other => Err(EngineError::InvalidRecord(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

/// Kind of the entity a transaction originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Item,
    Event,
    Campaign,
}

impl ReferenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Event => "event",
            Self::Campaign => "campaign",
        }
    }
}

impl TryFrom<&str> for ReferenceKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "item" => Ok(Self::Item),
            "event" => Ok(Self::Event),
            "campaign" => Ok(Self::Campaign),
            other => Err(EngineError::InvalidRecord(format!(
                "invalid reference kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: String,
    pub kind: TransactionKind,
    /// Gross amount of the operation.
    pub amount: Money,
    /// Signed amount applied to the user's balance: positive for sales and
    /// rewards, negative for donations.
    pub user_credited: Money,
    /// Amount routed to impact conversion. Never negative.
    pub nature_fund: Money,
    pub user_share: f64,
    pub nature_share: f64,
    pub trees_planted: i64,
    pub animals_fed: i64,
    pub co2_offset_kg: f64,
    pub description: String,
    pub reference_kind: ReferenceKind,
    /// Id of the originating item, event or campaign.
    pub reference_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub amount_minor: i64,
    pub user_credited_minor: i64,
    pub nature_fund_minor: i64,
    #[sea_orm(column_type = "Double")]
    pub user_share: f64,
    #[sea_orm(column_type = "Double")]
    pub nature_share: f64,
    pub trees_planted: i64,
    pub animals_fed: i64,
    #[sea_orm(column_type = "Double")]
    pub co2_offset_kg: f64,
    pub description: String,
    pub reference_kind: String,
    pub reference_id: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            user_id: ActiveValue::Set(tx.user_id.clone()),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            amount_minor: ActiveValue::Set(tx.amount.minor()),
            user_credited_minor: ActiveValue::Set(tx.user_credited.minor()),
            nature_fund_minor: ActiveValue::Set(tx.nature_fund.minor()),
            user_share: ActiveValue::Set(tx.user_share),
            nature_share: ActiveValue::Set(tx.nature_share),
            trees_planted: ActiveValue::Set(tx.trees_planted),
            animals_fed: ActiveValue::Set(tx.animals_fed),
            co2_offset_kg: ActiveValue::Set(tx.co2_offset_kg),
            description: ActiveValue::Set(tx.description.clone()),
            reference_kind: ActiveValue::Set(tx.reference_kind.as_str().to_string()),
            reference_id: ActiveValue::Set(tx.reference_id.clone()),
            created_at: ActiveValue::Set(tx.created_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::InvalidRecord("invalid transaction id".to_string()))?,
            user_id: model.user_id,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount: Money::new(model.amount_minor),
            user_credited: Money::new(model.user_credited_minor),
            nature_fund: Money::new(model.nature_fund_minor),
            user_share: model.user_share,
            nature_share: model.nature_share,
            trees_planted: model.trees_planted,
            animals_fed: model.animals_fed,
            co2_offset_kg: model.co2_offset_kg,
            description: model.description,
            reference_kind: ReferenceKind::try_from(model.reference_kind.as_str())?,
            reference_id: model.reference_id,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_storage_strings() {
        for kind in [
            TransactionKind::Sale,
            TransactionKind::EventReward,
            TransactionKind::Donation,
        ] {
            assert_eq!(TransactionKind::try_from(kind.as_str()).unwrap(), kind);
        }
        assert!(TransactionKind::try_from("transfer").is_err());
    }

    #[test]
    fn corrupt_model_id_is_rejected() {
        let model = Model {
            id: "not-a-uuid".to_string(),
            user_id: "u1".to_string(),
            kind: "sale".to_string(),
            amount_minor: 4500,
            user_credited_minor: 3150,
            nature_fund_minor: 1350,
            user_share: 0.7,
            nature_share: 0.3,
            trees_planted: 1,
            animals_fed: 2,
            co2_offset_kg: 27.0,
            description: String::new(),
            reference_kind: "item".to_string(),
            reference_id: "i1".to_string(),
            created_at: chrono::Utc::now(),
        };

        assert!(matches!(
            Transaction::try_from(model),
            Err(EngineError::InvalidRecord(_))
        ));
    }
}
