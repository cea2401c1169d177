//! Per-user wallet state: spendable balance plus cumulative impact counters.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::Serialize;

use crate::{Impact, Money, impact::round1};

/// A user's wallet.
///
/// Created implicitly: reading an absent wallet yields the all-zero default,
/// and the row is first written when a transaction touches it. Wallets are
/// mutated only through the engine's processing operations and never
/// deleted.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WalletState {
    /// Spendable balance. Debit paths floor at zero; the persisted value is
    /// never negative.
    pub balance: Money,
    /// Cumulative total of donations and sponsorship fees.
    pub total_donated: Money,
    pub animals_saved: i64,
    pub trees_planted: i64,
    pub animals_fed: i64,
    pub co2_offset_kg: f64,
    pub items_recycled: i64,
    /// Per-user override for the sale split ratio, in `[0, 1]`.
    ///
    /// `None` (or a non-finite stored value) means the default 0.70.
    pub sale_user_share: Option<f64>,
}

impl WalletState {
    pub fn credit(&mut self, amount: Money) {
        self.balance += amount;
    }

    /// Debits the balance, flooring at zero.
    ///
    /// The nominal debit may exceed the prior balance; the persisted state
    /// still never goes negative.
    pub fn debit_clamped(&mut self, amount: Money) {
        self.balance = Money::new((self.balance - amount).minor().max(0));
    }

    /// Adds an impact result onto the cumulative counters.
    pub fn add_impact(&mut self, impact: &Impact) {
        self.trees_planted += impact.trees;
        self.animals_fed += impact.animals_fed;
        self.co2_offset_kg = round1(self.co2_offset_kg + impact.co2_offset_kg);
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub balance_minor: i64,
    pub total_donated_minor: i64,
    pub animals_saved: i64,
    pub trees_planted: i64,
    pub animals_fed: i64,
    #[sea_orm(column_type = "Double")]
    pub co2_offset_kg: f64,
    pub items_recycled: i64,
    #[sea_orm(column_type = "Double", nullable)]
    pub sale_user_share: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for WalletState {
    fn from(model: Model) -> Self {
        Self {
            balance: Money::new(model.balance_minor),
            total_donated: Money::new(model.total_donated_minor),
            animals_saved: model.animals_saved,
            trees_planted: model.trees_planted,
            animals_fed: model.animals_fed,
            co2_offset_kg: model.co2_offset_kg,
            items_recycled: model.items_recycled,
            sale_user_share: model.sale_user_share,
        }
    }
}

impl From<(&str, &WalletState)> for ActiveModel {
    fn from((user_id, wallet): (&str, &WalletState)) -> Self {
        Self {
            user_id: ActiveValue::Set(user_id.to_string()),
            balance_minor: ActiveValue::Set(wallet.balance.minor()),
            total_donated_minor: ActiveValue::Set(wallet.total_donated.minor()),
            animals_saved: ActiveValue::Set(wallet.animals_saved),
            trees_planted: ActiveValue::Set(wallet.trees_planted),
            animals_fed: ActiveValue::Set(wallet.animals_fed),
            co2_offset_kg: ActiveValue::Set(wallet.co2_offset_kg),
            items_recycled: ActiveValue::Set(wallet.items_recycled),
            sale_user_share: ActiveValue::Set(wallet.sale_user_share),
        }
    }
}
