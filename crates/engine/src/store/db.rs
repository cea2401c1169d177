//! SQL-backed [`LedgerStore`] built on sea-orm.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Sponsorship, SponsorshipPatch, Transaction, WalletState,
    sponsorships, transactions, wallets,
};

use super::LedgerStore;

/// Production store: one table per collection, schema owned by the
/// `migration` crate.
#[derive(Clone, Debug)]
pub struct DbLedgerStore {
    database: DatabaseConnection,
}

impl DbLedgerStore {
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl LedgerStore for DbLedgerStore {
    async fn wallet(&self, user_id: &str) -> ResultEngine<Option<WalletState>> {
        let model = wallets::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?;
        Ok(model.map(WalletState::from))
    }

    async fn put_wallet(&self, user_id: &str, wallet: &WalletState) -> ResultEngine<()> {
        let exists = wallets::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?
            .is_some();

        let model = wallets::ActiveModel::from((user_id, wallet));
        if exists {
            model.update(&self.database).await?;
        } else {
            model.insert(&self.database).await?;
        }
        Ok(())
    }

    async fn append_transaction(&self, tx: &Transaction) -> ResultEngine<Uuid> {
        transactions::ActiveModel::from(tx)
            .insert(&self.database)
            .await?;
        Ok(tx.id)
    }

    async fn transactions_for_user(&self, user_id: &str) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Transaction::try_from).collect()
    }

    async fn append_sponsorship(&self, sponsorship: &Sponsorship) -> ResultEngine<Uuid> {
        sponsorships::ActiveModel::from(sponsorship)
            .insert(&self.database)
            .await?;
        Ok(sponsorship.id)
    }

    async fn update_sponsorship(&self, id: Uuid, patch: SponsorshipPatch) -> ResultEngine<()> {
        let model = sponsorships::ActiveModel {
            id: ActiveValue::Set(id.to_string()),
            status: ActiveValue::Set(patch.status.as_str().to_string()),
            cancelled_at: ActiveValue::Set(patch.cancelled_at),
            ..Default::default()
        };

        match model.update(&self.database).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(EngineError::KeyNotFound(id.to_string())),
            Err(err) => Err(err.into()),
        }
    }

    async fn sponsorships(&self) -> ResultEngine<Vec<Sponsorship>> {
        let models = sponsorships::Entity::find().all(&self.database).await?;
        models.into_iter().map(Sponsorship::try_from).collect()
    }
}
