//! Financial split & impact ledger engine.
//!
//! The engine splits gross amounts between a user's spendable balance and a
//! nature fund, converts fund amounts into gamified impact metrics, keeps
//! per-user wallet state and records every processed operation in an
//! append-only ledger. Persistence goes through the [`LedgerStore`] seam;
//! the crate ships a sea-orm/SQLite store and an in-memory one.

use sea_orm::DatabaseConnection;

pub use commands::{DonationCmd, RewardCmd, SaleCmd, SponsorCmd};
pub use error::EngineError;
pub use impact::{Impact, ImpactRates};
pub use money::Money;
pub use outcome::{
    AdoptionStats, DonationOutcome, RewardOutcome, SaleOutcome, SponsorshipOutcome,
};
pub use split::{DEFAULT_USER_SHARE, RevenueSplit, normalize_share, split};
pub use sponsorships::{AnimalProfile, Sponsorship, SponsorshipPatch, SponsorshipStatus};
pub use store::{DbLedgerStore, LedgerStore, MemoryLedgerStore};
pub use transactions::{ReferenceKind, Transaction, TransactionKind};
pub use wallets::WalletState;

mod commands;
mod error;
mod impact;
mod money;
mod ops;
mod outcome;
mod split;
mod sponsorships;
mod store;
mod transactions;
mod wallets;

pub type ResultEngine<T> = Result<T, EngineError>;

/// The processing engine.
///
/// Stateless besides its store handle and conversion rates: every operation
/// reads the wallet it needs, computes, writes back and appends to the
/// ledger. Generic over the store so tests and embedders can swap the
/// backend.
#[derive(Debug)]
pub struct Engine<S = DbLedgerStore> {
    store: S,
    rates: ImpactRates,
}

impl Engine<DbLedgerStore> {
    /// Return a builder for a database-backed `Engine`.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl<S: LedgerStore> Engine<S> {
    /// Creates an engine over an arbitrary store.
    pub fn with_store(store: S, rates: ImpactRates) -> Self {
        Self { store, rates }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Conversion rates in effect.
    pub fn rates(&self) -> &ImpactRates {
        &self.rates
    }

    /// Reads a user's wallet; an absent wallet is the all-zero default.
    pub async fn wallet(&self, user_id: &str) -> ResultEngine<WalletState> {
        Ok(self.store.wallet(user_id).await?.unwrap_or_default())
    }

    /// Lists a user's ledger records, most recent first.
    pub async fn user_transactions(&self, user_id: &str) -> ResultEngine<Vec<Transaction>> {
        self.store.transactions_for_user(user_id).await
    }
}

/// The builder for a database-backed `Engine`.
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    rates: ImpactRates,
}

impl EngineBuilder {
    /// Pass the required database connection.
    #[must_use]
    pub fn database(mut self, database: DatabaseConnection) -> EngineBuilder {
        self.database = database;
        self
    }

    /// Override the default conversion rates.
    #[must_use]
    pub fn rates(mut self, rates: ImpactRates) -> EngineBuilder {
        self.rates = rates;
        self
    }

    /// Construct the `Engine`.
    pub fn build(self) -> Engine<DbLedgerStore> {
        Engine {
            store: DbLedgerStore::new(self.database),
            rates: self.rates,
        }
    }
}
