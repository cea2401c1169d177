//! In-memory [`LedgerStore`] mirroring a device-local key-value database.
//!
//! Useful for unit tests and for embedders that keep the ledger on-device
//! instead of behind a SQL connection.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Sponsorship, SponsorshipPatch, Transaction, WalletState,
};

use super::LedgerStore;

#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    wallets: Mutex<HashMap<String, WalletState>>,
    transactions: Mutex<Vec<Transaction>>,
    sponsorships: Mutex<Vec<Sponsorship>>,
}

impl MemoryLedgerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the full ledger, oldest first. Inspection helper for
    /// tests and debugging; not part of the store contract.
    #[must_use]
    pub fn ledger(&self) -> Vec<Transaction> {
        lock(&self.transactions).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn wallet(&self, user_id: &str) -> ResultEngine<Option<WalletState>> {
        Ok(lock(&self.wallets).get(user_id).cloned())
    }

    async fn put_wallet(&self, user_id: &str, wallet: &WalletState) -> ResultEngine<()> {
        lock(&self.wallets).insert(user_id.to_string(), wallet.clone());
        Ok(())
    }

    async fn append_transaction(&self, tx: &Transaction) -> ResultEngine<Uuid> {
        lock(&self.transactions).push(tx.clone());
        Ok(tx.id)
    }

    async fn transactions_for_user(&self, user_id: &str) -> ResultEngine<Vec<Transaction>> {
        let mut out: Vec<Transaction> = lock(&self.transactions)
            .iter()
            .filter(|tx| tx.user_id == user_id)
            .cloned()
            .collect();
        out.reverse();
        Ok(out)
    }

    async fn append_sponsorship(&self, sponsorship: &Sponsorship) -> ResultEngine<Uuid> {
        lock(&self.sponsorships).push(sponsorship.clone());
        Ok(sponsorship.id)
    }

    async fn update_sponsorship(&self, id: Uuid, patch: SponsorshipPatch) -> ResultEngine<()> {
        let mut sponsorships = lock(&self.sponsorships);
        let Some(sponsorship) = sponsorships.iter_mut().find(|s| s.id == id) else {
            return Err(EngineError::KeyNotFound(id.to_string()));
        };
        sponsorship.status = patch.status;
        sponsorship.cancelled_at = patch.cancelled_at;
        Ok(())
    }

    async fn sponsorships(&self) -> ResultEngine<Vec<Sponsorship>> {
        Ok(lock(&self.sponsorships).clone())
    }
}
