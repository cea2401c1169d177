//! Persistence seam between the engine and its ledger backend.
//!
//! The engine never talks to a database directly; it goes through
//! [`LedgerStore`], a small key-value-shaped contract. Wallet writes use
//! whole-row overwrite semantics (the engine computes absolute values before
//! calling), ledger and sponsorship records are append-only, and sponsorship
//! listing is a full scan filtered caller-side.
//!
//! There is deliberately no cross-call atomicity in the contract: a wallet
//! write and the matching ledger append are separate calls, and a failure
//! between them can leave one applied without the other. The engine surfaces
//! the first error instead of hiding the gap.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{ResultEngine, Sponsorship, SponsorshipPatch, Transaction, WalletState};

mod db;
mod memory;

pub use db::DbLedgerStore;
pub use memory::MemoryLedgerStore;

#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Reads a wallet. Absence is not an error; callers treat it as the
    /// all-zero default.
    async fn wallet(&self, user_id: &str) -> ResultEngine<Option<WalletState>>;

    /// Overwrites a wallet row with absolute values, creating it if absent.
    async fn put_wallet(&self, user_id: &str, wallet: &WalletState) -> ResultEngine<()>;

    /// Appends an immutable ledger record and returns its id.
    async fn append_transaction(&self, tx: &Transaction) -> ResultEngine<Uuid>;

    /// Lists a user's ledger records, most recent first.
    async fn transactions_for_user(&self, user_id: &str) -> ResultEngine<Vec<Transaction>>;

    /// Appends a sponsorship record and returns its id.
    async fn append_sponsorship(&self, sponsorship: &Sponsorship) -> ResultEngine<Uuid>;

    /// Applies a partial update to a stored sponsorship.
    async fn update_sponsorship(&self, id: Uuid, patch: SponsorshipPatch) -> ResultEngine<()>;

    /// Full scan over all sponsorship records, in arbitrary order.
    ///
    /// Filtering by user or status is the caller's job; no server-side query
    /// capability is assumed of the backend.
    async fn sponsorships(&self) -> ResultEngine<Vec<Sponsorship>>;
}
