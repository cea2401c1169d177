//! Processing operations: the orchestration layer over split, impact
//! conversion and the ledger store.
//!
//! Every operation follows the same sequence: one consistent wallet read,
//! pure computation, wallet overwrite, ledger append. Store calls are issued
//! sequentially; the first failure is surfaced to the caller and no partial
//! state is ever reported as success.

use crate::{EngineError, Money, ResultEngine};

mod donations;
mod rewards;
mod sales;
mod sponsorships;

/// Gross amounts entering the ledger must not be negative; zero is allowed
/// and degrades to a no-op split.
pub(crate) fn ensure_not_negative(amount: Money, label: &str) -> ResultEngine<()> {
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must not be negative, got {amount}"
        )));
    }
    Ok(())
}
