//! Result payloads handed back to the caller after a processing operation.
//!
//! The engine does not prescribe presentation; these are the data contracts
//! a caller renders as a toast, alert or stats screen. Success/failure is
//! carried by `Result`, so the payloads hold only data.

use serde::Serialize;
use uuid::Uuid;

use crate::{Impact, Money, Sponsorship};

/// Summary of a processed item sale.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SaleOutcome {
    pub transaction_id: Uuid,
    /// Gross sale amount.
    pub total_amount: Money,
    pub user_credited: Money,
    pub nature_fund: Money,
    /// Impact purchased with the nature fund.
    pub impact: Impact,
}

/// Summary of a credited event reward.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RewardOutcome {
    pub transaction_id: Uuid,
    pub amount: Money,
}

/// Summary of a processed campaign donation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DonationOutcome {
    pub transaction_id: Uuid,
    pub amount: Money,
    /// Impact of the full donated amount.
    pub impact: Impact,
}

/// Summary of a created sponsorship.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SponsorshipOutcome {
    pub sponsorship_id: Uuid,
    pub sponsorship: Sponsorship,
    /// Impact of the fee's nature portion at current rates.
    pub impact: Impact,
}

/// Aggregate view over a user's active sponsorships.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AdoptionStats {
    pub active_count: usize,
    /// Sum of the monthly fees of all active sponsorships.
    pub monthly_commitment: Money,
    /// Per-sponsorship impact recomputed at current rates and summed.
    pub impact: Impact,
}
