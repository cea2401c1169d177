//! Command structs for processing operations.
//!
//! These types group parameters for the engine's write operations, keeping
//! call sites readable and the timestamps explicit (no ambient clock inside
//! business logic).

use chrono::{DateTime, Utc};

use crate::{AnimalProfile, Money};

/// Process the sale of a recycled item.
#[derive(Clone, Debug)]
pub struct SaleCmd {
    pub item_id: String,
    pub user_id: String,
    /// Gross sale amount, split between user share and nature fund.
    pub gross_amount: Money,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

impl SaleCmd {
    #[must_use]
    pub fn new(
        item_id: impl Into<String>,
        user_id: impl Into<String>,
        gross_amount: Money,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            user_id: user_id.into(),
            gross_amount,
            description: String::new(),
            occurred_at,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Credit a reward for attending an event.
#[derive(Clone, Debug)]
pub struct RewardCmd {
    pub event_id: String,
    pub user_id: String,
    /// Reward amount, credited in full (no nature-fund split).
    pub amount: Money,
    pub event_title: String,
    pub occurred_at: DateTime<Utc>,
}

impl RewardCmd {
    #[must_use]
    pub fn new(
        event_id: impl Into<String>,
        user_id: impl Into<String>,
        amount: Money,
        event_title: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            user_id: user_id.into(),
            amount,
            event_title: event_title.into(),
            occurred_at,
        }
    }
}

/// Donate to a campaign from the user's balance.
#[derive(Clone, Debug)]
pub struct DonationCmd {
    pub campaign_id: String,
    pub user_id: String,
    /// Donation amount; 100% is routed to impact conversion.
    pub amount: Money,
    pub campaign_title: String,
    pub occurred_at: DateTime<Utc>,
}

impl DonationCmd {
    #[must_use]
    pub fn new(
        campaign_id: impl Into<String>,
        user_id: impl Into<String>,
        amount: Money,
        campaign_title: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            user_id: user_id.into(),
            amount,
            campaign_title: campaign_title.into(),
            occurred_at,
        }
    }
}

/// Start a recurring sponsorship for an animal.
#[derive(Clone, Debug)]
pub struct SponsorCmd {
    pub user_id: String,
    pub animal: AnimalProfile,
    pub occurred_at: DateTime<Utc>,
}

impl SponsorCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, animal: AnimalProfile, occurred_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            animal,
            occurred_at,
        }
    }
}
