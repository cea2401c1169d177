//! Sponsorship lifecycle: create, cancel, list, aggregate stats.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    AdoptionStats, Engine, Impact, LedgerStore, Money, ResultEngine, SponsorCmd, Sponsorship,
    SponsorshipOutcome, SponsorshipPatch, SponsorshipStatus, split,
};

use super::ensure_not_negative;

impl<S: LedgerStore> Engine<S> {
    /// Starts a recurring sponsorship for an animal.
    ///
    /// The monthly fee is debited up front (floored at zero) and counted as
    /// a donation. The reported impact comes from the fixed 70/30 split of
    /// the fee; the per-wallet sale ratio override is intentionally not
    /// honored on this path.
    pub async fn create_sponsorship(&self, cmd: SponsorCmd) -> ResultEngine<SponsorshipOutcome> {
        ensure_not_negative(cmd.animal.monthly_fee, "monthly fee")?;

        let sponsorship = Sponsorship::new(&cmd.user_id, &cmd.animal, cmd.occurred_at);
        let sponsorship_id = self.store().append_sponsorship(&sponsorship).await?;

        let impact = self.rates().convert(sponsorship_fund(sponsorship.monthly_fee));

        let mut wallet = self.store().wallet(&cmd.user_id).await?.unwrap_or_default();
        wallet.debit_clamped(sponsorship.monthly_fee);
        wallet.animals_saved += 1;
        wallet.total_donated += sponsorship.monthly_fee;
        self.store().put_wallet(&cmd.user_id, &wallet).await?;

        tracing::debug!(
            user_id = %cmd.user_id,
            %sponsorship_id,
            animal_id = %sponsorship.animal_id,
            monthly_fee = sponsorship.monthly_fee.minor(),
            "sponsorship created"
        );

        Ok(SponsorshipOutcome {
            sponsorship_id,
            sponsorship,
            impact,
        })
    }

    /// Cancels a sponsorship: status flip plus timestamp, no refund. The
    /// record is retained.
    pub async fn cancel_sponsorship(
        &self,
        id: Uuid,
        cancelled_at: DateTime<Utc>,
    ) -> ResultEngine<()> {
        self.store()
            .update_sponsorship(
                id,
                SponsorshipPatch {
                    status: SponsorshipStatus::Cancelled,
                    cancelled_at: Some(cancelled_at),
                },
            )
            .await?;

        tracing::debug!(sponsorship_id = %id, "sponsorship cancelled");
        Ok(())
    }

    /// Returns the user's active sponsorships, in arbitrary order.
    ///
    /// The store contract is a full scan; filtering happens here, on the
    /// engine side.
    pub async fn user_sponsorships(&self, user_id: &str) -> ResultEngine<Vec<Sponsorship>> {
        let all = self.store().sponsorships().await?;
        Ok(all
            .into_iter()
            .filter(|s| s.user_id == user_id && s.is_active())
            .collect())
    }

    /// Aggregates a user's active sponsorships.
    ///
    /// Impact is recomputed from each fee at the engine's current rates
    /// rather than read back from stored records, so a rate change reprices
    /// every historical aggregate. Each sponsorship converts independently;
    /// the fees are never pooled into one conversion.
    pub async fn adoption_stats(&self, user_id: &str) -> ResultEngine<AdoptionStats> {
        let active = self.user_sponsorships(user_id).await?;

        let mut monthly_commitment = Money::ZERO;
        let mut impact = Impact::default();
        for sponsorship in &active {
            monthly_commitment += sponsorship.monthly_fee;
            impact = impact + self.rates().convert(sponsorship_fund(sponsorship.monthly_fee));
        }

        Ok(AdoptionStats {
            active_count: active.len(),
            monthly_commitment,
            impact,
        })
    }
}

/// Nature portion of a monthly fee under the fixed default split.
fn sponsorship_fund(monthly_fee: Money) -> Money {
    split::split(monthly_fee, None).nature_fund
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::{
        AnimalProfile, Engine, EngineError, ImpactRates, LedgerStore, MemoryLedgerStore, Money,
        SponsorCmd, WalletState,
    };

    fn animal(id: &str, fee_minor: i64) -> AnimalProfile {
        AnimalProfile {
            id: id.to_string(),
            name: "Luna".to_string(),
            species: "Wolf".to_string(),
            monthly_fee: Money::new(fee_minor),
            impact_metric: "habitat protected".to_string(),
            adoption_level: "guardian".to_string(),
        }
    }

    #[tokio::test]
    async fn sponsorship_ignores_wallet_share_override() {
        let engine = Engine::with_store(MemoryLedgerStore::new(), ImpactRates::default());
        let wallet = WalletState {
            balance: Money::new(100_00),
            sale_user_share: Some(0.0),
            ..WalletState::default()
        };
        engine.store().put_wallet("u1", &wallet).await.unwrap();

        let outcome = engine
            .create_sponsorship(SponsorCmd::new("u1", animal("a1", 15_00), Utc::now()))
            .await
            .unwrap();

        // Fixed 70/30 regardless of the wallet override: fund is 4.50.
        assert_eq!(
            outcome.impact,
            ImpactRates::default().convert(Money::new(4_50))
        );

        let wallet = engine.wallet("u1").await.unwrap();
        assert_eq!(wallet.balance, Money::new(85_00));
        assert_eq!(wallet.animals_saved, 1);
        assert_eq!(wallet.total_donated, Money::new(15_00));
    }

    #[tokio::test]
    async fn cancelling_unknown_sponsorship_is_key_not_found() {
        let engine = Engine::with_store(MemoryLedgerStore::new(), ImpactRates::default());

        let result = engine
            .cancel_sponsorship(uuid::Uuid::new_v4(), Utc::now())
            .await;

        assert!(matches!(result, Err(EngineError::KeyNotFound(_))));
    }
}
