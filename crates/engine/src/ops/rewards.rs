//! Event-reward processing: full credit, no nature-fund split.

use uuid::Uuid;

use crate::{
    Engine, LedgerStore, Money, ReferenceKind, ResultEngine, RewardCmd, RewardOutcome,
    Transaction, TransactionKind,
};

use super::ensure_not_negative;

impl<S: LedgerStore> Engine<S> {
    /// Credits an event attendance reward.
    ///
    /// Rewards are not donations: 100% goes to the user's balance and no
    /// impact is computed for this path.
    pub async fn process_event_reward(&self, cmd: RewardCmd) -> ResultEngine<RewardOutcome> {
        ensure_not_negative(cmd.amount, "reward amount")?;

        let mut wallet = self.store().wallet(&cmd.user_id).await?.unwrap_or_default();
        wallet.credit(cmd.amount);
        self.store().put_wallet(&cmd.user_id, &wallet).await?;

        let tx = Transaction {
            id: Uuid::new_v4(),
            user_id: cmd.user_id.clone(),
            kind: TransactionKind::EventReward,
            amount: cmd.amount,
            user_credited: cmd.amount,
            nature_fund: Money::ZERO,
            user_share: 1.0,
            nature_share: 0.0,
            trees_planted: 0,
            animals_fed: 0,
            co2_offset_kg: 0.0,
            description: format!("Reward for attending: {}", cmd.event_title),
            reference_kind: ReferenceKind::Event,
            reference_id: cmd.event_id,
            created_at: cmd.occurred_at,
        };
        let transaction_id = self.store().append_transaction(&tx).await?;

        tracing::debug!(
            user_id = %cmd.user_id,
            %transaction_id,
            amount = cmd.amount.minor(),
            "event reward credited"
        );

        Ok(RewardOutcome {
            transaction_id,
            amount: cmd.amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::{
        Engine, ImpactRates, LedgerStore, MemoryLedgerStore, Money, RewardCmd, TransactionKind,
    };

    #[tokio::test]
    async fn reward_credits_in_full_without_impact() {
        let engine = Engine::with_store(MemoryLedgerStore::new(), ImpactRates::default());

        engine
            .process_event_reward(RewardCmd::new(
                "e1",
                "u1",
                Money::new(12_00),
                "Beach Day",
                Utc::now(),
            ))
            .await
            .unwrap();

        let wallet = engine.wallet("u1").await.unwrap();
        assert_eq!(wallet.balance, Money::new(12_00));
        assert_eq!(wallet.trees_planted, 0);
        assert_eq!(wallet.total_donated, Money::ZERO);

        let ledger = engine.store().ledger();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].kind, TransactionKind::EventReward);
        assert_eq!(ledger[0].nature_fund, Money::ZERO);
        assert_eq!(ledger[0].description, "Reward for attending: Beach Day");
    }
}
