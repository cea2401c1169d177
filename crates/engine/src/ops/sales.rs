//! Item-sale processing: split the proceeds, credit the user, fund impact.

use uuid::Uuid;

use crate::{
    Engine, LedgerStore, ReferenceKind, ResultEngine, SaleCmd, SaleOutcome, Transaction,
    TransactionKind, split,
};

use super::ensure_not_negative;

impl<S: LedgerStore> Engine<S> {
    /// Processes the sale of a recycled item.
    ///
    /// The gross amount is split by the wallet's own share ratio (default
    /// 0.70), the user share is credited to the balance and the nature fund
    /// is converted into impact counters. The wallet's ratio is read once,
    /// before any write.
    pub async fn process_item_sale(&self, cmd: SaleCmd) -> ResultEngine<SaleOutcome> {
        ensure_not_negative(cmd.gross_amount, "gross amount")?;

        let mut wallet = self.store().wallet(&cmd.user_id).await?.unwrap_or_default();
        let split = split::split(cmd.gross_amount, wallet.sale_user_share);
        let impact = self.rates().convert(split.nature_fund);

        wallet.credit(split.user_credited);
        wallet.add_impact(&impact);
        wallet.items_recycled += 1;
        self.store().put_wallet(&cmd.user_id, &wallet).await?;

        let tx = Transaction {
            id: Uuid::new_v4(),
            user_id: cmd.user_id.clone(),
            kind: TransactionKind::Sale,
            amount: cmd.gross_amount,
            user_credited: split.user_credited,
            nature_fund: split.nature_fund,
            user_share: split.user_share,
            nature_share: split.nature_share,
            trees_planted: impact.trees,
            animals_fed: impact.animals_fed,
            co2_offset_kg: impact.co2_offset_kg,
            description: cmd.description,
            reference_kind: ReferenceKind::Item,
            reference_id: cmd.item_id,
            created_at: cmd.occurred_at,
        };
        let transaction_id = self.store().append_transaction(&tx).await?;

        tracing::debug!(
            user_id = %cmd.user_id,
            %transaction_id,
            gross = cmd.gross_amount.minor(),
            credited = split.user_credited.minor(),
            nature_fund = split.nature_fund.minor(),
            "item sale processed"
        );

        Ok(SaleOutcome {
            transaction_id,
            total_amount: cmd.gross_amount,
            user_credited: split.user_credited,
            nature_fund: split.nature_fund,
            impact,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::{Engine, ImpactRates, LedgerStore, MemoryLedgerStore, Money, SaleCmd, WalletState};

    fn engine() -> Engine<MemoryLedgerStore> {
        Engine::with_store(MemoryLedgerStore::new(), ImpactRates::default())
    }

    #[tokio::test]
    async fn sale_honors_wallet_share_override() {
        let engine = engine();
        let wallet = WalletState {
            sale_user_share: Some(0.5),
            ..WalletState::default()
        };
        engine.store().put_wallet("u1", &wallet).await.unwrap();

        let outcome = engine
            .process_item_sale(SaleCmd::new("i1", "u1", Money::new(40_00), Utc::now()))
            .await
            .unwrap();

        assert_eq!(outcome.user_credited, Money::new(20_00));
        assert_eq!(outcome.nature_fund, Money::new(20_00));

        let wallet = engine.wallet("u1").await.unwrap();
        assert_eq!(wallet.balance, Money::new(20_00));
        assert_eq!(wallet.items_recycled, 1);
    }

    #[tokio::test]
    async fn sale_creates_missing_wallet_with_defaults() {
        let engine = engine();

        let outcome = engine
            .process_item_sale(
                SaleCmd::new("i1", "u1", Money::new(45_00), Utc::now()).description("Sold laptop"),
            )
            .await
            .unwrap();

        assert_eq!(outcome.user_credited, Money::new(31_50));
        assert_eq!(outcome.nature_fund, Money::new(13_50));

        let ledger = engine.store().ledger();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].description, "Sold laptop");
        assert_eq!(ledger[0].user_share, 0.70);
        assert_eq!(ledger[0].nature_share, 0.30);
    }

    #[tokio::test]
    async fn negative_gross_is_rejected_without_writes() {
        let engine = engine();

        let result = engine
            .process_item_sale(SaleCmd::new("i1", "u1", Money::new(-1), Utc::now()))
            .await;

        assert!(result.is_err());
        assert!(engine.store().ledger().is_empty());
        assert_eq!(engine.wallet("u1").await.unwrap(), WalletState::default());
    }
}
