//! Campaign-donation processing: debit the balance, convert the full amount
//! to impact.

use uuid::Uuid;

use crate::{
    DonationCmd, DonationOutcome, Engine, LedgerStore, ReferenceKind, ResultEngine, Transaction,
    TransactionKind,
};

use super::ensure_not_negative;

impl<S: LedgerStore> Engine<S> {
    /// Processes a donation to a campaign.
    ///
    /// Unlike a sale there is no user share: the full amount is the nature
    /// fund. The balance debit floors at zero even when the donation exceeds
    /// it; the ledger still records the full nominal amount.
    pub async fn process_campaign_donation(
        &self,
        cmd: DonationCmd,
    ) -> ResultEngine<DonationOutcome> {
        ensure_not_negative(cmd.amount, "donation amount")?;

        let mut wallet = self.store().wallet(&cmd.user_id).await?.unwrap_or_default();
        let impact = self.rates().convert(cmd.amount);

        wallet.debit_clamped(cmd.amount);
        wallet.add_impact(&impact);
        wallet.total_donated += cmd.amount;
        self.store().put_wallet(&cmd.user_id, &wallet).await?;

        let tx = Transaction {
            id: Uuid::new_v4(),
            user_id: cmd.user_id.clone(),
            kind: TransactionKind::Donation,
            amount: cmd.amount,
            user_credited: -cmd.amount,
            nature_fund: cmd.amount,
            user_share: 0.0,
            nature_share: 1.0,
            trees_planted: impact.trees,
            animals_fed: impact.animals_fed,
            co2_offset_kg: impact.co2_offset_kg,
            description: format!("Donation to: {}", cmd.campaign_title),
            reference_kind: ReferenceKind::Campaign,
            reference_id: cmd.campaign_id,
            created_at: cmd.occurred_at,
        };
        let transaction_id = self.store().append_transaction(&tx).await?;

        tracing::debug!(
            user_id = %cmd.user_id,
            %transaction_id,
            amount = cmd.amount.minor(),
            balance = wallet.balance.minor(),
            "campaign donation processed"
        );

        Ok(DonationOutcome {
            transaction_id,
            amount: cmd.amount,
            impact,
        })
    }
}
