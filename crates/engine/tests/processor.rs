use chrono::Utc;
use sea_orm::Database;

use engine::{
    AnimalProfile, DbLedgerStore, DonationCmd, Engine, ImpactRates, LedgerStore, Money, RewardCmd,
    SaleCmd, SponsorCmd, SponsorshipStatus, TransactionKind, WalletState,
};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

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
async fn item_sale_splits_credits_and_funds_impact() {
    let engine = engine_with_db().await;

    let outcome = engine
        .process_item_sale(
            SaleCmd::new("i1", "alice", Money::new(45_00), Utc::now()).description("Sold laptop"),
        )
        .await
        .unwrap();

    assert_eq!(outcome.total_amount, Money::new(45_00));
    assert_eq!(outcome.user_credited, Money::new(31_50));
    assert_eq!(outcome.nature_fund, Money::new(13_50));
    assert_eq!(outcome.impact, engine.rates().convert(Money::new(13_50)));

    let wallet = engine.wallet("alice").await.unwrap();
    assert_eq!(wallet.balance, Money::new(31_50));
    assert_eq!(wallet.items_recycled, 1);
    assert_eq!(wallet.trees_planted, outcome.impact.trees);
    assert_eq!(wallet.animals_fed, outcome.impact.animals_fed);
    assert_eq!(wallet.co2_offset_kg, outcome.impact.co2_offset_kg);

    let ledger = engine.user_transactions("alice").await.unwrap();
    assert_eq!(ledger.len(), 1);
    let tx = &ledger[0];
    assert_eq!(tx.id, outcome.transaction_id);
    assert_eq!(tx.kind, TransactionKind::Sale);
    assert_eq!(tx.amount, Money::new(45_00));
    assert_eq!(tx.user_credited, Money::new(31_50));
    assert_eq!(tx.nature_fund, Money::new(13_50));
    assert_eq!(tx.user_share, 0.70);
    assert_eq!(tx.nature_share, 0.30);
    assert_eq!(tx.reference_id, "i1");
    assert_eq!(tx.description, "Sold laptop");
}

#[tokio::test]
async fn sale_uses_persisted_share_override() {
    let engine = engine_with_db().await;
    let wallet = WalletState {
        sale_user_share: Some(0.5),
        ..WalletState::default()
    };
    engine.store().put_wallet("alice", &wallet).await.unwrap();

    let outcome = engine
        .process_item_sale(SaleCmd::new("i2", "alice", Money::new(10_00), Utc::now()))
        .await
        .unwrap();

    assert_eq!(outcome.user_credited, Money::new(5_00));
    assert_eq!(outcome.nature_fund, Money::new(5_00));
}

#[tokio::test]
async fn donation_overdraw_clamps_balance_and_keeps_ledger_nominal() {
    let engine = engine_with_db().await;
    let wallet = WalletState {
        balance: Money::new(50_00),
        ..WalletState::default()
    };
    engine.store().put_wallet("alice", &wallet).await.unwrap();

    let outcome = engine
        .process_campaign_donation(DonationCmd::new(
            "c1",
            "alice",
            Money::new(80_00),
            "Beach Cleanup",
            Utc::now(),
        ))
        .await
        .unwrap();

    let expected_impact = engine.rates().convert(Money::new(80_00));
    assert_eq!(outcome.impact, expected_impact);

    let wallet = engine.wallet("alice").await.unwrap();
    assert_eq!(wallet.balance, Money::ZERO);
    assert_eq!(wallet.total_donated, Money::new(80_00));
    assert_eq!(wallet.trees_planted, expected_impact.trees);
    assert_eq!(wallet.animals_fed, expected_impact.animals_fed);
    assert_eq!(wallet.co2_offset_kg, expected_impact.co2_offset_kg);

    let ledger = engine.user_transactions("alice").await.unwrap();
    assert_eq!(ledger.len(), 1);
    let tx = &ledger[0];
    assert_eq!(tx.kind, TransactionKind::Donation);
    assert_eq!(tx.amount, Money::new(80_00));
    assert_eq!(tx.user_credited, Money::new(-80_00));
    assert_eq!(tx.nature_fund, Money::new(80_00));
    assert_eq!(tx.description, "Donation to: Beach Cleanup");
    assert_eq!(tx.reference_id, "c1");
}

#[tokio::test]
async fn event_reward_credits_full_amount() {
    let engine = engine_with_db().await;

    let outcome = engine
        .process_event_reward(RewardCmd::new(
            "e1",
            "alice",
            Money::new(12_00),
            "River Cleanup Day",
            Utc::now(),
        ))
        .await
        .unwrap();

    assert_eq!(outcome.amount, Money::new(12_00));

    let wallet = engine.wallet("alice").await.unwrap();
    assert_eq!(wallet.balance, Money::new(12_00));
    assert_eq!(wallet.trees_planted, 0);
    assert_eq!(wallet.items_recycled, 0);

    let ledger = engine.user_transactions("alice").await.unwrap();
    assert_eq!(ledger[0].kind, TransactionKind::EventReward);
    assert_eq!(ledger[0].nature_fund, Money::ZERO);
    assert_eq!(ledger[0].user_share, 1.0);
    assert_eq!(ledger[0].description, "Reward for attending: River Cleanup Day");
}

#[tokio::test]
async fn ledger_lists_most_recent_first() {
    let engine = engine_with_db().await;
    let start = Utc::now();

    for (i, minor) in [10_00, 20_00, 30_00].into_iter().enumerate() {
        engine
            .process_item_sale(SaleCmd::new(
                format!("i{i}"),
                "alice",
                Money::new(minor),
                start + chrono::Duration::seconds(i as i64 + 1),
            ))
            .await
            .unwrap();
    }

    let ledger = engine.user_transactions("alice").await.unwrap();
    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger[0].amount, Money::new(30_00));
    assert_eq!(ledger[2].amount, Money::new(10_00));

    // Other users see nothing.
    assert!(engine.user_transactions("bob").await.unwrap().is_empty());
}

#[tokio::test]
async fn sponsorship_debits_wallet_and_counts_adoption() {
    let engine = engine_with_db().await;
    let wallet = WalletState {
        balance: Money::new(100_00),
        ..WalletState::default()
    };
    engine.store().put_wallet("alice", &wallet).await.unwrap();

    let outcome = engine
        .create_sponsorship(SponsorCmd::new("alice", animal("a1", 15_00), Utc::now()))
        .await
        .unwrap();

    assert_eq!(outcome.sponsorship.status, SponsorshipStatus::Active);
    assert_eq!(outcome.sponsorship.monthly_fee, Money::new(15_00));
    // Fixed 70/30 split of the fee: the fund is 4.50.
    assert_eq!(outcome.impact, engine.rates().convert(Money::new(4_50)));

    let wallet = engine.wallet("alice").await.unwrap();
    assert_eq!(wallet.balance, Money::new(85_00));
    assert_eq!(wallet.animals_saved, 1);
    assert_eq!(wallet.total_donated, Money::new(15_00));
}

#[tokio::test]
async fn adoption_stats_recompute_each_sponsorship_independently() {
    let engine = engine_with_db().await;

    engine
        .create_sponsorship(SponsorCmd::new("alice", animal("a1", 15_00), Utc::now()))
        .await
        .unwrap();
    engine
        .create_sponsorship(SponsorCmd::new("alice", animal("a2", 25_00), Utc::now()))
        .await
        .unwrap();
    // Another user's pledge must not leak into alice's stats.
    engine
        .create_sponsorship(SponsorCmd::new("bob", animal("a3", 40_00), Utc::now()))
        .await
        .unwrap();

    let stats = engine.adoption_stats("alice").await.unwrap();
    assert_eq!(stats.active_count, 2);
    assert_eq!(stats.monthly_commitment, Money::new(40_00));

    // Sum of per-fee conversions, not one conversion of the pooled fund.
    let expected = engine.rates().convert(Money::new(4_50))
        + engine.rates().convert(Money::new(7_50));
    assert_eq!(stats.impact, expected);
    let pooled = engine.rates().convert(Money::new(12_00));
    assert_ne!(stats.impact.animals_fed, pooled.animals_fed);
}

#[tokio::test]
async fn cancelled_sponsorship_is_retained_but_excluded() {
    let engine = engine_with_db().await;

    let outcome = engine
        .create_sponsorship(SponsorCmd::new("alice", animal("a1", 15_00), Utc::now()))
        .await
        .unwrap();
    let balance_after_create = engine.wallet("alice").await.unwrap().balance;

    engine
        .cancel_sponsorship(outcome.sponsorship_id, Utc::now())
        .await
        .unwrap();

    assert!(engine.user_sponsorships("alice").await.unwrap().is_empty());
    assert_eq!(engine.adoption_stats("alice").await.unwrap().active_count, 0);

    // Soft delete: the record survives with its cancellation stamp, and the
    // wallet sees no refund.
    let all = engine.store().sponsorships().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, SponsorshipStatus::Cancelled);
    assert!(all[0].cancelled_at.is_some());
    assert_eq!(engine.wallet("alice").await.unwrap().balance, balance_after_create);
}

#[tokio::test]
async fn rate_changes_reprice_adoption_stats_on_read() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let engine = Engine::builder().database(db.clone()).build();
    engine
        .create_sponsorship(SponsorCmd::new("alice", animal("a1", 25_00), Utc::now()))
        .await
        .unwrap();
    let before = engine.adoption_stats("alice").await.unwrap();
    assert_eq!(before.impact.animals_fed, 1);

    // Same records read through cheaper rates: history is repriced.
    let repriced = Engine::builder()
        .database(db)
        .rates(ImpactRates {
            meal_cost: Money::new(1_00),
            ..ImpactRates::default()
        })
        .build();
    let after = repriced.adoption_stats("alice").await.unwrap();
    assert_eq!(after.impact.animals_fed, 7);
    assert_eq!(after.monthly_commitment, before.monthly_commitment);
}

#[tokio::test]
async fn mixed_operations_accumulate_wallet_counters() {
    let engine = engine_with_db().await;
    let now = Utc::now();

    engine
        .process_item_sale(SaleCmd::new("i1", "alice", Money::new(45_00), now))
        .await
        .unwrap();
    engine
        .process_event_reward(RewardCmd::new("e1", "alice", Money::new(5_00), "Cleanup", now))
        .await
        .unwrap();
    engine
        .process_campaign_donation(DonationCmd::new(
            "c1",
            "alice",
            Money::new(20_00),
            "Reforestation",
            now,
        ))
        .await
        .unwrap();

    let wallet = engine.wallet("alice").await.unwrap();
    // 31.50 + 5.00 - 20.00
    assert_eq!(wallet.balance, Money::new(16_50));
    assert_eq!(wallet.total_donated, Money::new(20_00));
    assert_eq!(wallet.items_recycled, 1);

    let sale_impact = engine.rates().convert(Money::new(13_50));
    let donation_impact = engine.rates().convert(Money::new(20_00));
    assert_eq!(wallet.trees_planted, sale_impact.trees + donation_impact.trees);
    assert_eq!(
        wallet.animals_fed,
        sale_impact.animals_fed + donation_impact.animals_fed
    );

    assert_eq!(engine.user_transactions("alice").await.unwrap().len(), 3);
}

#[tokio::test]
async fn outcome_payloads_serialize_for_the_notifier() {
    let engine = engine_with_db().await;

    let outcome = engine
        .process_item_sale(
            SaleCmd::new("i1", "alice", Money::new(45_00), Utc::now()).description("Sold laptop"),
        )
        .await
        .unwrap();

    let payload = serde_json::to_value(&outcome).unwrap();
    assert_eq!(payload["total_amount"], 4500);
    assert_eq!(payload["user_credited"], 3150);
    assert_eq!(payload["nature_fund"], 1350);
    assert_eq!(payload["impact"]["trees"], 1);
    assert_eq!(payload["impact"]["co2_offset_kg"], 27.0);
}

#[tokio::test]
async fn store_reports_wallet_absence_until_first_write() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let store = DbLedgerStore::new(db);

    assert!(store.wallet("alice").await.unwrap().is_none());

    let wallet = WalletState {
        balance: Money::new(1_00),
        ..WalletState::default()
    };
    store.put_wallet("alice", &wallet).await.unwrap();
    assert_eq!(store.wallet("alice").await.unwrap(), Some(wallet.clone()));

    // Overwrite semantics: a second put replaces the row in place.
    let richer = WalletState {
        balance: Money::new(9_99),
        ..wallet
    };
    store.put_wallet("alice", &richer).await.unwrap();
    assert_eq!(store.wallet("alice").await.unwrap(), Some(richer));
}
