//! Initial schema migration - creates all tables from scratch.
//!
//! - `wallets`: per-user balance and cumulative impact counters
//! - `transactions`: the append-only ledger of processed operations
//! - `sponsorships`: recurring animal pledges (soft-deleted via status)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Wallets {
    Table,
    UserId,
    BalanceMinor,
    TotalDonatedMinor,
    AnimalsSaved,
    TreesPlanted,
    AnimalsFed,
    Co2OffsetKg,
    ItemsRecycled,
    SaleUserShare,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    UserId,
    Kind,
    AmountMinor,
    UserCreditedMinor,
    NatureFundMinor,
    UserShare,
    NatureShare,
    TreesPlanted,
    AnimalsFed,
    Co2OffsetKg,
    Description,
    ReferenceKind,
    ReferenceId,
    CreatedAt,
}

#[derive(Iden)]
enum Sponsorships {
    Table,
    Id,
    UserId,
    AnimalId,
    AnimalName,
    Species,
    MonthlyFeeMinor,
    Status,
    CreatedAt,
    NextChargeDate,
    CancelledAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Wallets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wallets::UserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Wallets::BalanceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Wallets::TotalDonatedMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Wallets::AnimalsSaved)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Wallets::TreesPlanted)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Wallets::AnimalsFed).big_integer().not_null())
                    .col(ColumnDef::new(Wallets::Co2OffsetKg).double().not_null())
                    .col(
                        ColumnDef::new(Wallets::ItemsRecycled)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Wallets::SaleUserShare).double())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::UserId).string().not_null())
                    .col(ColumnDef::new(Transactions::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::UserCreditedMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::NatureFundMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::UserShare).double().not_null())
                    .col(
                        ColumnDef::new(Transactions::NatureShare)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::TreesPlanted)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::AnimalsFed)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Co2OffsetKg)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::ReferenceKind)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::ReferenceId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-user_id")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sponsorships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sponsorships::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sponsorships::UserId).string().not_null())
                    .col(ColumnDef::new(Sponsorships::AnimalId).string().not_null())
                    .col(
                        ColumnDef::new(Sponsorships::AnimalName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sponsorships::Species).string().not_null())
                    .col(
                        ColumnDef::new(Sponsorships::MonthlyFeeMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sponsorships::Status).string().not_null())
                    .col(
                        ColumnDef::new(Sponsorships::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Sponsorships::NextChargeDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sponsorships::CancelledAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sponsorships-user_id")
                    .table(Sponsorships::Table)
                    .col(Sponsorships::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sponsorships::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wallets::Table).to_owned())
            .await?;
        Ok(())
    }
}
