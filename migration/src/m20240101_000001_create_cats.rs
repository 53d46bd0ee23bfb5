// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create cats table
        manager
            .create_table(
                Table::create()
                    .table(Cats::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cats::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cats::Name).string().not_null())
                    .col(ColumnDef::new(Cats::Breed).string().not_null())
                    .col(ColumnDef::new(Cats::Age).integer().not_null())
                    .col(
                        ColumnDef::new(Cats::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Cats::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Cats::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Every read filters on the soft-delete marker
        manager
            .create_index(
                Index::create()
                    .name("idx_cats_deleted_at")
                    .table(Cats::Table)
                    .col(Cats::DeletedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cats::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Cats {
    Table,
    Id,
    Name,
    Breed,
    Age,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
