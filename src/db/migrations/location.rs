use sea_orm_migration::prelude::*;

use super::dealer::Dealer;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Location::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Location::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Location::DealerId).integer().not_null())
                    .col(ColumnDef::new(Location::Address).string_len(128).null())
                    .col(ColumnDef::new(Location::Active).boolean().not_null().default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-location-dealer_id")
                            .from(Location::Table, Location::DealerId)
                            .to(Dealer::Table, Dealer::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Location::Table).to_owned()).await?;

        Ok(())
    }
}

#[derive(Iden)]
pub enum Location {
    Table,
    Id,
    DealerId,
    Address,
    Active,
}
