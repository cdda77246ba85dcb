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
                    .table(ProductType::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductType::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductType::DealerId).integer().not_null())
                    .col(ColumnDef::new(ProductType::Name).string_len(64).null())
                    .col(ColumnDef::new(ProductType::Active).boolean().not_null().default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-product_type-dealer_id")
                            .from(ProductType::Table, ProductType::DealerId)
                            .to(Dealer::Table, Dealer::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductType::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub enum ProductType {
    Table,
    Id,
    DealerId,
    Name,
    Active,
}
