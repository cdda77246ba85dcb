use sea_orm_migration::prelude::*;

use super::dealer::Dealer;
use super::location::Location;
use super::product_type::ProductType;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "product_migration"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Product::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Product::DealerId).integer().not_null())
                    .col(ColumnDef::new(Product::ProductTypeId).integer().not_null())
                    .col(ColumnDef::new(Product::Name).string_len(64).not_null())
                    .col(ColumnDef::new(Product::Description).string_len(1024).null())
                    .col(ColumnDef::new(Product::ItemPrice).double().null())
                    .col(ColumnDef::new(Product::Active).boolean().not_null().default(true))
                    .col(ColumnDef::new(Product::LocationId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-product-dealer_id")
                            .from(Product::Table, Product::DealerId)
                            .to(Dealer::Table, Dealer::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-product-product_type_id")
                            .from(Product::Table, Product::ProductTypeId)
                            .to(ProductType::Table, ProductType::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-product-location_id")
                            .from(Product::Table, Product::LocationId)
                            .to(Location::Table, Location::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(Iden)]
pub enum Product {
    Table,
    Id,
    DealerId,
    ProductTypeId,
    Name,
    Description,
    ItemPrice,
    Active,
    LocationId,
}
