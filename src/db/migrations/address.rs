use sea_orm_migration::prelude::*;

use super::customer::Customer;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Address::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Address::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Address::CustomerId).integer().not_null())
                    .col(ColumnDef::new(Address::Street).string_len(64).not_null())
                    .col(ColumnDef::new(Address::City).string_len(64).not_null())
                    .col(ColumnDef::new(Address::State).string_len(64).not_null())
                    .col(ColumnDef::new(Address::ZipCode).string_len(10).not_null())
                    .col(ColumnDef::new(Address::Latitude).double().null())
                    .col(ColumnDef::new(Address::Longitude).double().null())
                    .col(ColumnDef::new(Address::Status).boolean().not_null().default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-address-customer_id")
                            .from(Address::Table, Address::CustomerId)
                            .to(Customer::Table, Customer::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Address::Table).to_owned()).await?;

        Ok(())
    }
}

#[derive(Iden)]
pub enum Address {
    Table,
    Id,
    CustomerId,
    Street,
    City,
    State,
    ZipCode,
    Latitude,
    Longitude,
    Status,
}
