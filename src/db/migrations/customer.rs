use sea_orm_migration::prelude::*;

use super::dealer::Dealer;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "customer_migration"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customer::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customer::DealerId).integer().not_null())
                    .col(ColumnDef::new(Customer::FirstName).string_len(64).not_null())
                    .col(ColumnDef::new(Customer::LastName).string_len(64).not_null())
                    .col(ColumnDef::new(Customer::Email).string_len(128).not_null())
                    .col(ColumnDef::new(Customer::Phone).string_len(20).null())
                    .col(ColumnDef::new(Customer::Status).boolean().not_null().default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-customer-dealer_id")
                            .from(Customer::Table, Customer::DealerId)
                            .to(Dealer::Table, Dealer::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Customer::Table).to_owned()).await
    }
}

#[derive(Iden)]
pub enum Customer {
    Table,
    Id,
    DealerId,
    FirstName,
    LastName,
    Email,
    Phone,
    Status,
}
