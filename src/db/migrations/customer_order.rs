use sea_orm_migration::prelude::*;

use super::customer::Customer;
use super::dealer::Dealer;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "customer_order_migration"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerOrder::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerOrder::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CustomerOrder::DealerId).integer().not_null())
                    .col(ColumnDef::new(CustomerOrder::CustomerId).integer().not_null())
                    .col(ColumnDef::new(CustomerOrder::OrderNumber).big_integer().not_null())
                    .col(
                        ColumnDef::new(CustomerOrder::OrderDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CustomerOrder::OrderStatus).boolean().not_null().default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-customer_order-dealer_id")
                            .from(CustomerOrder::Table, CustomerOrder::DealerId)
                            .to(Dealer::Table, Dealer::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-customer_order-customer_id")
                            .from(CustomerOrder::Table, CustomerOrder::CustomerId)
                            .to(Customer::Table, Customer::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-customer_order-order_date")
                    .table(CustomerOrder::Table)
                    .col(CustomerOrder::OrderDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerOrder::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CustomerOrder {
    Table,
    Id,
    DealerId,
    CustomerId,
    OrderNumber,
    OrderDate,
    OrderStatus,
}
