use sea_orm_migration::prelude::*;

use super::customer_order::CustomerOrder;
use super::product::Product;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderDetail::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderDetail::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderDetail::OrderId).integer().not_null())
                    .col(ColumnDef::new(OrderDetail::OrderProductId).integer().not_null())
                    .col(ColumnDef::new(OrderDetail::OrderProductQuantity).integer().not_null())
                    .col(ColumnDef::new(OrderDetail::OrderProductItemPrice).double().not_null())
                    .col(ColumnDef::new(OrderDetail::OrderLineItemTotal).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-order_detail-order_id")
                            .from(OrderDetail::Table, OrderDetail::OrderId)
                            .to(CustomerOrder::Table, CustomerOrder::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-order_detail-order_product_id")
                            .from(OrderDetail::Table, OrderDetail::OrderProductId)
                            .to(Product::Table, Product::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderDetail::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub enum OrderDetail {
    Table,
    Id,
    OrderId,
    OrderProductId,
    OrderProductQuantity,
    OrderProductItemPrice,
    OrderLineItemTotal,
}
