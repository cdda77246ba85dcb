use sea_orm_migration::prelude::*;

use super::address::Address;
use super::customer_order::CustomerOrder;
use super::order_detail::OrderDetail;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "order_shipping_migration"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderShipping::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderShipping::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderShipping::AddressId).integer().not_null())
                    .col(ColumnDef::new(OrderShipping::OrderId).integer().not_null())
                    .col(ColumnDef::new(OrderShipping::OrderDetailId).integer().not_null())
                    .col(
                        ColumnDef::new(OrderShipping::ShippingDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrderShipping::ShippingStatus)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(OrderShipping::ShippingTrackingNumber)
                            .string_len(64)
                            .not_null(),
                    )
                    // Carriers serve many shipments, so no uniqueness here.
                    .col(ColumnDef::new(OrderShipping::ShippingCarrier).string_len(64).not_null())
                    .col(
                        ColumnDef::new(OrderShipping::ShippingDelivered)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(OrderShipping::ShippingFinalDisposition)
                            .string_len(64)
                            .null(),
                    )
                    .index(
                        Index::create()
                            .name("idx-unique-shipping_tracking_number")
                            .col(OrderShipping::ShippingTrackingNumber)
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-order_shipping-address_id")
                            .from(OrderShipping::Table, OrderShipping::AddressId)
                            .to(Address::Table, Address::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-order_shipping-order_id")
                            .from(OrderShipping::Table, OrderShipping::OrderId)
                            .to(CustomerOrder::Table, CustomerOrder::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-order_shipping-order_detail_id")
                            .from(OrderShipping::Table, OrderShipping::OrderDetailId)
                            .to(OrderDetail::Table, OrderDetail::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderShipping::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum OrderShipping {
    Table,
    Id,
    AddressId,
    OrderId,
    OrderDetailId,
    ShippingDate,
    ShippingStatus,
    ShippingTrackingNumber,
    ShippingCarrier,
    ShippingDelivered,
    ShippingFinalDisposition,
}
