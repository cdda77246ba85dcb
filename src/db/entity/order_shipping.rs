use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order_shipping")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:                         i32,
    pub address_id:                 i32,
    pub order_id:                   i32,
    pub order_detail_id:            i32,
    pub shipping_date:              DateTimeUtc,
    pub shipping_status:            bool,
    #[sea_orm(unique)]
    pub shipping_tracking_number:   String,
    pub shipping_carrier:           String,
    pub shipping_delivered:         bool,
    pub shipping_final_disposition: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::address::Entity",
        from = "Column::AddressId",
        to = "super::address::Column::Id"
    )]
    Address,
    #[sea_orm(
        belongs_to = "super::customer_order::Entity",
        from = "Column::OrderId",
        to = "super::customer_order::Column::Id"
    )]
    CustomerOrder,
    #[sea_orm(
        belongs_to = "super::order_detail::Entity",
        from = "Column::OrderDetailId",
        to = "super::order_detail::Column::Id"
    )]
    OrderDetail,
}

impl ActiveModelBehavior for ActiveModel {}
