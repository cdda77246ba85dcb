use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order_detail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:                       i32,
    pub order_id:                 i32,
    pub order_product_id:         i32,
    pub order_product_quantity:   i32,
    pub order_product_item_price: f64,
    // Always order_product_quantity * order_product_item_price.
    pub order_line_item_total:    f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer_order::Entity",
        from = "Column::OrderId",
        to = "super::customer_order::Column::Id"
    )]
    CustomerOrder,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::OrderProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl ActiveModelBehavior for ActiveModel {}
