use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:         i32,
    pub dealer_id:  i32,
    pub first_name: String,
    pub last_name:  String,
    pub email:      String,
    pub phone:      Option<String>,
    pub status:     bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dealer::Entity",
        from = "Column::DealerId",
        to = "super::dealer::Column::Id"
    )]
    Dealer,
}

impl ActiveModelBehavior for ActiveModel {}
