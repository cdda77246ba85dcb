use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dealer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:          i32,
    pub name:        Option<String>,
    #[sea_orm(unique)]
    pub dealer_code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
