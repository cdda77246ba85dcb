use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "dealer_migration"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dealer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Dealer::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Dealer::Name).string_len(64).null())
                    .col(ColumnDef::new(Dealer::DealerCode).string_len(64).null())
                    .index(
                        Index::create()
                            .name("idx-unique-dealer_code")
                            .col(Dealer::DealerCode)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Dealer::Table).to_owned()).await
    }
}

#[derive(Iden)]
pub enum Dealer {
    Table,
    Id,
    Name,
    DealerCode,
}
