use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // product_id carries no foreign key: orders outlive deleted products.
        manager
            .create_table(
                Table::create()
                    .table(OrderProducts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrderProducts::OrderId).uuid().not_null())
                    .col(ColumnDef::new(OrderProducts::Position).integer().not_null())
                    .col(ColumnDef::new(OrderProducts::ProductId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(OrderProducts::OrderId)
                            .col(OrderProducts::Position),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OrderProducts::Table, OrderProducts::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderProducts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OrderProducts {
    Table,
    OrderId,
    Position,
    ProductId,
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
}
