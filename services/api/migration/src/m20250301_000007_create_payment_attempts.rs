use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentAttempts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PaymentAttempts::BuyerId).uuid().not_null())
                    .col(
                        ColumnDef::new(PaymentAttempts::IdempotencyKey)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentAttempts::OrderId).uuid().null())
                    .col(
                        ColumnDef::new(PaymentAttempts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(PaymentAttempts::BuyerId)
                            .col(PaymentAttempts::IdempotencyKey),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PaymentAttempts::Table, PaymentAttempts::BuyerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentAttempts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PaymentAttempts {
    Table,
    BuyerId,
    IdempotencyKey,
    OrderId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
