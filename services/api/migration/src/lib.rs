use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_categories;
mod m20250301_000003_create_products;
mod m20250301_000004_create_product_photos;
mod m20250301_000005_create_orders;
mod m20250301_000006_create_order_products;
mod m20250301_000007_create_payment_attempts;
mod m20250301_000008_create_carts;
mod m20250301_000009_add_catalog_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_categories::Migration),
            Box::new(m20250301_000003_create_products::Migration),
            Box::new(m20250301_000004_create_product_photos::Migration),
            Box::new(m20250301_000005_create_orders::Migration),
            Box::new(m20250301_000006_create_order_products::Migration),
            Box::new(m20250301_000007_create_payment_attempts::Migration),
            Box::new(m20250301_000008_create_carts::Migration),
            Box::new(m20250301_000009_add_catalog_indexes::Migration),
        ]
    }
}
