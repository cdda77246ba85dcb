pub mod address;
pub mod customer;
pub mod customer_order;
pub mod dealer;
pub mod location;
pub mod order_detail;
pub mod order_shipping;
pub mod product;
pub mod product_type;

use sea_orm_migration::prelude::*;

pub struct Migrator;

impl MigratorTrait for Migrator {
    // Parents first: every table is created after the tables its foreign keys point to.
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(dealer::Migration),
            Box::new(customer::Migration),
            Box::new(address::Migration),
            Box::new(location::Migration),
            Box::new(product_type::Migration),
            Box::new(product::Migration),
            Box::new(customer_order::Migration),
            Box::new(order_detail::Migration),
            Box::new(order_shipping::Migration),
        ]
    }
}
