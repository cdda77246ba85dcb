#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm::EntityTrait;
use sea_orm::PaginatorTrait;
use sea_orm::QuerySelect;
use serde_json::json;
use serde_json::Value;
use sequel::db;
use sequel::db::driver::sqlite::Sqlite;
use sequel::fetcher::FixtureSource;
use sequel::fetcher::MockDataSource;
use sequel::kind::EntityKind;
use sequel::population::PopulationContext;
use tempfile::TempDir;

/// A fresh, migrated SQLite database inside `dir`.
pub async fn storage(dir: &TempDir) -> DatabaseConnection {
    let driver = Sqlite::connect(&dir.path().join("sequel_test.sqlite3"))
        .await
        .expect("SQLite connection");
    db::initialize(&driver).await.expect("schema")
}

pub fn tempdir() -> TempDir {
    tempfile::Builder::new()
        .prefix("sequel-test")
        .tempdir()
        .expect("temporary directory")
}

pub fn context(source: impl MockDataSource + 'static, db: &DatabaseConnection, limit: u64) -> PopulationContext {
    PopulationContext::new(Arc::new(source), db.clone(), limit, 4)
}

pub async fn count<E>(db: &DatabaseConnection) -> u64
where
    E: EntityTrait,
    E::Model: Sync,
{
    E::find().count(db).await.expect("row count")
}

/// All primary keys of `E`, assuming an `i32` key in the first column.
pub async fn ids<E: EntityTrait>(db: &DatabaseConnection, id: E::Column) -> HashSet<i32> {
    E::find()
        .select_only()
        .column(id)
        .into_tuple::<i32>()
        .all(db)
        .await
        .expect("ids")
        .into_iter()
        .collect()
}

pub fn dealers(tag: &str, n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| json!({"id": i, "name": format!("Dealer {tag}{i}"), "dealer_code": format!("DLR-{tag}-{i}")}))
        .collect()
}

pub fn customers(tag: &str, n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| {
            json!({
                "id": i,
                "first_name": format!("First{tag}{i}"),
                "last_name": format!("Last{tag}{i}"),
                "email": format!("c{tag}{i}@example.com"),
                "phone": format!("555-01{i:02}"),
            })
        })
        .collect()
}

pub fn addresses(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| {
            json!({
                "street": format!("{i} Main St"),
                "city": "Springfield",
                "state": "IL",
                "zip_code": 62700 + i,
                "latitude": 39.78,
                "longitude": -89.65,
            })
        })
        .collect()
}

pub fn locations(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| json!({"address": format!("{i} Depot Rd"), "active": true}))
        .collect()
}

pub fn product_types(n: usize) -> Vec<Value> {
    (1..=n).map(|i| json!({"name": format!("Type {i}")})).collect()
}

pub fn products(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| {
            json!({
                "name": format!("Product {i}"),
                "description": "Something useful",
                "item_price": 10.0 + i as f64 * 0.25,
                "active": true,
            })
        })
        .collect()
}

pub fn orders(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| json!({"order_number": 1000 + i, "order_status": true}))
        .collect()
}

pub fn order_details(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| json!({"order_product_quantity": i, "order_product_item_price": 19.95 + i as f64 * 0.1}))
        .collect()
}

pub fn shipments(tag: &str, n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| {
            json!({
                "shipping_date": format!("2024-05-{:02}T10:00:00Z", i % 28 + 1),
                "shipping_tracking_number": format!("1Z{tag}{i:04}"),
                "shipping_carrier": "UPS",
                "shipping_delivered": i % 2 == 0,
            })
        })
        .collect()
}

/// Records for all nine resources. `tag` keeps unique columns distinct between sources.
pub fn full_source(tag: &str, n: usize) -> FixtureSource {
    FixtureSource::new()
        .with_records(EntityKind::Dealer, dealers(tag, n))
        .with_records(EntityKind::Customer, customers(tag, n))
        .with_records(EntityKind::Address, addresses(n))
        .with_records(EntityKind::Location, locations(n))
        .with_records(EntityKind::ProductType, product_types(n))
        .with_records(EntityKind::Product, products(n))
        .with_records(EntityKind::CustomerOrder, orders(n))
        .with_records(EntityKind::OrderDetail, order_details(n))
        .with_records(EntityKind::OrderShipping, shipments(tag, n))
}
