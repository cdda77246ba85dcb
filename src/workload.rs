//! Read-only workload: one bounded read per entity type.
use std::collections::BTreeMap;

use sea_orm::DatabaseConnection;
use sea_orm::DbErr;
use sea_orm::EntityTrait;
use sea_orm::QuerySelect;
use tracing::error;
use tracing::info;
use tracing::instrument;

use crate::db::entity::address;
use crate::db::entity::customer;
use crate::db::entity::customer_order;
use crate::db::entity::dealer;
use crate::db::entity::location;
use crate::db::entity::order_detail;
use crate::db::entity::order_shipping;
use crate::db::entity::product;
use crate::db::entity::product_type;
use crate::db::prelude::*;
use crate::kind::EntityKind;

/// Rows returned per entity type, or the reason the read failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkloadReport {
    reads: BTreeMap<EntityKind, Result<usize, String>>,
}

impl WorkloadReport {
    pub fn rows(&self, kind: EntityKind) -> Option<usize> {
        self.reads.get(&kind).and_then(|r| r.as_ref().ok().copied())
    }

    pub fn failed(&self, kind: EntityKind) -> bool {
        matches!(self.reads.get(&kind), Some(Err(_)))
    }

    pub fn total_rows(&self) -> usize {
        self.reads.values().filter_map(|r| r.as_ref().ok()).sum()
    }

    pub fn reads(&self) -> usize {
        self.reads.len()
    }
}

#[derive(Debug, Clone)]
pub struct WorkloadRunner {
    db:    DatabaseConnection,
    limit: u64,
}

impl WorkloadRunner {
    pub fn new(db: DatabaseConnection, limit: u64) -> Self {
        Self { db, limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn run(&self) -> WorkloadReport {
        let mut report = WorkloadReport::default();

        for kind in EntityKind::POPULATION_ORDER {
            let outcome = self.show_kind(kind).await.map_err(|err| {
                error!("Reading {kind} records failed: {err}");
                err.to_string()
            });
            report.reads.insert(kind, outcome);
        }

        report
    }

    /// Log and count at most `limit` rows of one entity type.
    pub async fn show_kind(&self, kind: EntityKind) -> Result<usize, DbErr> {
        match kind {
            EntityKind::Dealer => {
                self.show::<Dealers>("Dealer Records", |d: &dealer::Model| {
                    format!("Dealer: {}", d.name.as_deref().unwrap_or_default())
                })
                .await
            }
            EntityKind::Customer => {
                self.show::<Customers>("Dealer Customer Records", |c: &customer::Model| {
                    format!("Customer {} Record: {} {}", c.id, c.first_name, c.last_name)
                })
                .await
            }
            EntityKind::Address => {
                self.show::<Addresses>("Customer Address Records", |a: &address::Model| {
                    format!(
                        "Customer ID: {} Address Record. LatLong: {}/{}",
                        a.customer_id,
                        a.latitude.unwrap_or_default(),
                        a.longitude.unwrap_or_default()
                    )
                })
                .await
            }
            EntityKind::Location => {
                self.show::<Locations>("Dealer Location Records", |l: &location::Model| {
                    format!(
                        "Dealer {} Location: {}",
                        l.dealer_id,
                        l.address.as_deref().unwrap_or_default()
                    )
                })
                .await
            }
            EntityKind::ProductType => {
                self.show::<ProductTypes>("Product Type Records", |p: &product_type::Model| {
                    format!(
                        "Dealer {} Product Type: {}",
                        p.dealer_id,
                        p.name.as_deref().unwrap_or_default()
                    )
                })
                .await
            }
            EntityKind::Product => {
                self.show::<Products>("Dealer Products", |p: &product::Model| {
                    format!("Dealer Product: {}", p.name)
                })
                .await
            }
            EntityKind::CustomerOrder => {
                self.show::<CustomerOrders>("Customer Orders", |o: &customer_order::Model| {
                    format!(
                        "Customer {} Order {} placed on {}",
                        o.customer_id, o.order_number, o.order_date
                    )
                })
                .await
            }
            EntityKind::OrderDetail => {
                self.show::<OrderDetails>("Customer Order Details", |d: &order_detail::Model| {
                    format!(
                        "Customer Order Detail: {} line total {}",
                        d.order_id, d.order_line_item_total
                    )
                })
                .await
            }
            EntityKind::OrderShipping => {
                self.show::<OrderShippings>("Orders Shipped", |s: &order_shipping::Model| {
                    format!("Customer Order Shipping Status: {} on {}", s.id, s.shipping_date)
                })
                .await
            }
        }
    }

    async fn show<E>(&self, label: &str, describe: impl Fn(&E::Model) -> String) -> Result<usize, DbErr>
    where
        E: EntityTrait,
    {
        let rows = E::find().limit(self.limit).all(&self.db).await?;

        for row in &rows {
            info!("{}", describe(row));
        }
        info!("{} Total {label}", rows.len());

        Ok(rows.len())
    }
}
