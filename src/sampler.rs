//! Foreign-key candidates for child entities.
//!
//! Keys are read fresh from storage on every population task invocation, so rows added by an earlier task (or an
//! earlier cycle) are immediately eligible. Reads are bounded by the query limit.

use rand::Rng;
use sea_orm::DatabaseConnection;
use sea_orm::EntityTrait;
use sea_orm::QueryOrder;
use sea_orm::QuerySelect;
use sea_orm::TryGetableMany;

use crate::db::entity::address;
use crate::db::entity::customer;
use crate::db::entity::customer_order;
use crate::db::entity::dealer;
use crate::db::entity::location;
use crate::db::entity::order_detail;
use crate::db::entity::product;
use crate::db::entity::product_type;
use crate::db::prelude::*;
use crate::kind::EntityKind;
use crate::types::SampleError;

/// A non-empty set of parent keys. Sampling is uniform with replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct KeySet<K> {
    kind: EntityKind,
    keys: Vec<K>,
}

impl<K: Copy> KeySet<K> {
    pub fn new(kind: EntityKind, keys: Vec<K>) -> Result<Self, SampleError> {
        if keys.is_empty() {
            Err(SampleError::EmptyParentSet(kind))
        }
        else {
            Ok(Self { kind, keys })
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    // A key set can't be empty, see `new`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> K {
        self.keys[rng.random_range(0..self.keys.len())]
    }
}

/// Reads parent keys for the population tasks.
#[derive(Debug, Clone)]
pub struct KeySampler {
    db:    DatabaseConnection,
    limit: u64,
}

impl KeySampler {
    pub fn new(db: DatabaseConnection, limit: u64) -> Self {
        Self { db, limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    async fn read<E, K>(&self, kind: EntityKind, columns: Vec<E::Column>) -> Result<Vec<K>, SampleError>
    where
        E: EntityTrait,
        K: TryGetableMany,
    {
        let order_by = columns[0];
        E::find()
            .select_only()
            .columns(columns)
            .order_by_asc(order_by)
            .limit(self.limit)
            .into_tuple::<K>()
            .all(&self.db)
            .await
            .map_err(|source| SampleError::Storage { kind, source })
    }

    async fn required<E, K>(&self, kind: EntityKind, columns: Vec<E::Column>) -> Result<KeySet<K>, SampleError>
    where
        E: EntityTrait,
        K: TryGetableMany + Copy,
    {
        KeySet::new(kind, self.read::<E, K>(kind, columns).await?)
    }

    pub async fn dealers(&self) -> Result<KeySet<i32>, SampleError> {
        self.required::<Dealers, i32>(EntityKind::Dealer, vec![dealer::Column::Id])
            .await
    }

    /// `(customer_id, dealer_id)` pairs.
    pub async fn customers(&self) -> Result<KeySet<(i32, i32)>, SampleError> {
        self.required::<Customers, (i32, i32)>(
            EntityKind::Customer,
            vec![customer::Column::Id, customer::Column::DealerId],
        )
        .await
    }

    pub async fn addresses(&self) -> Result<KeySet<i32>, SampleError> {
        self.required::<Addresses, i32>(EntityKind::Address, vec![address::Column::Id])
            .await
    }

    /// Locations are an optional reference; an empty table is not an error.
    pub async fn locations(&self) -> Result<Option<KeySet<i32>>, SampleError> {
        let keys = self
            .read::<Locations, i32>(EntityKind::Location, vec![location::Column::Id])
            .await?;
        Ok(KeySet::new(EntityKind::Location, keys).ok())
    }

    pub async fn product_types(&self) -> Result<KeySet<i32>, SampleError> {
        self.required::<ProductTypes, i32>(EntityKind::ProductType, vec![product_type::Column::Id])
            .await
    }

    pub async fn products(&self) -> Result<KeySet<i32>, SampleError> {
        self.required::<Products, i32>(EntityKind::Product, vec![product::Column::Id])
            .await
    }

    pub async fn orders(&self) -> Result<KeySet<i32>, SampleError> {
        self.required::<CustomerOrders, i32>(EntityKind::CustomerOrder, vec![customer_order::Column::Id])
            .await
    }

    /// `(order_detail_id, order_id)` pairs.
    pub async fn order_details(&self) -> Result<KeySet<(i32, i32)>, SampleError> {
        self.required::<OrderDetails, (i32, i32)>(
            EntityKind::OrderDetail,
            vec![order_detail::Column::Id, order_detail::Column::OrderId],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_empty_key_set_is_an_error() {
        let err = KeySet::<i32>::new(EntityKind::Dealer, vec![]).unwrap_err();
        assert!(matches!(err, SampleError::EmptyParentSet(EntityKind::Dealer)));
        assert_eq!(err.to_string(), "no Dealer rows available to reference");
    }

    #[test]
    fn test_sample_stays_within_set_and_covers_it() {
        let set = KeySet::new(EntityKind::Customer, vec![3, 5, 8]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let drawn: HashSet<i32> = (0..200).map(|_| set.sample(&mut rng)).collect();
        assert_eq!(drawn, HashSet::from([3, 5, 8]));
    }

    #[test]
    fn test_single_key_always_sampled() {
        let set = KeySet::new(EntityKind::OrderDetail, vec![(4, 9)]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            assert_eq!(set.sample(&mut rng), (4, 9));
        }
        assert_eq!(set.len(), 1);
        assert_eq!(set.kind(), EntityKind::OrderDetail);
    }
}
