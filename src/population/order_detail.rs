use async_trait::async_trait;
use rand::rngs::StdRng;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;

use super::PopulationTask;
use crate::db::entity::order_detail;
use crate::kind::EntityKind;
use crate::sampler::KeySampler;
use crate::sampler::KeySet;
use crate::types::RecordError;
use crate::types::SampleError;

#[derive(Debug, Deserialize)]
pub struct OrderDetailRecord {
    pub order_product_quantity:   i32,
    pub order_product_item_price: f64,
}

#[derive(Debug)]
pub struct OrderDetailParents {
    pub orders:   KeySet<i32>,
    pub products: KeySet<i32>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OrderDetailTask;

#[async_trait]
impl PopulationTask for OrderDetailTask {
    type ActiveModel = order_detail::ActiveModel;
    type Parents = OrderDetailParents;
    type Record = OrderDetailRecord;

    fn kind(&self) -> EntityKind {
        EntityKind::OrderDetail
    }

    async fn parents(&self, sampler: &KeySampler) -> Result<OrderDetailParents, SampleError> {
        Ok(OrderDetailParents {
            orders:   sampler.orders().await?,
            products: sampler.products().await?,
        })
    }

    fn build(
        &self,
        record: OrderDetailRecord,
        parents: &OrderDetailParents,
        rng: &mut StdRng,
    ) -> Result<order_detail::ActiveModel, RecordError> {
        let quantity = record.order_product_quantity;
        let price = record.order_product_item_price;

        if quantity < 0 {
            return Err(RecordError::InvalidValue {
                field:  "order_product_quantity",
                reason: format!("negative quantity {quantity}"),
            });
        }
        if !price.is_finite() || price < 0.0 {
            return Err(RecordError::InvalidValue {
                field:  "order_product_item_price",
                reason: format!("{price} is not a valid price"),
            });
        }

        Ok(order_detail::ActiveModel {
            order_id: Set(parents.orders.sample(rng)),
            order_product_id: Set(parents.products.sample(rng)),
            order_product_quantity: Set(quantity),
            order_product_item_price: Set(price),
            order_line_item_total: Set(line_total(quantity, price)),
            ..Default::default()
        })
    }

    fn confirmation(&self, d: &order_detail::Model) -> String {
        format!(
            "Customer Order {} Detail Added: {} x {} = {}",
            d.order_id, d.order_product_quantity, d.order_product_item_price, d.order_line_item_total
        )
    }
}

pub fn line_total(quantity: i32, price: f64) -> f64 {
    f64::from(quantity) * price
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn parents() -> OrderDetailParents {
        OrderDetailParents {
            orders:   KeySet::new(EntityKind::CustomerOrder, vec![7]).unwrap(),
            products: KeySet::new(EntityKind::Product, vec![3, 4]).unwrap(),
        }
    }

    #[test]
    fn test_line_total_is_derived() {
        let mut rng = StdRng::seed_from_u64(0);
        let record = OrderDetailRecord {
            order_product_quantity:   3,
            order_product_item_price: 2.5,
        };
        let row = OrderDetailTask.build(record, &parents(), &mut rng).unwrap();
        assert_eq!(row.order_line_item_total, Set(7.5));
        assert_eq!(row.order_id, Set(7));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut rng = StdRng::seed_from_u64(0);
        let negative = OrderDetailRecord {
            order_product_quantity:   -1,
            order_product_item_price: 2.5,
        };
        assert!(matches!(
            OrderDetailTask.build(negative, &parents(), &mut rng),
            Err(RecordError::InvalidValue {
                field: "order_product_quantity",
                ..
            })
        ));

        let nan = OrderDetailRecord {
            order_product_quantity:   1,
            order_product_item_price: f64::NAN,
        };
        assert!(OrderDetailTask.build(nan, &parents(), &mut rng).is_err());

        let refund = OrderDetailRecord {
            order_product_quantity:   1,
            order_product_item_price: -2.5,
        };
        assert!(matches!(
            OrderDetailTask.build(refund, &parents(), &mut rng),
            Err(RecordError::InvalidValue {
                field: "order_product_item_price",
                ..
            })
        ));
    }
}
