use async_trait::async_trait;
use rand::rngs::StdRng;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;

use super::parse_timestamp;
use super::PopulationTask;
use crate::db::entity::order_shipping;
use crate::kind::EntityKind;
use crate::sampler::KeySampler;
use crate::sampler::KeySet;
use crate::types::RecordError;
use crate::types::SampleError;

#[derive(Debug, Deserialize)]
pub struct OrderShippingRecord {
    pub shipping_date:              String,
    #[serde(default)]
    pub shipping_status:            Option<bool>,
    pub shipping_tracking_number:   String,
    pub shipping_carrier:           String,
    #[serde(default)]
    pub shipping_delivered:         Option<bool>,
    #[serde(default)]
    pub shipping_final_disposition: Option<String>,
}

#[derive(Debug)]
pub struct OrderShippingParents {
    pub addresses:     KeySet<i32>,
    /// `(order_detail_id, order_id)`
    pub order_details: KeySet<(i32, i32)>,
}

/// A shipment covers one sampled order line; the order comes with the line. The destination address is sampled on its
/// own.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderShippingTask;

#[async_trait]
impl PopulationTask for OrderShippingTask {
    type ActiveModel = order_shipping::ActiveModel;
    type Parents = OrderShippingParents;
    type Record = OrderShippingRecord;

    fn kind(&self) -> EntityKind {
        EntityKind::OrderShipping
    }

    async fn parents(&self, sampler: &KeySampler) -> Result<OrderShippingParents, SampleError> {
        Ok(OrderShippingParents {
            addresses:     sampler.addresses().await?,
            order_details: sampler.order_details().await?,
        })
    }

    fn build(
        &self,
        record: OrderShippingRecord,
        parents: &OrderShippingParents,
        rng: &mut StdRng,
    ) -> Result<order_shipping::ActiveModel, RecordError> {
        let shipping_date = parse_timestamp("shipping_date", &record.shipping_date)?;
        let (order_detail_id, order_id) = parents.order_details.sample(rng);

        Ok(order_shipping::ActiveModel {
            address_id: Set(parents.addresses.sample(rng)),
            order_id: Set(order_id),
            order_detail_id: Set(order_detail_id),
            shipping_date: Set(shipping_date),
            shipping_status: Set(record.shipping_status.unwrap_or(false)),
            shipping_tracking_number: Set(record.shipping_tracking_number),
            shipping_carrier: Set(record.shipping_carrier),
            shipping_delivered: Set(record.shipping_delivered.unwrap_or(false)),
            shipping_final_disposition: Set(record.shipping_final_disposition),
            ..Default::default()
        })
    }

    fn confirmation(&self, s: &order_shipping::Model) -> String {
        format!(
            "Order {} Shipment Added: {} via {}",
            s.order_id, s.shipping_tracking_number, s.shipping_carrier
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_shipment_follows_its_order_line() {
        let parents = OrderShippingParents {
            addresses:     KeySet::new(EntityKind::Address, vec![1, 2]).unwrap(),
            order_details: KeySet::new(EntityKind::OrderDetail, vec![(10, 100), (11, 101)]).unwrap(),
        };
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..20 {
            let record: OrderShippingRecord = serde_json::from_value(json!({
                "shipping_date": "6/1/2024",
                "shipping_tracking_number": "1Z999",
                "shipping_carrier": "FedEx",
            }))
            .unwrap();
            let row = OrderShippingTask.build(record, &parents, &mut rng).unwrap();
            let detail = row.order_detail_id.clone().unwrap();
            let order = row.order_id.clone().unwrap();
            assert_eq!(order, detail + 90);
            assert_eq!(row.shipping_delivered, Set(false));
        }
    }

    #[test]
    fn test_unparsable_date_is_rejected() {
        let parents = OrderShippingParents {
            addresses:     KeySet::new(EntityKind::Address, vec![1]).unwrap(),
            order_details: KeySet::new(EntityKind::OrderDetail, vec![(1, 1)]).unwrap(),
        };
        let record: OrderShippingRecord = serde_json::from_value(json!({
            "shipping_date": "soon",
            "shipping_tracking_number": "1Z1",
            "shipping_carrier": "DHL",
        }))
        .unwrap();
        let err = OrderShippingTask
            .build(record, &parents, &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(err.to_string().contains("shipping_date"));
    }
}
