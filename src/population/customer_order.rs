use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;

use super::PopulationTask;
use crate::db::entity::customer_order;
use crate::kind::EntityKind;
use crate::sampler::KeySampler;
use crate::sampler::KeySet;
use crate::types::RecordError;
use crate::types::SampleError;

#[derive(Debug, Deserialize)]
pub struct CustomerOrderRecord {
    pub order_number: i64,
    #[serde(default)]
    pub order_status: Option<bool>,
}

/// Orders go to one sampled customer and inherit that customer's dealer, so the pair always matches.
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomerOrderTask;

#[async_trait]
impl PopulationTask for CustomerOrderTask {
    type ActiveModel = customer_order::ActiveModel;
    type Parents = KeySet<(i32, i32)>;
    type Record = CustomerOrderRecord;

    fn kind(&self) -> EntityKind {
        EntityKind::CustomerOrder
    }

    async fn parents(&self, sampler: &KeySampler) -> Result<Self::Parents, SampleError> {
        sampler.customers().await
    }

    fn build(
        &self,
        record: CustomerOrderRecord,
        customers: &Self::Parents,
        rng: &mut StdRng,
    ) -> Result<customer_order::ActiveModel, RecordError> {
        let (customer_id, dealer_id) = customers.sample(rng);

        Ok(customer_order::ActiveModel {
            dealer_id: Set(dealer_id),
            customer_id: Set(customer_id),
            order_number: Set(record.order_number),
            order_date: Set(Utc::now()),
            order_status: Set(record.order_status.unwrap_or(true)),
            ..Default::default()
        })
    }

    fn confirmation(&self, o: &customer_order::Model) -> String {
        format!(
            "Customer {} Order {} placed on {}",
            o.customer_id, o.order_number, o.order_date
        )
    }
}
