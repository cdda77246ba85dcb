use async_trait::async_trait;
use rand::rngs::StdRng;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;

use super::PopulationTask;
use crate::db::entity::customer;
use crate::kind::EntityKind;
use crate::sampler::KeySampler;
use crate::sampler::KeySet;
use crate::types::RecordError;
use crate::types::SampleError;

#[derive(Debug, Deserialize)]
pub struct CustomerRecord {
    pub first_name: String,
    pub last_name:  String,
    pub email:      String,
    #[serde(default)]
    pub phone:      Option<String>,
    #[serde(default)]
    pub status:     Option<bool>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CustomerTask;

#[async_trait]
impl PopulationTask for CustomerTask {
    type ActiveModel = customer::ActiveModel;
    type Parents = KeySet<i32>;
    type Record = CustomerRecord;

    fn kind(&self) -> EntityKind {
        EntityKind::Customer
    }

    async fn parents(&self, sampler: &KeySampler) -> Result<KeySet<i32>, SampleError> {
        sampler.dealers().await
    }

    fn build(
        &self,
        record: CustomerRecord,
        dealers: &KeySet<i32>,
        rng: &mut StdRng,
    ) -> Result<customer::ActiveModel, RecordError> {
        Ok(customer::ActiveModel {
            dealer_id: Set(dealers.sample(rng)),
            first_name: Set(record.first_name),
            last_name: Set(record.last_name),
            email: Set(record.email),
            phone: Set(record.phone),
            status: Set(record.status.unwrap_or(true)),
            ..Default::default()
        })
    }

    fn confirmation(&self, c: &customer::Model) -> String {
        format!("Customer Added:{}: {} {}", c.id, c.first_name, c.last_name)
    }
}
