use async_trait::async_trait;
use rand::rngs::StdRng;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;

use super::string_or_number;
use super::PopulationTask;
use crate::db::entity::address;
use crate::kind::EntityKind;
use crate::sampler::KeySampler;
use crate::sampler::KeySet;
use crate::types::RecordError;
use crate::types::SampleError;

#[derive(Debug, Deserialize)]
pub struct AddressRecord {
    pub street:    String,
    pub city:      String,
    pub state:     String,
    #[serde(deserialize_with = "string_or_number")]
    pub zip_code:  String,
    #[serde(default)]
    pub latitude:  Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AddressTask;

#[async_trait]
impl PopulationTask for AddressTask {
    type ActiveModel = address::ActiveModel;
    type Parents = KeySet<(i32, i32)>;
    type Record = AddressRecord;

    fn kind(&self) -> EntityKind {
        EntityKind::Address
    }

    async fn parents(&self, sampler: &KeySampler) -> Result<Self::Parents, SampleError> {
        sampler.customers().await
    }

    fn build(
        &self,
        record: AddressRecord,
        customers: &Self::Parents,
        rng: &mut StdRng,
    ) -> Result<address::ActiveModel, RecordError> {
        let (customer_id, _) = customers.sample(rng);

        Ok(address::ActiveModel {
            customer_id: Set(customer_id),
            street: Set(record.street),
            city: Set(record.city),
            state: Set(record.state),
            zip_code: Set(record.zip_code),
            latitude: Set(record.latitude),
            longitude: Set(record.longitude),
            status: Set(true),
            ..Default::default()
        })
    }

    fn confirmation(&self, a: &address::Model) -> String {
        format!(
            "Customer {} Address Added: {} {}",
            a.customer_id,
            a.latitude.unwrap_or_default(),
            a.longitude.unwrap_or_default()
        )
    }
}
