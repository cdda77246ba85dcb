use async_trait::async_trait;
use rand::rngs::StdRng;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;

use super::PopulationTask;
use crate::db::entity::product_type;
use crate::kind::EntityKind;
use crate::sampler::KeySampler;
use crate::sampler::KeySet;
use crate::types::RecordError;
use crate::types::SampleError;

#[derive(Debug, Deserialize)]
pub struct ProductTypeRecord {
    pub name:   String,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProductTypeTask;

#[async_trait]
impl PopulationTask for ProductTypeTask {
    type ActiveModel = product_type::ActiveModel;
    type Parents = KeySet<i32>;
    type Record = ProductTypeRecord;

    fn kind(&self) -> EntityKind {
        EntityKind::ProductType
    }

    async fn parents(&self, sampler: &KeySampler) -> Result<KeySet<i32>, SampleError> {
        sampler.dealers().await
    }

    fn build(
        &self,
        record: ProductTypeRecord,
        dealers: &KeySet<i32>,
        rng: &mut StdRng,
    ) -> Result<product_type::ActiveModel, RecordError> {
        Ok(product_type::ActiveModel {
            dealer_id: Set(dealers.sample(rng)),
            name: Set(Some(record.name)),
            active: Set(record.active.unwrap_or(true)),
            ..Default::default()
        })
    }

    fn confirmation(&self, pt: &product_type::Model) -> String {
        format!("Product Type ID: {} Added", pt.id)
    }
}
