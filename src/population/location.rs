use async_trait::async_trait;
use rand::rngs::StdRng;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;

use super::PopulationTask;
use crate::db::entity::location;
use crate::kind::EntityKind;
use crate::sampler::KeySampler;
use crate::sampler::KeySet;
use crate::types::RecordError;
use crate::types::SampleError;

#[derive(Debug, Deserialize)]
pub struct LocationRecord {
    pub address: Option<String>,
    #[serde(default)]
    pub active:  Option<bool>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocationTask;

#[async_trait]
impl PopulationTask for LocationTask {
    type ActiveModel = location::ActiveModel;
    type Parents = KeySet<i32>;
    type Record = LocationRecord;

    fn kind(&self) -> EntityKind {
        EntityKind::Location
    }

    async fn parents(&self, sampler: &KeySampler) -> Result<KeySet<i32>, SampleError> {
        sampler.dealers().await
    }

    fn build(
        &self,
        record: LocationRecord,
        dealers: &KeySet<i32>,
        rng: &mut StdRng,
    ) -> Result<location::ActiveModel, RecordError> {
        Ok(location::ActiveModel {
            dealer_id: Set(dealers.sample(rng)),
            address: Set(record.address),
            active: Set(record.active.unwrap_or(true)),
            ..Default::default()
        })
    }

    fn confirmation(&self, loc: &location::Model) -> String {
        format!(
            "Dealer ID: {} Location Added: {}",
            loc.dealer_id,
            loc.address.as_deref().unwrap_or_default()
        )
    }
}
