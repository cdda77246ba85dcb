use async_trait::async_trait;
use rand::rngs::StdRng;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;

use super::PopulationTask;
use crate::db::entity::dealer;
use crate::kind::EntityKind;
use crate::sampler::KeySampler;
use crate::types::RecordError;
use crate::types::SampleError;

#[derive(Debug, Deserialize)]
pub struct DealerRecord {
    pub name:        String,
    pub dealer_code: String,
}

/// Root of the graph: dealers reference nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DealerTask;

#[async_trait]
impl PopulationTask for DealerTask {
    type ActiveModel = dealer::ActiveModel;
    type Parents = ();
    type Record = DealerRecord;

    fn kind(&self) -> EntityKind {
        EntityKind::Dealer
    }

    async fn parents(&self, _sampler: &KeySampler) -> Result<(), SampleError> {
        Ok(())
    }

    fn build(&self, record: DealerRecord, _parents: &(), _rng: &mut StdRng) -> Result<dealer::ActiveModel, RecordError> {
        Ok(dealer::ActiveModel {
            name: Set(Some(record.name)),
            dealer_code: Set(Some(record.dealer_code)),
            ..Default::default()
        })
    }

    fn confirmation(&self, dealer: &dealer::Model) -> String {
        format!(
            "Dealer Record Added: {}:{}",
            dealer.id,
            dealer.name.as_deref().unwrap_or_default()
        )
    }
}
