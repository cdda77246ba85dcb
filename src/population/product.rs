use async_trait::async_trait;
use rand::rngs::StdRng;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;

use super::PopulationTask;
use crate::db::entity::product;
use crate::kind::EntityKind;
use crate::sampler::KeySampler;
use crate::sampler::KeySet;
use crate::types::RecordError;
use crate::types::SampleError;

#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    pub name:        String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub item_price:  Option<f64>,
    #[serde(default)]
    pub active:      Option<bool>,
}

#[derive(Debug)]
pub struct ProductParents {
    pub dealers:       KeySet<i32>,
    pub product_types: KeySet<i32>,
    pub locations:     Option<KeySet<i32>>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProductTask;

#[async_trait]
impl PopulationTask for ProductTask {
    type ActiveModel = product::ActiveModel;
    type Parents = ProductParents;
    type Record = ProductRecord;

    fn kind(&self) -> EntityKind {
        EntityKind::Product
    }

    async fn parents(&self, sampler: &KeySampler) -> Result<ProductParents, SampleError> {
        Ok(ProductParents {
            dealers:       sampler.dealers().await?,
            product_types: sampler.product_types().await?,
            locations:     sampler.locations().await?,
        })
    }

    fn build(
        &self,
        record: ProductRecord,
        parents: &ProductParents,
        rng: &mut StdRng,
    ) -> Result<product::ActiveModel, RecordError> {
        if let Some(price) = record.item_price {
            if !price.is_finite() || price < 0.0 {
                return Err(RecordError::InvalidValue {
                    field:  "item_price",
                    reason: format!("{price} is not a valid price"),
                });
            }
        }

        // Both required parents are drawn independently of each other.
        Ok(product::ActiveModel {
            dealer_id: Set(parents.dealers.sample(rng)),
            product_type_id: Set(parents.product_types.sample(rng)),
            name: Set(record.name),
            description: Set(record.description),
            item_price: Set(record.item_price),
            active: Set(record.active.unwrap_or(true)),
            location_id: Set(parents.locations.as_ref().map(|l| l.sample(rng))),
            ..Default::default()
        })
    }

    fn confirmation(&self, p: &product::Model) -> String {
        format!("Product ID: {} added for Dealer ID: {}", p.id, p.dealer_id)
    }
}
