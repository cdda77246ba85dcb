//! Population tasks: fetch raw records for one entity type, attach sampled parent keys and persist the result.
//!
//! Every task follows the same foreign-key rule: each child record gets its own parent sample, drawn uniformly and
//! independently from the keys that exist when the task starts.
//!
//! Writes are grouped into transactions of `chunk_size` records. Each record is inserted under its own savepoint, so a
//! rejected record is rolled back alone and the task carries on with the next one.
pub mod address;
pub mod customer;
pub mod customer_order;
pub mod dealer;
pub mod location;
pub mod order_detail;
pub mod order_shipping;
pub mod product;
pub mod product_type;

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use rand::rngs::StdRng;
use sea_orm::ActiveModelBehavior;
use sea_orm::ActiveModelTrait;
use sea_orm::DatabaseConnection;
use sea_orm::DatabaseTransaction;
use sea_orm::EntityTrait;
use sea_orm::IntoActiveModel;
use sea_orm::TransactionTrait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Deserializer;
use serde_json::Value;
use tracing::error;
use tracing::info;

pub use address::AddressTask;
pub use customer::CustomerTask;
pub use customer_order::CustomerOrderTask;
pub use dealer::DealerTask;
pub use location::LocationTask;
pub use order_detail::OrderDetailTask;
pub use order_shipping::OrderShippingTask;
pub use product::ProductTask;
pub use product_type::ProductTypeTask;

use crate::fetcher::MockDataSource;
use crate::kind::EntityKind;
use crate::sampler::KeySampler;
use crate::types::PopulationError;
use crate::types::RecordError;
use crate::types::SampleError;

pub const DEFAULT_CHUNK_SIZE: usize = 100;

pub type ModelOf<A> = <<A as ActiveModelTrait>::Entity as EntityTrait>::Model;

/// Construction of one entity type from its raw source records.
#[async_trait]
pub trait PopulationTask: Debug + Send + Sync {
    /// Shape of one source record.
    type Record: DeserializeOwned + Send;
    /// Parent keys sampled from for every record.
    type Parents: Send + Sync;
    type ActiveModel: ActiveModelTrait + ActiveModelBehavior + Send + 'static;

    fn kind(&self) -> EntityKind;

    async fn parents(&self, sampler: &KeySampler) -> Result<Self::Parents, SampleError>;

    /// Build a new row. The surrogate key is left unset for storage to assign.
    fn build(
        &self,
        record: Self::Record,
        parents: &Self::Parents,
        rng: &mut StdRng,
    ) -> Result<Self::ActiveModel, RecordError>;

    /// Log line confirming a persisted row.
    fn confirmation(&self, model: &ModelOf<Self::ActiveModel>) -> String;
}

/// Everything a population task needs besides its own logic.
#[derive(Debug, Clone)]
pub struct PopulationContext {
    source:     Arc<dyn MockDataSource>,
    db:         DatabaseConnection,
    sampler:    KeySampler,
    chunk_size: usize,
}

impl PopulationContext {
    pub fn new(source: Arc<dyn MockDataSource>, db: DatabaseConnection, query_limit: u64, chunk_size: usize) -> Self {
        Self {
            source,
            sampler: KeySampler::new(db.clone(), query_limit),
            db,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn sampler(&self) -> &KeySampler {
        &self.sampler
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Run one invocation of `task`. Returns the number of rows committed.
    pub async fn populate<T>(&self, task: &T, rng: &mut StdRng) -> Result<usize, PopulationError>
    where
        T: PopulationTask,
        ModelOf<T::ActiveModel>: IntoActiveModel<T::ActiveModel>,
    {
        let kind = task.kind();
        let records = self.source.fetch(kind).await;

        if records.is_empty() {
            info!("No {kind} records to process");
            return Ok(0);
        }

        let parents = task.parents(&self.sampler).await?;
        let mut persisted = 0;

        for chunk in records.chunks(self.chunk_size) {
            let txn = self.db.begin().await?;
            let mut added = 0;

            for raw in chunk {
                match Self::persist_one(task, &txn, raw, &parents, rng).await {
                    Ok(model) => {
                        added += 1;
                        info!("{}", task.confirmation(&model));
                    }
                    Err(err) => error!("{kind} record rejected: {err}"),
                }
            }

            match txn.commit().await {
                Ok(()) => persisted += added,
                Err(err) => error!("Failed to commit {added} {kind} records: {err}"),
            }
        }

        info!("Total {kind} Records Processed: {persisted}");
        Ok(persisted)
    }

    async fn persist_one<T>(
        task: &T,
        txn: &DatabaseTransaction,
        raw: &Value,
        parents: &T::Parents,
        rng: &mut StdRng,
    ) -> Result<ModelOf<T::ActiveModel>, RecordError>
    where
        T: PopulationTask,
        ModelOf<T::ActiveModel>: IntoActiveModel<T::ActiveModel>,
    {
        let record = <T::Record as Deserialize>::deserialize(raw)?;
        let row = task.build(record, parents, rng)?;

        let savepoint = txn.begin().await?;
        match row.insert(&savepoint).await {
            Ok(model) => {
                savepoint.commit().await?;
                Ok(model)
            }
            Err(err) => {
                savepoint.rollback().await?;
                Err(err.into())
            }
        }
    }
}

/// Accept both `"02134"` and `2134` for code-like fields.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("expected string or number, got {other}"))),
    }
}

/// Timestamps as the mock service renders them: RFC 3339, ISO date-time, ISO date or US `m/d/Y`.
pub(crate) fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, RecordError> {
    let value = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts.and_utc());
        }
    }

    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
        }
    }

    Err(RecordError::InvalidValue {
        field,
        reason: format!("unrecognized date '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;
    use chrono::Timelike;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Zip {
        #[serde(deserialize_with = "string_or_number")]
        zip: String,
    }

    #[test]
    fn test_string_or_number() {
        let z: Zip = serde_json::from_value(json!({"zip": "02134"})).unwrap();
        assert_eq!(z.zip, "02134");
        let z: Zip = serde_json::from_value(json!({"zip": 90210})).unwrap();
        assert_eq!(z.zip, "90210");
        assert!(serde_json::from_value::<Zip>(json!({"zip": true})).is_err());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let ts = parse_timestamp("d", "2024-03-05T10:11:12Z").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day(), ts.hour()), (2024, 3, 5, 10));

        let ts = parse_timestamp("d", "2024-03-05 10:11:12").unwrap();
        assert_eq!(ts.minute(), 11);

        let ts = parse_timestamp("d", "3/5/2024").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 3, 5));

        let ts = parse_timestamp("d", "2024-03-05").unwrap();
        assert_eq!(ts.hour(), 0);

        let err = parse_timestamp("shipping_date", "yesterday").unwrap_err();
        assert!(err.to_string().contains("shipping_date"));
    }
}
