//! # sequel
//!
//! Seeds a relational schema of dealers, customers, products, orders and shipments with records pulled from a mock
//! data service, then keeps a read workload running against it.
//!
//! Each cycle runs nine population tasks in foreign-key order (dealer, customer, address, location, product type,
//! product, customer order, order detail, order shipping). A task fetches raw records, attaches parent keys sampled
//! from rows already in storage and writes the result in chunked transactions. Then every table gets one bounded read.
//! Cycles repeat every interval until the configured duration is reached or the process is interrupted.
//!
//! The pipeline is append-only: rows are never updated or deleted, and data survives between runs.
//!
//! Failures are contained as far down as possible:
//!
//! | Failure | Effect |
//! | ------- | ------ |
//! | Mock service unreachable, non-200 status | the task sees zero records |
//! | Bad record, constraint violation | the record is rolled back alone |
//! | No parent rows to reference | the task fails, the cycle goes on |
//! | Storage initialization, invalid configuration | the process exits |
//!
//! Storage backends are cargo features: `sqlite` (default), `pg` and `mysql`.
pub mod app;
pub mod config;
pub mod db;
pub mod fetcher;
pub mod kind;
pub mod logging;
pub mod orchestrator;
pub mod population;
pub mod sampler;
pub mod scheduler;
pub mod types;
pub mod workload;
