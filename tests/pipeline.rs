#![cfg(feature = "sqlite")]

mod common;

use std::collections::HashMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sea_orm::EntityTrait;
use sea_orm::QueryOrder;
use serde_json::json;
use sequel::db::entity::*;
use sequel::fetcher::Fetcher;
use sequel::fetcher::FetcherConfig;
use sequel::fetcher::FixtureSource;
use sequel::fetcher::RetryPolicy;
use sequel::kind::EntityKind;
use sequel::orchestrator::Orchestrator;
use sequel::orchestrator::TaskOutcome;
use sequel::population::CustomerTask;
use sequel::population::DealerTask;
use sequel::types::PopulationError;
use sequel::types::SampleError;
use sequel::workload::WorkloadRunner;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

use common::*;

#[tokio::test]
async fn dealers_then_customers() {
    let dir = tempdir();
    let db = storage(&dir).await;
    let mut rng = StdRng::seed_from_u64(42);
    let source = FixtureSource::new()
        .with_records(EntityKind::Dealer, dealers("a", 3))
        .with_records(EntityKind::Customer, customers("a", 5));
    let ctx = context(source, &db, 1000);

    assert_eq!(ctx.populate(&DealerTask, &mut rng).await.unwrap(), 3);

    let rows = Dealers::find().order_by_asc(dealer::Column::Id).all(&db).await.unwrap();
    assert_eq!(rows.len(), 3);
    let names: Vec<_> = rows.iter().map(|d| d.name.clone().unwrap()).collect();
    assert_eq!(names, vec!["Dealer a1", "Dealer a2", "Dealer a3"]);
    let dealer_ids = ids::<Dealers>(&db, dealer::Column::Id).await;
    assert_eq!(dealer_ids.len(), 3, "surrogate keys are distinct");

    assert_eq!(ctx.populate(&CustomerTask, &mut rng).await.unwrap(), 5);
    let customers = Customers::find().all(&db).await.unwrap();
    assert_eq!(customers.len(), 5);
    for c in customers {
        assert!(dealer_ids.contains(&c.dealer_id), "customer {} has unknown dealer {}", c.id, c.dealer_id);
        assert!(c.status);
    }
}

#[tokio::test]
async fn returned_count_matches_new_rows() {
    let dir = tempdir();
    let db = storage(&dir).await;
    let mut rng = StdRng::seed_from_u64(1);
    let ctx = context(full_source("c", 6), &db, 1000);

    let before = count::<Dealers>(&db).await;
    let added = ctx.populate(&DealerTask, &mut rng).await.unwrap();
    assert_eq!(count::<Dealers>(&db).await - before, added as u64);

    let before = count::<Customers>(&db).await;
    let added = ctx.populate(&CustomerTask, &mut rng).await.unwrap();
    assert_eq!(count::<Customers>(&db).await - before, added as u64);
    assert_eq!(added, 6);
}

#[tokio::test]
async fn rejected_records_are_rolled_back_alone() {
    let dir = tempdir();
    let db = storage(&dir).await;
    let mut rng = StdRng::seed_from_u64(3);

    let mut records = dealers("r", 5);
    // Duplicate dealer code.
    records[3]["dealer_code"] = json!("DLR-r-1");
    // Missing required field.
    records.push(json!({"dealer_code": "DLR-r-99"}));

    let ctx = context(FixtureSource::new().with_records(EntityKind::Dealer, records), &db, 1000);
    assert_eq!(ctx.populate(&DealerTask, &mut rng).await.unwrap(), 4);

    let codes: Vec<_> = Dealers::find()
        .order_by_asc(dealer::Column::Id)
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.dealer_code.unwrap())
        .collect();
    assert_eq!(codes, vec!["DLR-r-1", "DLR-r-2", "DLR-r-3", "DLR-r-5"]);
}

#[tokio::test]
async fn empty_parent_set_is_a_typed_failure() {
    let dir = tempdir();
    let db = storage(&dir).await;
    let mut rng = StdRng::seed_from_u64(5);
    let ctx = context(
        FixtureSource::new().with_records(EntityKind::Customer, customers("e", 2)),
        &db,
        1000,
    );

    let err = ctx.populate(&CustomerTask, &mut rng).await.unwrap_err();
    assert!(
        matches!(err, PopulationError::Sample(SampleError::EmptyParentSet(EntityKind::Dealer))),
        "{err:?}"
    );
    assert_eq!(count::<Customers>(&db).await, 0);
}

#[tokio::test]
async fn nothing_fetched_is_not_a_failure() {
    let dir = tempdir();
    let db = storage(&dir).await;
    let mut rng = StdRng::seed_from_u64(5);
    let ctx = context(FixtureSource::new(), &db, 1000);

    // No dealers exist, but without records there is nothing to attach them to.
    assert_eq!(ctx.populate(&CustomerTask, &mut rng).await.unwrap(), 0);
}

#[tokio::test]
async fn full_cycle_keeps_foreign_keys_valid() {
    let dir = tempdir();
    let db = storage(&dir).await;
    let mut rng = StdRng::seed_from_u64(11);
    let orchestrator = Orchestrator::new(context(full_source("f", 8), &db, 1000), CancellationToken::new());

    let report = orchestrator.run_cycle(&mut rng).await;
    assert_eq!(report.tasks_run(), 9);
    for kind in EntityKind::POPULATION_ORDER {
        assert_eq!(report.outcome(kind), Some(&TaskOutcome::Persisted(8)), "{kind}");
    }

    let dealer_ids = ids::<Dealers>(&db, dealer::Column::Id).await;
    let address_ids = ids::<Addresses>(&db, address::Column::Id).await;
    let location_ids = ids::<Locations>(&db, location::Column::Id).await;
    let type_ids = ids::<ProductTypes>(&db, product_type::Column::Id).await;
    let product_ids = ids::<Products>(&db, product::Column::Id).await;

    let customers: HashMap<i32, i32> = Customers::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|c| (c.id, c.dealer_id))
        .collect();
    assert!(customers.values().all(|d| dealer_ids.contains(d)));

    for a in Addresses::find().all(&db).await.unwrap() {
        assert!(customers.contains_key(&a.customer_id));
        assert_eq!(a.zip_code.len(), 5);
    }
    for l in Locations::find().all(&db).await.unwrap() {
        assert!(dealer_ids.contains(&l.dealer_id));
    }
    for t in ProductTypes::find().all(&db).await.unwrap() {
        assert!(dealer_ids.contains(&t.dealer_id));
    }
    for p in Products::find().all(&db).await.unwrap() {
        assert!(dealer_ids.contains(&p.dealer_id));
        assert!(type_ids.contains(&p.product_type_id));
        let location_id = p.location_id.expect("locations exist, so products get one");
        assert!(location_ids.contains(&location_id));
    }

    let orders: HashMap<i32, i32> = CustomerOrders::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|o| {
            assert_eq!(customers.get(&o.customer_id), Some(&o.dealer_id), "order dealer is the customer's");
            (o.id, o.customer_id)
        })
        .collect();

    let details: HashMap<i32, i32> = OrderDetails::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|d| {
            assert!(orders.contains_key(&d.order_id));
            assert!(product_ids.contains(&d.order_product_id));
            (d.id, d.order_id)
        })
        .collect();

    for s in OrderShippings::find().all(&db).await.unwrap() {
        assert!(address_ids.contains(&s.address_id));
        assert_eq!(details.get(&s.order_detail_id), Some(&s.order_id), "shipment order is the line's");
        assert_eq!(s.shipping_carrier, "UPS");
    }
}

#[tokio::test]
async fn line_totals_are_derived() {
    let dir = tempdir();
    let db = storage(&dir).await;
    let mut rng = StdRng::seed_from_u64(17);
    let orchestrator = Orchestrator::new(context(full_source("l", 6), &db, 1000), CancellationToken::new());
    orchestrator.run_cycle(&mut rng).await;

    let details = OrderDetails::find().all(&db).await.unwrap();
    assert_eq!(details.len(), 6);
    for d in details {
        assert_eq!(
            d.order_line_item_total,
            f64::from(d.order_product_quantity) * d.order_product_item_price
        );
    }
}

#[tokio::test]
async fn row_counts_never_shrink() {
    let dir = tempdir();
    let db = storage(&dir).await;
    let mut rng = StdRng::seed_from_u64(23);
    let orchestrator = Orchestrator::new(context(full_source("m", 4), &db, 1000), CancellationToken::new());

    let mut previous = [0u64; 9];
    for cycle in 0..3 {
        orchestrator.run_cycle(&mut rng).await;
        let current = [
            count::<Dealers>(&db).await,
            count::<Customers>(&db).await,
            count::<Addresses>(&db).await,
            count::<Locations>(&db).await,
            count::<ProductTypes>(&db).await,
            count::<Products>(&db).await,
            count::<CustomerOrders>(&db).await,
            count::<OrderDetails>(&db).await,
            count::<OrderShippings>(&db).await,
        ];
        for (i, (prev, cur)) in previous.iter().zip(current.iter()).enumerate() {
            assert!(cur >= prev, "cycle {cycle}: {:?} shrank", EntityKind::POPULATION_ORDER[i]);
        }
        previous = current;
    }

    // Unique codes and tracking numbers repeat, the rest accumulates.
    assert_eq!(previous[0], 4);
    assert_eq!(previous[1], 12);
    assert_eq!(previous[8], 4);
}

#[tokio::test]
async fn workload_reads_are_bounded() {
    let dir = tempdir();
    let db = storage(&dir).await;
    let mut rng = StdRng::seed_from_u64(2);
    let ctx = context(
        FixtureSource::new().with_records(EntityKind::Dealer, dealers("w", 10)),
        &db,
        1000,
    );
    assert_eq!(ctx.populate(&DealerTask, &mut rng).await.unwrap(), 10);

    let runner = WorkloadRunner::new(db.clone(), 2);
    assert_eq!(runner.show_kind(EntityKind::Dealer).await.unwrap(), 2);

    let report = runner.run().await;
    assert_eq!(report.reads(), 9);
    assert_eq!(report.rows(EntityKind::Dealer), Some(2));
    assert_eq!(report.rows(EntityKind::OrderShipping), Some(0));
    assert_eq!(report.total_rows(), 2);
}

#[tokio::test]
async fn server_error_does_not_stop_the_cycle() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dealer.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/customer.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(customers("h", 2))))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(FetcherConfig {
        base_url: server.uri(),
        api_key:  "k".to_string(),
        timeout:  Duration::from_secs(5),
        retry:    RetryPolicy {
            max_retries:     1,
            initial_backoff: Duration::from_millis(5),
            max_backoff:     Duration::from_millis(5),
        },
    })
    .unwrap();

    let dir = tempdir();
    let db = storage(&dir).await;
    let mut rng = StdRng::seed_from_u64(9);
    let orchestrator = Orchestrator::new(context(fetcher, &db, 1000), CancellationToken::new());

    let report = orchestrator.run_cycle(&mut rng).await;
    assert_eq!(report.tasks_run(), 9);
    assert_eq!(report.outcome(EntityKind::Dealer), Some(&TaskOutcome::Persisted(0)));
    // The customer task still ran; it fetched records but had no dealers to attach them to.
    assert!(matches!(report.outcome(EntityKind::Customer), Some(TaskOutcome::Failed(_))));
    assert_eq!(report.failures().count(), 1);
    assert_eq!(count::<Dealers>(&db).await, 0);
}

#[tokio::test]
async fn cancelled_cycle_runs_no_tasks() {
    let dir = tempdir();
    let db = storage(&dir).await;
    let mut rng = StdRng::seed_from_u64(4);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let orchestrator = Orchestrator::new(context(full_source("x", 3), &db, 1000), cancel);
    let report = orchestrator.run_cycle(&mut rng).await;
    assert!(report.cancelled());
    assert_eq!(report.tasks_run(), 0);
    assert_eq!(count::<Dealers>(&db).await, 0);
}
