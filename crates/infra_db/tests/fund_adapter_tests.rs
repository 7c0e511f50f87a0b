//! PostgreSQL fund adapter tests
//!
//! These run against a throwaway PostgreSQL container and are ignored by
//! default; run them with `cargo test -p infra_db -- --ignored`.

use rust_decimal_macros::dec;

use core_kernel::HealthCheckable;
use domain_fund::{FundId, FundPort, FundValidator};
use infra_db::PostgresFundAdapter;
use test_utils::{db_test, FundFixtures, FundPayloadBuilder, IdFixtures};

db_test!(test_insert_then_get, pool, {
    let adapter = PostgresFundAdapter::new(pool.clone());

    let inserted = adapter.insert(FundFixtures::valid_fund("FUND001")).await.unwrap();
    let fetched = adapter.get(&FundId::new("FUND001")).await.unwrap();

    assert_eq!(inserted, fetched);
    assert_eq!(fetched.fund_nav, dec!(100.00));
    assert_eq!(fetched.fund_nav.to_string(), "100.00");
});

db_test!(test_duplicate_insert_is_conflict, pool, {
    let adapter = PostgresFundAdapter::new(pool.clone());
    adapter.insert(FundFixtures::valid_fund("FUND001")).await.unwrap();

    let err = adapter.insert(FundFixtures::valid_fund("FUND001")).await.unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(adapter.count().await.unwrap(), 1);
});

db_test!(test_list_ordered_by_id, pool, {
    let adapter = PostgresFundAdapter::new(pool.clone());
    for id in ["FUND003", "FUND001", "FUND002"] {
        adapter.insert(FundFixtures::valid_fund(id)).await.unwrap();
    }

    let ids: Vec<_> = adapter
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.fund_id.into_inner())
        .collect();
    assert_eq!(ids, ["FUND001", "FUND002", "FUND003"]);
});

db_test!(test_update_overwrites_all_fields, pool, {
    let adapter = PostgresFundAdapter::new(pool.clone());
    adapter.insert(FundFixtures::valid_fund("FUND001")).await.unwrap();

    let replacement = FundValidator::validate(
        &FundPayloadBuilder::new()
            .fund_name("Updated Fund")
            .fund_nav("250.50")
            .fund_performance("-100.00")
            .set("date_of_creation", "2020-06-30")
            .build(),
    )
    .unwrap();

    let updated = adapter.update(replacement.clone()).await.unwrap();
    assert_eq!(&updated, replacement.as_fund());
    assert_eq!(adapter.get(&FundId::new("FUND001")).await.unwrap(), updated);
});

db_test!(test_missing_rows, pool, {
    let adapter = PostgresFundAdapter::new(pool.clone());
    let missing = IdFixtures::missing_fund_id();

    assert!(adapter.get(&missing).await.unwrap_err().is_not_found());
    assert!(adapter
        .update(FundFixtures::valid_fund(missing.as_str()))
        .await
        .unwrap_err()
        .is_not_found());
    assert!(adapter.delete(&missing).await.unwrap_err().is_not_found());
    assert_eq!(adapter.count().await.unwrap(), 0);
});

db_test!(test_delete_removes_row, pool, {
    let adapter = PostgresFundAdapter::new(pool.clone());
    adapter.insert(FundFixtures::valid_fund("FUND001")).await.unwrap();

    adapter.delete(&FundId::new("FUND001")).await.unwrap();
    assert_eq!(adapter.count().await.unwrap(), 0);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM funds WHERE fund_id = $1")
        .bind("FUND001")
        .fetch_one(pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
});

db_test!(test_health_check_healthy, pool, {
    let adapter = PostgresFundAdapter::new(pool.clone());
    assert!(adapter.health_check().await.is_ready());
});
