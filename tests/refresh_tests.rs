mod common;

use std::sync::Arc;

use rust_decimal_macros::dec;

use stockpanel::db::position_repo;
use stockpanel::models::Quote;
use stockpanel::services::refresh::RefreshService;

fn quote(symbol: &str) -> Quote {
    Quote {
        symbol: symbol.into(),
        regular_market_price: Some(dec!(123.45)),
        regular_market_time: Some(1_700_000_000),
        regular_market_change: Some(dec!(1.5)),
        ..Quote::default()
    }
}

#[tokio::test]
async fn refresh_updates_only_symbols_present_in_fetch_result() {
    let pool = common::setup_test_db().await;
    let a = common::seed_position(&pool, "AAPL", "Apple", Some(dec!(10)), Some(dec!(5))).await;
    let b = common::seed_position(&pool, "MSFT", "Microsoft", Some(dec!(3)), Some(dec!(7))).await;

    // The source only knows about AAPL.
    let source = Arc::new(common::FixedSource {
        quotes: vec![quote("AAPL")],
    });
    let service = RefreshService::new(pool.clone(), source, 5, 0);

    let updated = service.refresh_all().await.unwrap();
    assert_eq!(updated, 1);

    let a = position_repo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert_eq!(a.current_price, Some(dec!(123.45)));
    assert_eq!(a.current_change, Some(dec!(1.5)));
    assert!(a.updated_at.is_some());

    let b = position_repo::find_by_id(&pool, b.id).await.unwrap().unwrap();
    assert_eq!(b.current_price, None);
    assert!(b.updated_at.is_none());
}

#[tokio::test]
async fn refresh_stores_post_market_price_when_newer() {
    let pool = common::setup_test_db().await;
    let pos = common::seed_position(&pool, "GOOG", "Alphabet", None, None).await;

    let mut q = quote("GOOG");
    q.post_market_price = Some(dec!(130));
    q.post_market_time = Some(1_700_000_100);
    q.post_market_change = Some(dec!(2.5));

    let source = Arc::new(common::FixedSource { quotes: vec![q] });
    let service = RefreshService::new(pool.clone(), source, 5, 0);
    service.refresh_all().await.unwrap();

    let pos = position_repo::find_by_id(&pool, pos.id).await.unwrap().unwrap();
    assert_eq!(pos.current_price, Some(dec!(130)));
    assert_eq!(pos.current_change, Some(dec!(2.5)));
}

#[tokio::test]
async fn refresh_if_due_runs_once_then_waits_out_the_period() {
    let pool = common::setup_test_db().await;
    common::seed_position(&pool, "AMZN", "Amazon", None, None).await;

    let source = Arc::new(common::FixedSource {
        quotes: vec![quote("AMZN")],
    });
    let service = RefreshService::new(pool.clone(), source, 5, 0);

    // Never updated: the 24h sentinel makes the first check due.
    assert!(service.refresh_if_due().await.unwrap());

    // Freshly updated: well inside the period.
    assert!(!service.refresh_if_due().await.unwrap());
}

#[tokio::test]
async fn concurrent_due_checks_run_one_fetch_cycle() {
    let pool = common::setup_test_db().await;
    common::seed_position(&pool, "ORCL", "Oracle", None, None).await;

    let source = Arc::new(common::CountingSource::new(vec![quote("ORCL")]));
    let service = RefreshService::new(pool.clone(), source.clone(), 5, 0);

    // Both requests find stale data; only the one that wins the lock may
    // fetch, the other must observe the fresh timestamp and skip.
    let (first, second) = tokio::join!(service.refresh_if_due(), service.refresh_if_due());
    let (first, second) = (first.unwrap(), second.unwrap());

    assert!(first != second, "exactly one of the two checks should refresh");
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn failed_fetch_leaves_positions_untouched() {
    let pool = common::setup_test_db().await;
    let pos = common::seed_position(&pool, "META", "Meta", Some(dec!(1)), Some(dec!(300))).await;

    let service = RefreshService::new(pool.clone(), Arc::new(common::FailingSource), 5, 1);

    let updated = service.refresh_all().await.unwrap();
    assert_eq!(updated, 0);

    let pos = position_repo::find_by_id(&pool, pos.id).await.unwrap().unwrap();
    assert_eq!(pos.current_price, None);
    assert!(pos.updated_at.is_none());
}

#[tokio::test]
async fn last_update_sentinel_is_in_the_past() {
    let pool = common::setup_test_db().await;

    let last = position_repo::get_last_update(&pool).await.unwrap();
    let age = chrono::Utc::now() - last;
    assert!(age >= chrono::Duration::hours(23));
}
