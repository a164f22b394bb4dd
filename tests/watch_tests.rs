//! Price-watch worker integration tests.
//!
//! Time is paused, so polling intervals and backoff delays elapse
//! instantly while keeping their ordering.

use std::sync::Arc;
use std::time::Duration;

use pricewatch::application::watch::{
    FailureReason, PriceWatchWorker, WatchConfig, WatchOutcome, WatchState,
};
use pricewatch::error::{DeliveryError, FetchError};
use pricewatch::testkit::config::fast_watch_config;
use pricewatch::testkit::domain::subscription;
use pricewatch::testkit::notifier::RecordingSink;
use pricewatch::testkit::price::{FailingPriceSource, ScriptedPriceSource};

fn worker(
    desired: f64,
    config: WatchConfig,
    source: Arc<ScriptedPriceSource>,
    sink: &RecordingSink,
) -> PriceWatchWorker {
    PriceWatchWorker::new(
        subscription(desired),
        config,
        source,
        Arc::new(sink.clone()),
    )
}

#[tokio::test(start_paused = true)]
async fn triggers_on_third_poll_with_one_alert() {
    let source = Arc::new(ScriptedPriceSource::prices(&[1200.0, 1100.0, 950.0]));
    let sink = RecordingSink::new();

    let handle = worker(1000.0, fast_watch_config(), Arc::clone(&source), &sink).spawn();
    let outcome = handle.join().await;

    assert_eq!(
        outcome,
        WatchOutcome::Triggered {
            price: 950.0,
            polls: 3
        }
    );
    assert_eq!(source.calls(), 3);

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].observed_price, 950.0);
    assert!(messages[0].text.contains("950.00"));
}

#[tokio::test(start_paused = true)]
async fn price_equal_to_target_triggers() {
    let source = Arc::new(ScriptedPriceSource::prices(&[1000.0]));
    let sink = RecordingSink::new();

    let outcome = worker(1000.0, fast_watch_config(), source, &sink)
        .spawn()
        .join()
        .await;

    assert!(matches!(outcome, WatchOutcome::Triggered { polls: 1, .. }));
    assert_eq!(sink.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn always_failing_source_exhausts_budget_without_alert() {
    let source = Arc::new(FailingPriceSource::new(FetchError::Status(503)));
    let sink = RecordingSink::new();
    let config = fast_watch_config();
    let budget = config.max_consecutive_failures;

    let worker = PriceWatchWorker::new(
        subscription(1000.0),
        config,
        source.clone(),
        Arc::new(sink.clone()),
    );
    let outcome = worker.spawn().join().await;

    assert_eq!(
        outcome,
        WatchOutcome::Failed(FailureReason::FetchBudgetExhausted {
            attempts: budget,
            last_error: FetchError::Status(503),
        })
    );
    assert_eq!(source.calls(), budget);
    assert!(sink.is_empty());
}

#[tokio::test(start_paused = true)]
async fn successful_fetch_resets_failure_budget() {
    // Budget is 3: two failures, a miss, then two more failures must not fail.
    let source = Arc::new(ScriptedPriceSource::new(vec![
        Err(FetchError::Request("timeout".into())),
        Err(FetchError::Request("timeout".into())),
        Ok(1500.0),
        Err(FetchError::Status(500)),
        Err(FetchError::Status(500)),
        Ok(900.0),
    ]));
    let sink = RecordingSink::new();

    let outcome = worker(1000.0, fast_watch_config(), Arc::clone(&source), &sink)
        .spawn()
        .join()
        .await;

    assert_eq!(
        outcome,
        WatchOutcome::Triggered {
            price: 900.0,
            polls: 2
        }
    );
    assert_eq!(source.calls(), 6);
    assert_eq!(sink.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn failures_back_off_exponentially() {
    let source = Arc::new(FailingPriceSource::default());
    let sink = RecordingSink::new();
    let config = WatchConfig {
        max_consecutive_failures: 4,
        ..fast_watch_config()
    };

    let started = tokio::time::Instant::now();
    let worker = PriceWatchWorker::new(
        subscription(1000.0),
        config,
        source.clone(),
        Arc::new(sink.clone()),
    );
    worker.spawn().join().await;

    // 1s first poll, then 100ms, 200ms and 400ms backoff before the retries.
    assert_eq!(started.elapsed(), Duration::from_millis(1700));
    assert_eq!(source.calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn cancel_before_trigger_sends_nothing() {
    let source = Arc::new(ScriptedPriceSource::prices(&[1200.0]));
    let sink = RecordingSink::new();

    let handle = worker(1000.0, fast_watch_config(), Arc::clone(&source), &sink).spawn();
    tokio::time::sleep(Duration::from_millis(3500)).await;
    assert_eq!(handle.state(), WatchState::Polling);

    handle.cancel();
    let outcome = handle.join().await;

    assert_eq!(outcome, WatchOutcome::Cancelled { polls: 3 });
    assert!(sink.is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancel_before_first_poll_skips_fetch() {
    let source = Arc::new(ScriptedPriceSource::prices(&[900.0]));
    let sink = RecordingSink::new();

    let handle = worker(1000.0, fast_watch_config(), Arc::clone(&source), &sink).spawn();
    handle.cancel();

    assert_eq!(handle.join().await, WatchOutcome::Cancelled { polls: 0 });
    assert_eq!(source.calls(), 0);
    assert!(sink.is_empty());
}

#[tokio::test(start_paused = true)]
async fn sink_failure_keeps_triggered_outcome() {
    let source = Arc::new(ScriptedPriceSource::prices(&[800.0]));
    let sink = RecordingSink::failing(DeliveryError::Status(502));

    let handle = worker(1000.0, fast_watch_config(), source, &sink).spawn();
    let mut state = handle.watch_state();
    let outcome = handle.join().await;

    assert!(matches!(outcome, WatchOutcome::Triggered { price, .. } if price == 800.0));
    assert_eq!(*state.borrow_and_update(), WatchState::Triggered);
    assert_eq!(sink.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn poll_limit_expires_worker() {
    let source = Arc::new(ScriptedPriceSource::prices(&[1500.0]));
    let sink = RecordingSink::new();
    let config = WatchConfig {
        max_polls: Some(4),
        ..fast_watch_config()
    };

    let outcome = worker(1000.0, config, Arc::clone(&source), &sink)
        .spawn()
        .join()
        .await;

    assert_eq!(
        outcome,
        WatchOutcome::Failed(FailureReason::PollLimitReached { polls: 4 })
    );
    assert_eq!(source.calls(), 4);
    assert!(sink.is_empty());
}

#[tokio::test(start_paused = true)]
async fn unusable_prices_count_as_failures() {
    let source = Arc::new(ScriptedPriceSource::prices(&[f64::NAN]));
    let sink = RecordingSink::new();

    let outcome = worker(1000.0, fast_watch_config(), source, &sink)
        .spawn()
        .join()
        .await;

    assert!(matches!(
        outcome,
        WatchOutcome::Failed(FailureReason::FetchBudgetExhausted {
            last_error: FetchError::Malformed(_),
            ..
        })
    ));
    assert!(sink.is_empty());
}

#[tokio::test(start_paused = true)]
async fn run_inline_reports_state_transitions() {
    let source = Arc::new(ScriptedPriceSource::prices(&[1100.0, 990.0]));
    let sink = RecordingSink::new();
    let worker = worker(1000.0, fast_watch_config(), source, &sink);
    assert_eq!(worker.state(), WatchState::Scheduled);

    let (_cancel_tx, cancel_rx) = tokio::sync::watch::channel(false);
    let outcome = worker.run(cancel_rx).await;

    assert_eq!(outcome.state(), WatchState::Triggered);
}

#[tokio::test(start_paused = true)]
async fn oversized_backoff_multiplier_still_exhausts_budget() {
    let source = Arc::new(FailingPriceSource::new(FetchError::Status(503)));
    let sink = RecordingSink::new();
    let config = WatchConfig {
        backoff_multiplier: 1e30,
        ..fast_watch_config()
    };
    let budget = config.max_consecutive_failures;

    let handle = PriceWatchWorker::new(
        subscription(1000.0),
        config,
        source.clone(),
        Arc::new(sink.clone()),
    )
    .spawn();
    let state = handle.watch_state();
    let outcome = handle.join().await;

    assert_eq!(
        outcome,
        WatchOutcome::Failed(FailureReason::FetchBudgetExhausted {
            attempts: budget,
            last_error: FetchError::Status(503),
        })
    );
    assert_eq!(*state.borrow(), WatchState::Failed);
    assert_eq!(source.calls(), budget);
    assert!(sink.is_empty());
}
