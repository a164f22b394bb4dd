//! Notification sink integration tests.

use std::sync::Arc;

use pricewatch::adapter::outbound::notifier::telegram::notifier::{TelegramConfig, TelegramSink};
use pricewatch::application::watch::{PriceWatchWorker, WatchOutcome};
use pricewatch::domain::NotificationMessage;
use pricewatch::error::DeliveryError;
use pricewatch::port::NotificationSink;
use pricewatch::testkit::config::fast_watch_config;
use pricewatch::testkit::domain::subscription;
use pricewatch::testkit::notifier::RecordingTransport;
use pricewatch::testkit::price::ScriptedPriceSource;
use serde_json::json;

fn credentials() -> TelegramConfig {
    TelegramConfig {
        bot_token: "42:token".into(),
        chat_id: "@price_alerts".into(),
    }
}

#[tokio::test]
async fn unconfigured_sink_makes_no_external_call() {
    let transport = RecordingTransport::new();
    let sink = TelegramSink::with_transport(None, Arc::new(transport.clone()));

    let message = NotificationMessage::price_drop(&subscription(1000.0), 900.0);
    for _ in 0..3 {
        assert_eq!(sink.deliver(&message).await, Ok(()));
    }

    assert_eq!(transport.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn triggered_worker_posts_one_telegram_message() {
    let transport = RecordingTransport::new();
    let sink = TelegramSink::with_transport(Some(credentials()), Arc::new(transport.clone()));
    let source = Arc::new(ScriptedPriceSource::prices(&[1100.0, 980.0]));

    let outcome = PriceWatchWorker::new(
        subscription(1000.0),
        fast_watch_config(),
        source,
        Arc::new(sink),
    )
    .spawn()
    .join()
    .await;

    assert!(matches!(outcome, WatchOutcome::Triggered { polls: 2, .. }));
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url,
        "https://api.telegram.org/bot42:token/sendMessage"
    );
    assert_eq!(requests[0].body["chat_id"], json!("@price_alerts"));
    let text = requests[0].body["text"].as_str().unwrap();
    assert!(text.starts_with("🚨 Price Drop Alert!"));
    assert!(text.contains("New Price Alert: ₪980.00"));
}

#[tokio::test(start_paused = true)]
async fn transport_failure_does_not_change_outcome() {
    let transport = RecordingTransport::failing(DeliveryError::Transport("dns".into()));
    let sink = TelegramSink::with_transport(Some(credentials()), Arc::new(transport.clone()));
    let source = Arc::new(ScriptedPriceSource::prices(&[700.0]));

    let outcome = PriceWatchWorker::new(
        subscription(1000.0),
        fast_watch_config(),
        source,
        Arc::new(sink),
    )
    .spawn()
    .join()
    .await;

    assert_eq!(
        outcome,
        WatchOutcome::Triggered {
            price: 700.0,
            polls: 1
        }
    );
    assert_eq!(transport.calls(), 1);
}
