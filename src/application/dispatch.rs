//! Subscription intake.
//!
//! Validates subscribe requests, starts one [`PriceWatchWorker`] per
//! accepted subscription, and keeps the live workers in an in-memory
//! registry so they can be cancelled individually or all at shutdown.
//! Nothing is persisted.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::watch::{PriceWatchWorker, WatchConfig, WatchHandle, WatchOutcome, WatchState};
use crate::domain::{Subscription, SubscriptionId};
use crate::error::SubscribeError;
use crate::port::{NotificationSink, PriceSource};

/// Acknowledgement returned as soon as a worker has been started.
pub const ACK_MESSAGE: &str = "Got it! We'll notify you on Telegram when the price will drop.";

/// Error text for requests lacking a recipient or a target price.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing phone_number or desired_price";

/// Item watched when the configuration does not name one.
pub const DEFAULT_MODEL_ID: &str = "1226219";

/// Link used when a request does not carry one.
pub const DEFAULT_REFERENCE_URL: &str = "https://www.hashmalabait.co.il/product/%D7%98%D7%9C%D7%95%D7%95%D7%99%D7%96%D7%99%D7%94%2Dsamsung%2Due55du7100%2D4k%2D%E2%80%8F55%2D%E2%80%8F%D7%90%D7%99%D7%A0%D7%98%D7%A9%2D%D7%A1%D7%9E%D7%A1%D7%95%D7%A0%D7%92?aff=Zap&aff_a=1";

/// Raw subscribe request as received from the boundary.
///
/// Prices may arrive as JSON numbers or numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscribeRequest {
    pub phone_number: Option<String>,
    pub desired_price: Option<Value>,
    pub description: Option<String>,
    pub current_price: Option<Value>,
    pub url: Option<String>,
}

/// Successful subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscribeAck {
    pub subscription_id: SubscriptionId,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// JSON response body for the subscribe boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscribeResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
}

impl SubscribeResponse {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}

/// Settings shared by every subscription the dispatcher accepts.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub model_id: String,
    pub default_url: String,
    pub watch: WatchConfig,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            default_url: DEFAULT_REFERENCE_URL.to_string(),
            watch: WatchConfig::default(),
        }
    }
}

/// Starts and tracks price-watch workers.
pub struct SubscriptionDispatcher {
    config: DispatchConfig,
    source: Arc<dyn PriceSource>,
    sink: Arc<dyn NotificationSink>,
    workers: DashMap<SubscriptionId, WatchHandle>,
}

impl SubscriptionDispatcher {
    #[must_use]
    pub fn new(
        config: DispatchConfig,
        source: Arc<dyn PriceSource>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            config,
            source,
            sink,
            workers: DashMap::new(),
        }
    }

    /// Validate `request` and start its worker.
    ///
    /// Returns immediately; the worker runs on its own task. Must be called
    /// from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SubscribeError`] if a required field is missing or a price
    /// is not numeric. No worker is started in that case.
    pub fn subscribe(&self, request: SubscribeRequest) -> Result<SubscribeAck, SubscribeError> {
        let subscription = self.build_subscription(request)?;
        let id = subscription.id;

        info!(
            subscription_id = %id,
            recipient = %subscription.recipient,
            desired_price = subscription.desired_price,
            reference_price = subscription.reference_price,
            "Subscription accepted"
        );

        let handle = PriceWatchWorker::new(
            subscription,
            self.config.watch.clone(),
            Arc::clone(&self.source),
            Arc::clone(&self.sink),
        )
        .spawn();

        self.prune();
        self.workers.insert(id, handle);

        Ok(SubscribeAck {
            subscription_id: id,
            message: ACK_MESSAGE,
        })
    }

    /// Boundary entry point: parse a JSON body and answer with a status
    /// object. An unparseable body is handled like an empty one.
    pub fn handle_json(&self, body: &str) -> SubscribeResponse {
        let request = serde_json::from_str::<SubscribeRequest>(body).unwrap_or_else(|e| {
            debug!(error = %e, "Unparseable subscribe body");
            SubscribeRequest::default()
        });

        match self.subscribe(request) {
            Ok(ack) => SubscribeResponse {
                status: ResponseStatus::Ok,
                message: ack.message.to_string(),
                subscription_id: Some(ack.subscription_id.to_string()),
            },
            Err(err) => SubscribeResponse {
                status: ResponseStatus::Error,
                message: match err {
                    SubscribeError::MissingField { .. } => MISSING_FIELDS_MESSAGE.to_string(),
                    other => other.to_string(),
                },
                subscription_id: None,
            },
        }
    }

    /// Cancel one subscription. Returns `false` if it is unknown or its
    /// worker had already finished.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        match self.workers.remove(&id) {
            Some((_, handle)) => {
                let live = !handle.is_finished();
                handle.cancel();
                info!(subscription_id = %id, live, "Unsubscribed");
                live
            }
            None => false,
        }
    }

    /// Current state of a tracked worker.
    #[must_use]
    pub fn state(&self, id: SubscriptionId) -> Option<WatchState> {
        self.workers.get(&id).map(|h| h.state())
    }

    /// Number of workers still running.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.prune();
        self.workers.len()
    }

    /// Wait for the worker behind `id` to finish, then stop tracking it.
    ///
    /// The worker stays registered while this future is pending, so it can
    /// still be cancelled through [`unsubscribe`](Self::unsubscribe) or
    /// [`shutdown`](Self::shutdown). Returns `None` for unknown ids, for
    /// finished workers that were already pruned, and for workers removed
    /// by another caller in the meantime.
    pub async fn wait(&self, id: SubscriptionId) -> Option<WatchOutcome> {
        let mut state = self.workers.get(&id)?.watch_state();
        // Err means the worker dropped its sender without a terminal state.
        let _ = state.wait_for(WatchState::is_terminal).await;

        let (_, handle) = self.workers.remove(&id)?;
        Some(handle.join().await)
    }

    /// Cancel every tracked worker and wait for all of them.
    pub async fn shutdown(&self) -> Vec<(SubscriptionId, WatchOutcome)> {
        let ids: Vec<SubscriptionId> = self.workers.iter().map(|e| *e.key()).collect();
        let handles: Vec<WatchHandle> = ids
            .into_iter()
            .filter_map(|id| self.workers.remove(&id).map(|(_, h)| h))
            .collect();

        info!(workers = handles.len(), "Shutting down price watches");
        for handle in &handles {
            handle.cancel();
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            let id = handle.id();
            outcomes.push((id, handle.join().await));
        }
        outcomes
    }

    fn prune(&self) {
        self.workers.retain(|_, handle| !handle.is_finished());
    }

    fn build_subscription(&self, request: SubscribeRequest) -> Result<Subscription, SubscribeError> {
        let recipient = request
            .phone_number
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .ok_or(SubscribeError::MissingField {
                field: "phone_number",
            })?;

        let desired_price = match request.desired_price {
            None | Some(Value::Null) => {
                return Err(SubscribeError::MissingField {
                    field: "desired_price",
                })
            }
            Some(value) => parse_price("desired_price", &value)?,
        };

        let reference_price = match request.current_price {
            None | Some(Value::Null) => 0.0,
            Some(value) => parse_price("current_price", &value)?,
        };

        Ok(Subscription {
            id: SubscriptionId::new(),
            model_id: self.config.model_id.clone(),
            recipient,
            desired_price,
            description: request.description.unwrap_or_default(),
            reference_url: request
                .url
                .unwrap_or_else(|| self.config.default_url.clone()),
            reference_price,
        })
    }
}

fn parse_price(field: &'static str, value: &Value) -> Result<f64, SubscribeError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n >= 0.0 => Ok(n),
        Some(_) => Err(SubscribeError::InvalidValue {
            field,
            reason: "must be a non-negative number".to_string(),
        }),
        None => Err(SubscribeError::InvalidValue {
            field,
            reason: "must be numeric".to_string(),
        }),
    }
}
