//! Watch worker, its settings, states and control handle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::backoff::Backoff;
use crate::domain::{NotificationMessage, Subscription, SubscriptionId};
use crate::error::FetchError;
use crate::port::{NotificationSink, PriceSource};

/// Polling cadence and retry policy for a watch worker.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Wait between successful polls.
    pub poll_interval: Duration,
    /// Consecutive fetch failures tolerated before the worker gives up.
    pub max_consecutive_failures: u32,
    /// First backoff delay after a failed fetch.
    pub initial_backoff: Duration,
    /// Upper bound for the backoff delay.
    pub max_backoff: Duration,
    /// Growth factor applied to the backoff delay after each failure.
    pub backoff_multiplier: f64,
    /// Successful polls allowed without a trigger before the worker expires.
    pub max_polls: Option<u32>,
    /// Add random jitter to backoff delays.
    pub jitter: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            max_consecutive_failures: 5,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            max_polls: None,
            jitter: true,
        }
    }
}

impl WatchConfig {
    fn backoff(&self) -> Backoff {
        let backoff = Backoff::new(
            self.initial_backoff,
            self.max_backoff,
            self.backoff_multiplier,
        );
        if self.jitter {
            backoff
        } else {
            backoff.without_jitter()
        }
    }
}

/// Lifecycle state of a watch worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Created, not yet started.
    Scheduled,
    /// Waiting, fetching and comparing.
    Polling,
    /// Target met; the alert was handed to the sink.
    Triggered,
    /// Stopped by an external signal. No alert sent.
    Cancelled,
    /// Gave up. No alert sent.
    Failed,
}

impl WatchState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Triggered | Self::Cancelled | Self::Failed)
    }
}

/// Why a worker ended in [`WatchState::Failed`].
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// Too many consecutive fetch failures.
    FetchBudgetExhausted { attempts: u32, last_error: FetchError },
    /// `max_polls` successful polls without meeting the target.
    PollLimitReached { polls: u32 },
    /// The worker task panicked or was aborted.
    Aborted(String),
}

/// Terminal result of a watch worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchOutcome {
    Triggered { price: f64, polls: u32 },
    Cancelled { polls: u32 },
    Failed(FailureReason),
}

impl WatchOutcome {
    /// The terminal state this outcome corresponds to.
    #[must_use]
    pub fn state(&self) -> WatchState {
        match self {
            Self::Triggered { .. } => WatchState::Triggered,
            Self::Cancelled { .. } => WatchState::Cancelled,
            Self::Failed(_) => WatchState::Failed,
        }
    }
}

/// Polls a live price for one subscription and alerts once on a match.
pub struct PriceWatchWorker {
    subscription: Subscription,
    config: WatchConfig,
    source: Arc<dyn PriceSource>,
    sink: Arc<dyn NotificationSink>,
    state: watch::Sender<WatchState>,
}

impl PriceWatchWorker {
    /// Create a worker in the `Scheduled` state.
    #[must_use]
    pub fn new(
        subscription: Subscription,
        config: WatchConfig,
        source: Arc<dyn PriceSource>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let (state, _) = watch::channel(WatchState::Scheduled);
        Self {
            subscription,
            config,
            source,
            sink,
            state,
        }
    }

    #[must_use]
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    #[must_use]
    pub fn state(&self) -> WatchState {
        *self.state.borrow()
    }

    /// Start the worker on its own task and return a control handle.
    #[must_use]
    pub fn spawn(self) -> WatchHandle {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let state_rx = self.state.subscribe();
        let id = self.subscription.id;
        let join = tokio::spawn(self.run(cancel_rx));

        WatchHandle {
            id,
            cancel: cancel_tx,
            state: state_rx,
            join,
        }
    }

    /// Run the polling loop to completion on the current task.
    ///
    /// Setting the value behind `cancel` to `true` stops the worker. If the
    /// sender is dropped the worker keeps running until it triggers or fails.
    pub async fn run(self, mut cancel: watch::Receiver<bool>) -> WatchOutcome {
        let sub = &self.subscription;
        self.state.send_replace(WatchState::Polling);
        info!(
            subscription_id = %sub.id,
            model_id = %sub.model_id,
            desired_price = sub.desired_price,
            source = self.source.name(),
            "Price watch started"
        );

        let mut backoff = self.config.backoff();
        let mut failures = 0u32;
        let mut polls = 0u32;
        let mut delay = self.config.poll_interval;

        loop {
            if wait_or_cancel(delay, &mut cancel).await {
                return self.finish(WatchOutcome::Cancelled { polls });
            }

            let fetched = tokio::select! {
                biased;
                () = cancelled(&mut cancel) => {
                    return self.finish(WatchOutcome::Cancelled { polls });
                }
                result = self.source.fetch(sub) => result.and_then(checked_price),
            };

            match fetched {
                Ok(price) => {
                    failures = 0;
                    backoff.reset();
                    polls += 1;
                    debug!(subscription_id = %sub.id, price, polls, "Price polled");

                    if sub.is_met_by(price) {
                        if *cancel.borrow() {
                            return self.finish(WatchOutcome::Cancelled { polls });
                        }
                        return self.trigger(price, polls).await;
                    }

                    if self.config.max_polls.is_some_and(|max| polls >= max) {
                        return self.finish(WatchOutcome::Failed(
                            FailureReason::PollLimitReached { polls },
                        ));
                    }
                    delay = self.config.poll_interval;
                }
                Err(err) => {
                    failures += 1;
                    warn!(
                        subscription_id = %sub.id,
                        error = %err,
                        failures,
                        budget = self.config.max_consecutive_failures,
                        "Price fetch failed"
                    );

                    if failures >= self.config.max_consecutive_failures {
                        return self.finish(WatchOutcome::Failed(
                            FailureReason::FetchBudgetExhausted {
                                attempts: failures,
                                last_error: err,
                            },
                        ));
                    }
                    delay = backoff.next_delay();
                }
            }
        }
    }

    async fn trigger(&self, price: f64, polls: u32) -> WatchOutcome {
        let message = NotificationMessage::price_drop(&self.subscription, price);
        let outcome = self.finish(WatchOutcome::Triggered { price, polls });

        if let Err(err) = self.sink.deliver(&message).await {
            warn!(
                subscription_id = %self.subscription.id,
                error = %err,
                "Alert delivery failed"
            );
        }
        outcome
    }

    fn finish(&self, outcome: WatchOutcome) -> WatchOutcome {
        self.state.send_replace(outcome.state());
        match &outcome {
            WatchOutcome::Triggered { price, polls } => info!(
                subscription_id = %self.subscription.id,
                price,
                polls,
                "Price target met"
            ),
            WatchOutcome::Cancelled { polls } => info!(
                subscription_id = %self.subscription.id,
                polls,
                "Price watch cancelled"
            ),
            WatchOutcome::Failed(reason) => warn!(
                subscription_id = %self.subscription.id,
                reason = ?reason,
                "Price watch failed"
            ),
        }
        outcome
    }
}

/// Control handle for a spawned [`PriceWatchWorker`].
pub struct WatchHandle {
    id: SubscriptionId,
    cancel: watch::Sender<bool>,
    state: watch::Receiver<WatchState>,
    join: JoinHandle<WatchOutcome>,
}

impl WatchHandle {
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Ask the worker to stop. Takes effect at the worker's next wait or
    /// fetch, and never after an alert was already handed off.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    #[must_use]
    pub fn state(&self) -> WatchState {
        *self.state.borrow()
    }

    /// Receiver that observes every state transition.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<WatchState> {
        self.state.clone()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the worker to finish.
    pub async fn join(self) -> WatchOutcome {
        match self.join.await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(subscription_id = %self.id, error = %err, "Price watch task aborted");
                WatchOutcome::Failed(FailureReason::Aborted(err.to_string()))
            }
        }
    }
}

/// Reject prices a well-behaved source should never return.
fn checked_price(price: f64) -> Result<f64, FetchError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(FetchError::Malformed(format!("unusable price {price}")))
    }
}

/// Resolves once cancellation is requested; never resolves if the sender
/// is gone.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|c| *c).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Sleep for `delay`; returns `true` if cancelled first.
async fn wait_or_cancel(delay: Duration, cancel: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        biased;
        () = cancelled(cancel) => true,
        () = sleep(delay) => false,
    }
}
