//! Mock [`PriceSource`] implementations for testing.
//!
//! - [`ScriptedPriceSource`] — pops pre-loaded results in order.
//!   Best for: trigger timing, retry budget, backoff behaviour.
//! - [`FailingPriceSource`] — always errors.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::Subscription;
use crate::error::FetchError;
use crate::port::PriceSource;

/// A price source that replays a fixed script of results.
///
/// Once the script is exhausted the last result is repeated, or a
/// `FetchError::Request` is returned if the script was empty.
pub struct ScriptedPriceSource {
    script: Mutex<VecDeque<Result<f64, FetchError>>>,
    last: Mutex<Option<Result<f64, FetchError>>>,
    calls: Arc<AtomicU32>,
}

impl ScriptedPriceSource {
    pub fn new(script: Vec<Result<f64, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Script of successful prices.
    pub fn prices(prices: &[f64]) -> Self {
        Self::new(prices.iter().copied().map(Ok).collect())
    }

    /// Number of `fetch` calls so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Shared call counter, readable after the source moved into a worker.
    pub fn call_counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl PriceSource for ScriptedPriceSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch(&self, _subscription: &Subscription) -> Result<f64, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let next = self.script.lock().expect("lock price script").pop_front();
        let mut last = self.last.lock().expect("lock last price");
        match next {
            Some(result) => {
                *last = Some(result.clone());
                result
            }
            None => last
                .clone()
                .unwrap_or_else(|| Err(FetchError::Request("empty script".into()))),
        }
    }
}

/// A price source whose every call fails.
pub struct FailingPriceSource {
    error: FetchError,
    calls: Arc<AtomicU32>,
}

impl FailingPriceSource {
    pub fn new(error: FetchError) -> Self {
        Self {
            error,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for FailingPriceSource {
    fn default() -> Self {
        Self::new(FetchError::Request("connection refused".into()))
    }
}

#[async_trait]
impl PriceSource for FailingPriceSource {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn fetch(&self, _subscription: &Subscription) -> Result<f64, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}
