//! Recording sink and transport for notification assertions.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::adapter::outbound::notifier::telegram::transport::MessageTransport;
use crate::domain::NotificationMessage;
use crate::error::DeliveryError;
use crate::port::NotificationSink;

/// Thread-safe message collector implementing [`NotificationSink`].
///
/// Optionally fails every delivery after recording it.
#[derive(Clone, Default)]
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<NotificationMessage>>>,
    fail_with: Option<DeliveryError>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that records each message and then reports `error`.
    pub fn failing(error: DeliveryError) -> Self {
        Self {
            messages: Arc::default(),
            fail_with: Some(error),
        }
    }

    pub fn len(&self) -> usize {
        self.messages.lock().expect("lock sink messages").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn messages(&self) -> Vec<NotificationMessage> {
        self.messages.lock().expect("lock sink messages").clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), DeliveryError> {
        self.messages
            .lock()
            .expect("lock sink messages")
            .push(message.clone());
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// A posted request captured by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct PostedRequest {
    pub url: String,
    pub body: Value,
}

/// Transport that records every call and returns a fixed result.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<PostedRequest>>>,
    fail_with: Option<DeliveryError>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: DeliveryError) -> Self {
        Self {
            requests: Arc::default(),
            fail_with: Some(error),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().expect("lock transport requests").len()
    }

    pub fn requests(&self) -> Vec<PostedRequest> {
        self.requests.lock().expect("lock transport requests").clone()
    }
}

#[async_trait]
impl MessageTransport for RecordingTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<(), DeliveryError> {
        self.requests
            .lock()
            .expect("lock transport requests")
            .push(PostedRequest {
                url: url.to_string(),
                body: body.clone(),
            });
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
