//! Outcome of a single `publish` call.

use thiserror::Error;

use crate::bus::SubscriptionId;
use crate::topic::Topic;

/// A subscriber failed while handling an event.
///
/// Failures are isolated per handler: siblings still run and the publisher
/// never sees an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("handler {subscription} on {topic} failed: {message}")]
pub struct HandlerFailure {
    pub topic: Topic,
    pub subscription: SubscriptionId,
    pub message: String,
    /// `true` when the handler panicked rather than returning an error.
    pub panicked: bool,
}

/// What happened during one dispatch pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub topic: Topic,
    /// Subscriptions that handled the event successfully, in dispatch order.
    pub delivered: Vec<SubscriptionId>,
    pub failures: Vec<HandlerFailure>,
}

impl PublishReport {
    pub(crate) fn new(topic: Topic) -> Self {
        Self {
            topic,
            delivered: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Number of handlers that were invoked (successful or not).
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
