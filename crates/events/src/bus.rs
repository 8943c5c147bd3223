//! Synchronous, topic-keyed event bus.
//!
//! ## Delivery model
//!
//! - **Synchronous**: `publish` invokes every handler on the caller's stack and
//!   returns once all of them have been attempted. It never suspends.
//! - **Ordered**: handlers for a topic fire in subscription order.
//! - **Snapshot dispatch**: the handler list is copied when `publish` starts.
//!   Subscribing or unsubscribing from inside a handler only affects later
//!   publishes.
//! - **Isolated failures**: a handler that returns `Err` or panics is recorded
//!   in the [`PublishReport`] and logged; the remaining handlers still run and
//!   the publisher never receives an error.
//! - **No persistence, no replay**: publishing to a topic nobody listens on is
//!   a silent no-op.
//!
//! Payloads are handed to handlers by shared reference; the bus never mutates
//! them.
//!
//! ## Lifetime
//!
//! A bus is an explicitly constructed value. Cloning an `EventBus` shares the
//! same registry, so modules hold clones of the one bus created at startup,
//! while tests build their own isolated instance with [`EventBus::new`].

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, trace};

use crate::report::{HandlerFailure, PublishReport};
use crate::topic::Topic;

/// Event handler.
///
/// Returning `Err` reports a failure for this handler only.
pub type Handler = Arc<dyn Fn(&Value) -> anyhow::Result<()> + Send + Sync>;

/// Identifier of one (topic, handler) registration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl core::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone)]
struct Registration {
    id: SubscriptionId,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    topics: Mutex<HashMap<Topic, Vec<Registration>>>,
    next_id: AtomicU64,
}

impl Registry {
    fn lock(&self) -> MutexGuard<'_, HashMap<Topic, Vec<Registration>>> {
        // Handlers never run under this lock, so a poisoned guard still holds a
        // consistent map.
        self.topics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, topic: Topic, id: SubscriptionId) -> bool {
        let mut topics = self.lock();
        let Some(regs) = topics.get_mut(&topic) else {
            return false;
        };
        let before = regs.len();
        regs.retain(|r| r.id != id);
        let removed = regs.len() != before;
        if regs.is_empty() {
            topics.remove(&topic);
        }
        removed
    }
}

/// Capability returned by [`EventBus::subscribe`].
///
/// Calling [`Subscription::unsubscribe`] removes exactly the registration that
/// produced it; further calls are no-ops. Dropping the capability leaves the
/// registration in place.
#[derive(Debug, Clone)]
pub struct Subscription {
    topic: Topic,
    id: SubscriptionId,
    registry: Weak<Registry>,
}

impl Subscription {
    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.remove(self.topic, self.id) {
                debug!(topic = %self.topic, subscription = %self.id, "unsubscribed");
            }
        }
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let topics = self.lock();
        let mut map = f.debug_map();
        for (topic, regs) in topics.iter() {
            map.entry(topic, &regs.len());
        }
        map.finish()
    }
}

/// In-process publish/subscribe bus.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    registry: Arc<Registry>,
}

impl EventBus {
    /// Create an isolated bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `topic`.
    ///
    /// The same handler may be registered several times; each registration is
    /// independent and has its own [`Subscription`].
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> Subscription
    where
        F: Fn(&Value) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.subscribe_handler(topic, Arc::new(handler))
    }

    /// Register an already shared handler (see [`EventBus::remove_handler`]).
    pub fn subscribe_handler(&self, topic: Topic, handler: Handler) -> Subscription {
        let id = SubscriptionId(self.registry.next_id.fetch_add(1, Ordering::Relaxed));
        self.registry
            .lock()
            .entry(topic)
            .or_default()
            .push(Registration { id, handler });

        debug!(topic = %topic, subscription = %id, "subscribed");
        Subscription {
            topic,
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Remove one registration. No effect if it is not registered.
    pub fn unsubscribe(&self, topic: Topic, id: SubscriptionId) {
        self.registry.remove(topic, id);
    }

    /// Remove every registration of `handler` (compared by identity) on `topic`.
    ///
    /// Returns how many registrations were removed.
    pub fn remove_handler(&self, topic: Topic, handler: &Handler) -> usize {
        let mut topics = self.registry.lock();
        let Some(regs) = topics.get_mut(&topic) else {
            return 0;
        };
        let before = regs.len();
        regs.retain(|r| !Arc::ptr_eq(&r.handler, handler));
        let removed = before - regs.len();
        if regs.is_empty() {
            topics.remove(&topic);
        }
        removed
    }

    /// Deliver `payload` to every handler currently subscribed to `topic`.
    pub fn publish(&self, topic: Topic, payload: &Value) -> PublishReport {
        let snapshot: Vec<Registration> = self
            .registry
            .lock()
            .get(&topic)
            .cloned()
            .unwrap_or_default();

        let mut report = PublishReport::new(topic);
        if snapshot.is_empty() {
            trace!(topic = %topic, "publish with no subscribers");
            return report;
        }

        for reg in snapshot {
            match panic::catch_unwind(AssertUnwindSafe(|| (reg.handler)(payload))) {
                Ok(Ok(())) => report.delivered.push(reg.id),
                Ok(Err(err)) => report.failures.push(failure(topic, reg.id, format!("{err:#}"), false)),
                Err(panic) => report.failures.push(failure(topic, reg.id, panic_message(panic.as_ref()), true)),
            }
        }

        debug!(
            topic = %topic,
            delivered = report.delivered.len(),
            failed = report.failures.len(),
            "published"
        );
        report
    }

    /// Serialize `payload` and publish it.
    pub fn emit<T: Serialize + ?Sized>(&self, topic: Topic, payload: &T) -> Result<PublishReport, serde_json::Error> {
        let value = serde_json::to_value(payload)?;
        Ok(self.publish(topic, &value))
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.registry.lock().get(&topic).map_or(0, Vec::len)
    }

    /// Topics with at least one subscriber, sorted.
    pub fn topics(&self) -> Vec<Topic> {
        let mut topics: Vec<Topic> = self.registry.lock().keys().copied().collect();
        topics.sort();
        topics
    }
}

fn failure(topic: Topic, subscription: SubscriptionId, message: String, panicked: bool) -> HandlerFailure {
    let failure = HandlerFailure {
        topic,
        subscription,
        message,
        panicked,
    };
    error!(
        topic = %topic,
        subscription = %subscription,
        panicked,
        error = %failure.message,
        "event handler failed"
    );
    failure
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const TEST_EVENT: Topic = Topic::new("test/event");

    fn recorder() -> (Arc<Mutex<Vec<Value>>>, impl Fn(&Value) -> anyhow::Result<()> + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |payload: &Value| {
            sink.lock().unwrap().push(payload.clone());
            Ok(())
        })
    }

    #[test]
    fn subscriber_receives_exact_payload_once() {
        let bus = EventBus::new();
        let (seen, handler) = recorder();
        bus.subscribe(Topic::new("social/newHighRiskPost"), handler);

        let payload = json!({ "id": "1", "riskLevel": "high" });
        let report = bus.publish(Topic::new("social/newHighRiskPost"), &payload);

        assert_eq!(*seen.lock().unwrap(), vec![payload]);
        assert_eq!(report.delivered.len(), 1);
        assert!(report.is_clean());
    }

    #[test]
    fn unsubscribe_stops_delivery_and_is_idempotent() {
        let bus = EventBus::new();
        let (seen, handler) = recorder();
        let sub = bus.subscribe(TEST_EVENT, handler);

        bus.publish(TEST_EVENT, &json!({ "foo": "bar" }));
        sub.unsubscribe();
        sub.unsubscribe();
        bus.publish(TEST_EVENT, &json!({ "foo": "bar" }));

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(bus.subscriber_count(TEST_EVENT), 0);
    }

    #[test]
    fn duplicate_registrations_are_tracked_independently() {
        let bus = EventBus::new();
        let (seen, handler) = recorder();
        let handler: Handler = Arc::new(handler);

        let first = bus.subscribe_handler(TEST_EVENT, handler.clone());
        let _second = bus.subscribe_handler(TEST_EVENT, handler.clone());
        assert_ne!(first.id(), _second.id());

        bus.publish(TEST_EVENT, &json!(1));
        assert_eq!(seen.lock().unwrap().len(), 2);

        first.unsubscribe();
        bus.publish(TEST_EVENT, &json!(2));
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn unsubscribe_by_id_removes_only_that_registration() {
        let bus = EventBus::new();
        let (seen, handler) = recorder();
        let handler: Handler = Arc::new(handler);

        let first = bus.subscribe_handler(TEST_EVENT, handler.clone());
        let second = bus.subscribe_handler(TEST_EVENT, handler);

        bus.unsubscribe(TEST_EVENT, first.id());
        assert_eq!(bus.subscriber_count(TEST_EVENT), 1);

        let report = bus.publish(TEST_EVENT, &json!("once"));
        assert_eq!(report.delivered, vec![second.id()]);
        assert_eq!(*seen.lock().unwrap(), vec![json!("once")]);
    }

    #[test]
    fn unsubscribe_by_unknown_id_changes_nothing() {
        let bus = EventBus::new();
        let (seen, handler) = recorder();
        let sub = bus.subscribe(TEST_EVENT, handler);

        bus.unsubscribe(TEST_EVENT, SubscriptionId(u64::MAX));
        bus.unsubscribe(Topic::new("test/other"), sub.id());

        assert_eq!(bus.subscriber_count(TEST_EVENT), 1);
        bus.publish(TEST_EVENT, &json!(1));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn remove_handler_drops_every_registration_of_that_handler() {
        let bus = EventBus::new();
        let (_, handler) = recorder();
        let handler: Handler = Arc::new(handler);
        let (_, other) = recorder();

        bus.subscribe_handler(TEST_EVENT, handler.clone());
        bus.subscribe_handler(TEST_EVENT, handler.clone());
        bus.subscribe(TEST_EVENT, other);

        assert_eq!(bus.remove_handler(TEST_EVENT, &handler), 2);
        assert_eq!(bus.subscriber_count(TEST_EVENT), 1);
        assert_eq!(bus.remove_handler(TEST_EVENT, &handler), 0);
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::new();
        let report = bus.publish(Topic::new("nobody/listens"), &json!({}));
        assert_eq!(report.attempted(), 0);
        assert!(bus.topics().is_empty());
    }

    #[test]
    fn failing_handlers_do_not_stop_siblings() {
        let bus = EventBus::new();
        let (seen, last) = recorder();

        bus.subscribe(TEST_EVENT, |_| Err(anyhow::anyhow!("refused")));
        bus.subscribe(TEST_EVENT, |_| panic!("boom"));
        bus.subscribe(TEST_EVENT, last);

        let report = bus.publish(TEST_EVENT, &json!("payload"));

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(report.delivered.len(), 1);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].message, "refused");
        assert!(!report.failures[0].panicked);
        assert_eq!(report.failures[1].message, "boom");
        assert!(report.failures[1].panicked);
    }

    #[test]
    fn unsubscribing_during_dispatch_does_not_affect_current_pass() {
        let bus = EventBus::new();
        let (seen, second) = recorder();

        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let victim_ref = victim.clone();
        bus.subscribe(TEST_EVENT, move |_| {
            if let Some(sub) = victim_ref.lock().unwrap().as_ref() {
                sub.unsubscribe();
            }
            Ok(())
        });
        let sub = bus.subscribe(TEST_EVENT, second);
        *victim.lock().unwrap() = Some(sub);

        bus.publish(TEST_EVENT, &json!(1));
        assert_eq!(seen.lock().unwrap().len(), 1);

        bus.publish(TEST_EVENT, &json!(2));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn subscribing_during_dispatch_takes_effect_next_publish() {
        let bus = EventBus::new();
        let (seen, late) = recorder();
        let late: Handler = Arc::new(late);

        let inner_bus = bus.clone();
        bus.subscribe(TEST_EVENT, move |_| {
            inner_bus.subscribe_handler(TEST_EVENT, late.clone());
            Ok(())
        });

        bus.publish(TEST_EVENT, &json!(1));
        assert!(seen.lock().unwrap().is_empty());

        bus.publish(TEST_EVENT, &json!(2));
        assert_eq!(*seen.lock().unwrap(), vec![json!(2)]);
    }

    #[test]
    fn separate_instances_share_nothing() {
        let a = EventBus::new();
        let b = EventBus::new();
        let (seen, handler) = recorder();
        a.subscribe(TEST_EVENT, handler);

        b.publish(TEST_EVENT, &json!(1));
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(b.subscriber_count(TEST_EVENT), 0);
    }

    #[test]
    fn emit_serializes_typed_payloads() {
        #[derive(Serialize)]
        struct Alert<'a> {
            id: &'a str,
        }

        let bus = EventBus::new();
        let (seen, handler) = recorder();
        bus.subscribe(TEST_EVENT, handler);

        bus.emit(TEST_EVENT, &Alert { id: "7" }).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![json!({ "id": "7" })]);
    }

    #[test]
    fn capability_outliving_bus_is_harmless() {
        let sub = {
            let bus = EventBus::new();
            bus.subscribe(TEST_EVENT, |_| Ok(()))
        };
        sub.unsubscribe();
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: N handlers fire exactly once each, in subscription order.
        #[test]
        fn handlers_fire_in_subscription_order(n in 1usize..16, value in any::<i64>()) {
            let bus = EventBus::new();
            let order = Arc::new(Mutex::new(Vec::new()));

            for i in 0..n {
                let order = order.clone();
                bus.subscribe(TEST_EVENT, move |payload| {
                    order.lock().unwrap().push((i, payload.clone()));
                    Ok(())
                });
            }

            let report = bus.publish(TEST_EVENT, &json!(value));
            let got = order.lock().unwrap().clone();

            prop_assert_eq!(report.delivered.len(), n);
            prop_assert_eq!(got.len(), n);
            for (pos, (idx, payload)) in got.into_iter().enumerate() {
                prop_assert_eq!(pos, idx);
                prop_assert_eq!(payload, json!(value));
            }
        }
    }
}
