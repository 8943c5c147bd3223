//! In-process, topic-keyed publish/subscribe.
//!
//! Feature modules never call each other directly; they announce domain
//! events on an [`EventBus`] and react to the topics other modules own.

pub mod bus;
pub mod report;
pub mod topic;

pub use bus::{EventBus, Handler, Subscription, SubscriptionId};
pub use report::{HandlerFailure, PublishReport};
pub use topic::Topic;
