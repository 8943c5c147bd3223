use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use watchtower_events::{EventBus, Topic};
use watchtower_runtime::{Module, RuntimeConfig};

use crate::MODULE;
use crate::api::{OPERATIONS, SocialApi};
use crate::events;
use crate::feed::{SampleFeed, SocialFeed};

/// Descriptor of the social module.
#[derive(Debug)]
pub struct SocialModule {
    bus: EventBus,
    api: SocialApi,
}

impl SocialModule {
    pub fn new(bus: EventBus, feed: Arc<dyn SocialFeed>) -> Self {
        Self {
            api: SocialApi::new(feed, bus.clone()),
            bus,
        }
    }

    /// Module backed by the bundled sample feed.
    pub fn sample(bus: EventBus, config: &RuntimeConfig) -> Self {
        Self::new(bus, Arc::new(SampleFeed::from_config(config)))
    }

    pub fn api(&self) -> &SocialApi {
        &self.api
    }
}

#[async_trait]
impl Module for SocialModule {
    fn name(&self) -> &'static str {
        MODULE
    }

    fn topics(&self) -> &'static [Topic] {
        events::ALL
    }

    fn operations(&self) -> &'static [&'static str] {
        OPERATIONS
    }

    async fn initialize(&self) -> anyhow::Result<()> {
        info!(module = MODULE, "initializing module");

        // Alerting hook; notifications will attach here.
        self.bus.subscribe(events::NEW_HIGH_RISK_POST, |post| {
            warn!(
                module = MODULE,
                id = post["id"].as_str().unwrap_or("?"),
                platform = post["platform"].as_str().unwrap_or("?"),
                "new high-risk social post detected"
            );
            Ok(())
        });

        Ok(())
    }
}
