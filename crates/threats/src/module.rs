use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use watchtower_contracts::Contract;
use watchtower_events::{EventBus, Topic};
use watchtower_runtime::{Module, RuntimeConfig};
use watchtower_social::SocialPost;
use watchtower_social::events as social_events;
use watchtower_social::schema::social_post_validator;

use crate::MODULE;
use crate::api::{OPERATIONS, ThreatsApi};
use crate::classifier::{KeywordClassifier, ThreatClassifier};
use crate::events;
use crate::feed::{SampleThreatFeed, ThreatFeed};

const HIGH_RISK_POST_IN: Contract =
    Contract::incoming("onNewHighRiskPost", "threats/module", watchtower_social::MODULE, MODULE);

/// Descriptor of the threats module.
#[derive(Debug)]
pub struct ThreatsModule {
    bus: EventBus,
    api: ThreatsApi,
}

impl ThreatsModule {
    pub fn new(bus: EventBus, feed: Arc<dyn ThreatFeed>, classifier: Arc<dyn ThreatClassifier>) -> Self {
        Self {
            api: ThreatsApi::new(feed, classifier, bus.clone()),
            bus,
        }
    }

    /// Module backed by the bundled sample feed and keyword classifier.
    pub fn sample(bus: EventBus, config: &RuntimeConfig) -> Self {
        Self::new(
            bus,
            Arc::new(SampleThreatFeed::from_config(config)),
            Arc::new(KeywordClassifier),
        )
    }

    pub fn api(&self) -> &ThreatsApi {
        &self.api
    }
}

#[async_trait]
impl Module for ThreatsModule {
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

        self.bus.subscribe(events::NEW_HIGH_RISK_THREAT, |threat| {
            warn!(
                module = MODULE,
                id = threat["id"].as_str().unwrap_or("?"),
                title = threat["title"].as_str().unwrap_or("?"),
                "new high-risk threat detected"
            );
            Ok(())
        });

        // Posts cross into this module here, so they are checked like any
        // other incoming contract.
        let posts = social_post_validator();
        self.bus.subscribe(social_events::NEW_HIGH_RISK_POST, move |payload| {
            let post: SocialPost = posts.decode(payload.clone(), &HIGH_RISK_POST_IN)?;
            info!(
                module = MODULE,
                post = %post.id,
                location = post.location.as_deref().unwrap_or("unknown"),
                "high-risk post queued for threat correlation"
            );
            Ok(())
        });

        Ok(())
    }
}
