//! Internal service layer of the threats module.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};
use watchtower_core::RiskLevel;
use watchtower_events::{EventBus, Topic};

use crate::classifier::ThreatClassifier;
use crate::events;
use crate::feed::ThreatFeed;
use crate::model::Threat;

pub(crate) struct ThreatService {
    feed: Arc<dyn ThreatFeed>,
    classifier: Arc<dyn ThreatClassifier>,
    bus: EventBus,
}

impl ThreatService {
    pub(crate) fn new(feed: Arc<dyn ThreatFeed>, classifier: Arc<dyn ThreatClassifier>, bus: EventBus) -> Self {
        Self { feed, classifier, bus }
    }

    pub(crate) async fn fetch_analysis(&self) -> anyhow::Result<Vec<Threat>> {
        debug!("fetching threat analysis");
        let threats = self.load().await?;

        self.announce(events::ANALYSIS_LOADED, &threats);
        for threat in threats.iter().filter(|t| t.risk_level.is_high()) {
            self.announce(events::NEW_HIGH_RISK_THREAT, threat);
        }
        Ok(threats)
    }

    pub(crate) fn analyze(&self, content: &str) -> RiskLevel {
        let level = self.classifier.classify(content);
        debug!(%level, "analyzed content");
        level
    }

    pub(crate) async fn details(&self, threat_id: &str) -> anyhow::Result<Option<Threat>> {
        debug!(threat_id, "fetching threat details");
        let threats = self.feed.threats().await?;
        Ok(threats.into_iter().find(|t| t.id == threat_id))
    }

    async fn load(&self) -> anyhow::Result<Vec<Threat>> {
        match self.feed.threats().await {
            Ok(threats) => Ok(threats),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "threat feed failed");
                self.bus
                    .publish(events::ANALYSIS_ERROR, &json!({ "error": format!("{err:#}") }));
                Err(err)
            }
        }
    }

    fn announce<T: serde::Serialize + ?Sized>(&self, topic: Topic, payload: &T) {
        if let Err(err) = self.bus.emit(topic, payload) {
            warn!(topic = %topic, error = %err, "could not serialize event payload");
        }
    }
}
