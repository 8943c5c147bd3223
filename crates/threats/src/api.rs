//! Public API of the threats module.

use std::sync::Arc;

use watchtower_contracts::{Contract, Validator};
use watchtower_core::{ApiError, ApiResult, RiskLevel};
use watchtower_events::EventBus;

use crate::MODULE;
use crate::classifier::ThreatClassifier;
use crate::feed::ThreatFeed;
use crate::model::Threat;
use crate::schema::{risk_level_validator, threat_validator, threats_validator};
use crate::service::ThreatService;

const LOCATION: &str = "threats/api";

const FETCH_ANALYSIS: Contract = Contract::outgoing("fetchThreatAnalysis", LOCATION, MODULE, "client");
const ANALYZE_LEVEL: Contract = Contract::outgoing("analyzeThreatLevel", LOCATION, MODULE, "client");
const GET_DETAILS: Contract = Contract::outgoing("getThreatDetails", LOCATION, MODULE, "client");

/// Operation names exposed by [`ThreatsApi`].
pub const OPERATIONS: &[&str] = &[FETCH_ANALYSIS.action, ANALYZE_LEVEL.action, GET_DETAILS.action];

pub struct ThreatsApi {
    service: ThreatService,
    threat: Validator,
    threats: Validator,
    risk_level: Validator,
}

impl ThreatsApi {
    pub fn new(feed: Arc<dyn ThreatFeed>, classifier: Arc<dyn ThreatClassifier>, bus: EventBus) -> Self {
        Self {
            service: ThreatService::new(feed, classifier, bus),
            threat: threat_validator(),
            threats: threats_validator(),
            risk_level: risk_level_validator(),
        }
    }

    /// All analyzed threats.
    ///
    /// Publishes `threats/analysisLoaded`, plus `threats/newHighRiskThreat`
    /// per high-risk threat.
    pub async fn fetch_threat_analysis(&self) -> ApiResult<Vec<Threat>> {
        let threats = self.service.fetch_analysis().await.map_err(service_error)?;
        Ok(self.threats.validate(threats, &FETCH_ANALYSIS)?)
    }

    /// Risk level of a piece of post content.
    pub async fn analyze_threat_level(&self, content: &str) -> ApiResult<RiskLevel> {
        let content = ApiError::require_non_empty("post content", content)?;
        let level = self.service.analyze(content);
        Ok(self.risk_level.validate(level, &ANALYZE_LEVEL)?)
    }

    pub async fn get_threat_details(&self, threat_id: &str) -> ApiResult<Threat> {
        let threat_id = ApiError::require_non_empty("threat id", threat_id)?;
        let threat = self
            .service
            .details(threat_id)
            .await
            .map_err(service_error)?
            .ok_or_else(|| ApiError::not_found(format!("threat with id {threat_id}")))?;
        Ok(self.threat.validate(threat, &GET_DETAILS)?)
    }
}

impl core::fmt::Debug for ThreatsApi {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ThreatsApi").field("operations", &OPERATIONS).finish()
    }
}

fn service_error(err: anyhow::Error) -> ApiError {
    ApiError::service(format!("{err:#}"))
}
