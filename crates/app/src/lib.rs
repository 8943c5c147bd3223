//! Bootstrap wiring for the operator dashboard's module layer.
//!
//! One [`EventBus`] is created per process and handed to every module; the
//! modules are registered and brought to ready together by [`Dashboard::start`].

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use watchtower_events::EventBus;
use watchtower_runtime::{ModuleRegistry, RuntimeConfig};
use watchtower_social::SocialModule;
use watchtower_threats::ThreatsModule;

#[derive(Debug)]
pub struct Dashboard {
    bus: EventBus,
    registry: ModuleRegistry,
    social: Arc<SocialModule>,
    threats: Arc<ThreatsModule>,
}

impl Dashboard {
    /// Build every module on a fresh bus and register them.
    pub fn new(config: &RuntimeConfig) -> anyhow::Result<Self> {
        let bus = EventBus::new();
        let social = Arc::new(SocialModule::sample(bus.clone(), config));
        let threats = Arc::new(ThreatsModule::sample(bus.clone(), config));

        let mut registry = ModuleRegistry::new();
        registry.register(social.clone()).context("registering social module")?;
        registry.register(threats.clone()).context("registering threats module")?;

        Ok(Self {
            bus,
            registry,
            social,
            threats,
        })
    }

    /// Initialize all modules. Call once, before serving anything that
    /// depends on module readiness.
    pub async fn start(&self) -> anyhow::Result<()> {
        let ready = self
            .registry
            .initialize_all()
            .await
            .context("module initialization failed")?;
        anyhow::ensure!(ready, "modules did not report ready");

        info!(modules = ?self.registry.names(), "dashboard ready");
        Ok(())
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn social(&self) -> &SocialModule {
        &self.social
    }

    pub fn threats(&self) -> &ThreatsModule {
        &self.threats
    }
}
