//! The set of modules known to the process.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};
use watchtower_events::Topic;

use crate::module::Module;
use crate::orchestrator::{OrchestratorError, initialize_all};

/// Registered modules, in registration order.
///
/// Initialization is single-shot: modules never unregister their handlers, so
/// a second pass would double every subscription.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
    initialized: AtomicBool,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module, rejecting duplicate names and topics already owned by
    /// another module.
    pub fn register(&mut self, module: Arc<dyn Module>) -> Result<(), OrchestratorError> {
        let name = module.name();
        if self.modules.iter().any(|m| m.name() == name) {
            return Err(OrchestratorError::DuplicateModule(name));
        }

        let owned = self.topics();
        for topic in module.topics() {
            if let Some(&owner) = owned.get(topic) {
                return Err(OrchestratorError::TopicCollision {
                    topic: topic.as_str(),
                    owner,
                    claimant: name,
                });
            }
            if topic.module() != Some(name) {
                warn!(module = name, topic = %topic, "topic is not namespaced by its owning module");
            }
        }

        info!(module = name, topics = module.topics().len(), "module registered");
        self.modules.push(module);
        Ok(())
    }

    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Every owned topic mapped to its owning module.
    pub fn topics(&self) -> BTreeMap<Topic, &'static str> {
        self.modules
            .iter()
            .flat_map(|m| m.topics().iter().map(move |t| (*t, m.name())))
            .collect()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Initialize every registered module concurrently; see [`initialize_all`].
    ///
    /// A second call fails with [`OrchestratorError::AlreadyInitialized`]
    /// without touching any module, whatever the outcome of the first call.
    pub async fn initialize_all(&self) -> Result<bool, OrchestratorError> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Err(OrchestratorError::AlreadyInitialized);
        }
        initialize_all(&self.modules).await
    }
}

impl core::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.names())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
