//! Concurrent module initialization.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::join_all;
use thiserror::Error;
use tracing::{error, info};

use crate::module::Module;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A module's `initialize()` failed or panicked.
    #[error("module `{module}` failed to initialize: {source}")]
    Initialization {
        module: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// `initialize_all` was already called on this registry.
    #[error("modules are already initialized")]
    AlreadyInitialized,

    #[error("a module named `{0}` is already registered")]
    DuplicateModule(&'static str),

    #[error("topic `{topic}` is declared by both `{owner}` and `{claimant}`")]
    TopicCollision {
        topic: &'static str,
        owner: &'static str,
        claimant: &'static str,
    },
}

impl OrchestratorError {
    /// Name of the module whose initialization failed, if that is the cause.
    pub fn module(&self) -> Option<&'static str> {
        match self {
            OrchestratorError::Initialization { module, .. } => Some(module),
            _ => None,
        }
    }
}

/// Drive every module to ready.
///
/// All `initialize()` routines start together and are awaited as a barrier:
/// a failing module never cancels its siblings, so every module that can
/// register its subscriptions does so before this returns. The result is
/// `Ok(true)` only when every module succeeded; otherwise the error of the
/// first failing module (in slice order) is returned. Successful modules keep
/// their subscriptions either way.
pub async fn initialize_all(modules: &[Arc<dyn Module>]) -> Result<bool, OrchestratorError> {
    info!(modules = modules.len(), "initializing modules");

    let outcomes = join_all(modules.iter().map(|module| {
        let module = module.clone();
        async move {
            let name = module.name();
            let outcome = match AssertUnwindSafe(module.initialize()).catch_unwind().await {
                Ok(result) => result,
                Err(panic) => Err(anyhow::anyhow!("initializer panicked: {}", panic_message(panic.as_ref()))),
            };
            (name, outcome)
        }
    }))
    .await;

    let mut first_failure = None;
    for (module, outcome) in outcomes {
        match outcome {
            Ok(()) => info!(module, "module initialized"),
            Err(source) => {
                error!(module, error = %format!("{source:#}"), "module failed to initialize");
                if first_failure.is_none() {
                    first_failure = Some(OrchestratorError::Initialization { module, source });
                }
            }
        }
    }

    match first_failure {
        Some(err) => Err(err),
        None => {
            info!("all modules initialized");
            Ok(true)
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
