//! Module descriptors and the startup orchestrator.
//!
//! Each feature module implements [`Module`]; bootstrap code registers them in
//! a [`ModuleRegistry`] and awaits [`ModuleRegistry::initialize_all`] once
//! before anything depends on module readiness.

pub mod config;
pub mod module;
pub mod orchestrator;
pub mod registry;

pub use config::RuntimeConfig;
pub use module::Module;
pub use orchestrator::{OrchestratorError, initialize_all};
pub use registry::ModuleRegistry;
