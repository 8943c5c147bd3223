use async_trait::async_trait;
use watchtower_events::Topic;

/// A cohesive unit of domain functionality.
///
/// A module owns a fixed catalog of topics, exposes a public API whose every
/// result passes through a contract validator, and wires its event handlers
/// in [`Module::initialize`]. Descriptors are created once at startup and live
/// for the rest of the process.
#[async_trait]
pub trait Module: Send + Sync {
    /// Unique module name; also the namespace of its topics.
    fn name(&self) -> &'static str;

    /// Topics this module owns and may publish.
    fn topics(&self) -> &'static [Topic];

    /// Names of the public API operations.
    fn operations(&self) -> &'static [&'static str];

    /// One-time setup, principally registering event handlers.
    ///
    /// Must not rely on any other module having been initialized first.
    async fn initialize(&self) -> anyhow::Result<()>;
}
