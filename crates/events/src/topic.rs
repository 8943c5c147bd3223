use serde::Serialize;

/// Identifier of an event kind, namespaced by the owning module
/// (`"<module>/<eventName>"`).
///
/// Topics are compile-time constants declared in the owning module's event
/// catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Topic(&'static str);

impl Topic {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Owning module prefix, or `None` for an un-namespaced topic.
    pub fn module(&self) -> Option<&'static str> {
        self.0.split_once('/').map(|(module, _)| module)
    }

    /// Event name without the module prefix.
    pub fn name(&self) -> &'static str {
        self.0.split_once('/').map_or(self.0, |(_, name)| name)
    }
}

impl core::fmt::Display for Topic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

impl From<&'static str> for Topic {
    fn from(value: &'static str) -> Self {
        Self(value)
    }
}
