//! Tool registry for name-based tool lookup.

use super::Tool;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry mapping tool names to implementations.
///
/// Registration is expected to happen once at startup; afterwards the
/// registry is read-mostly and may be shared read-only across concurrent
/// executions. There is no global instance — construct a registry and pass
/// it to the executor explicitly.
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool, replacing any existing tool with the same name.
    pub fn register(&self, tool: Arc<dyn Tool>) {
        self.tools.write().insert(tool.name().to_string(), tool);
    }

    /// Looks up a tool by its exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.read().get(name).cloned()
    }

    /// Checks whether a tool is registered under the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.read().contains_key(name)
    }

    /// Returns all registered tools. Order is not significant.
    #[must_use]
    pub fn list(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.read().values().cloned().collect()
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.read().len()
    }

    /// Returns true if no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.read().is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tool_count", &self.tools.read().len())
            .finish()
    }
}
