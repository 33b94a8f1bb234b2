//! Tool contract and built-in transformation tools.
//!
//! A tool is a named, parameterized text transformation exposing a gating
//! condition ([`Tool::should_apply`]) and an apply function ([`Tool::apply`]).
//! The executor resolves tools by name through the [`ToolRegistry`] and never
//! needs tool-specific knowledge: a tool opts out of a step (empty input,
//! missing required parameters) by returning `false` from its condition.

mod fullwidth;
mod merge_split_lines;
mod regex_replace;
mod registry;
mod trim_whitespace;

pub use fullwidth::FullwidthToHalfwidth;
pub use merge_split_lines::MergeSplitLines;
pub use regex_replace::RegexReplace;
pub use registry::ToolRegistry;
pub use trim_whitespace::TrimWhitespace;

use crate::context::ExecutionContext;
use crate::errors::ToolError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Parameter values for one tool invocation, keyed by parameter name.
pub type ParamMap = serde_json::Map<String, Value>;

/// A declared parameter of a tool.
///
/// Parameter names are unique within one tool.
#[derive(Debug, Clone)]
pub struct ToolParameter {
    /// The parameter name.
    pub name: String,
    /// What the parameter controls.
    pub description: String,
    /// Default value contributed to the effective parameter set, if any.
    pub default_value: Option<Value>,
}

impl ToolParameter {
    /// Creates a parameter without a default.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default_value: None,
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// A named, parameterized text transformation.
///
/// Implementations are registered once at startup and held behind
/// `Arc<dyn Tool>` in the registry; they must not carry mutable state.
pub trait Tool: Send + Sync {
    /// The unique tool name; the lookup key in the registry.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// The declared parameters with their defaults.
    fn parameters(&self) -> Vec<ToolParameter> {
        Vec::new()
    }

    /// Whether the tool should run on this input.
    ///
    /// Evaluated against the merged parameter set; returning `false` skips
    /// the step without mutating the text.
    fn should_apply(&self, ctx: &ExecutionContext, text: &str, params: &ParamMap) -> bool;

    /// Applies the transformation, returning the new text.
    ///
    /// May mutate the context to record derived state for later steps.
    fn apply(
        &self,
        ctx: &mut ExecutionContext,
        text: &str,
        params: &ParamMap,
    ) -> Result<String, ToolError>;
}

/// Computes the effective parameter set for one tool invocation.
///
/// Starts from the declared defaults (parameters without a default are
/// omitted), then overlays `overrides` key by key. An override wins,
/// including an explicit `null`; a key absent from `overrides` keeps its
/// default. The merge is total and order-independent for a fixed override
/// map.
#[must_use]
pub fn effective_params(declared: &[ToolParameter], overrides: Option<&ParamMap>) -> ParamMap {
    let mut merged = ParamMap::new();
    for param in declared {
        if let Some(default) = &param.default_value {
            merged.insert(param.name.clone(), default.clone());
        }
    }
    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Decodes a merged parameter map into a tool's typed parameter struct.
pub(crate) fn decode_params<T: DeserializeOwned>(tool: &str, params: &ParamMap) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(params.clone()))
        .map_err(|err| ToolError::invalid_parameters(tool, err.to_string()))
}

/// Registers the built-in tools.
pub fn register_defaults(registry: &ToolRegistry) {
    registry.register(Arc::new(TrimWhitespace));
    registry.register(Arc::new(RegexReplace));
    registry.register(Arc::new(FullwidthToHalfwidth));
    registry.register(Arc::new(MergeSplitLines));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared() -> Vec<ToolParameter> {
        vec![
            ToolParameter::new("ratio", "a ratio").with_default(0.1),
            ToolParameter::new("count", "a count").with_default(3),
            ToolParameter::new("label", "no default here"),
        ]
    }

    #[test]
    fn test_defaults_without_overrides() {
        let params = effective_params(&declared(), None);

        assert_eq!(params.get("ratio"), Some(&serde_json::json!(0.1)));
        assert_eq!(params.get("count"), Some(&serde_json::json!(3)));
        // No default declared, so the key is absent entirely.
        assert!(!params.contains_key("label"));
    }

    #[test]
    fn test_override_wins() {
        let mut overrides = ParamMap::new();
        overrides.insert("count".to_string(), serde_json::json!(7));

        let params = effective_params(&declared(), Some(&overrides));
        assert_eq!(params.get("count"), Some(&serde_json::json!(7)));
        assert_eq!(params.get("ratio"), Some(&serde_json::json!(0.1)));
    }

    #[test]
    fn test_explicit_null_override_wins() {
        let mut overrides = ParamMap::new();
        overrides.insert("ratio".to_string(), Value::Null);

        let params = effective_params(&declared(), Some(&overrides));
        assert_eq!(params.get("ratio"), Some(&Value::Null));
    }

    #[test]
    fn test_override_key_not_declared_still_passes_through() {
        let mut overrides = ParamMap::new();
        overrides.insert("extra".to_string(), serde_json::json!("x"));

        let params = effective_params(&declared(), Some(&overrides));
        assert_eq!(params.get("extra"), Some(&serde_json::json!("x")));
    }

    #[test]
    fn test_register_defaults_registers_all_builtins() {
        let registry = ToolRegistry::new();
        register_defaults(&registry);

        for name in [
            "TrimWhitespace",
            "RegexReplace",
            "FullwidthToHalfwidth",
            "MergeSplitLines",
        ] {
            assert!(registry.get(name).is_some(), "missing {name}");
        }
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_builtin_parameter_names_unique() {
        let registry = ToolRegistry::new();
        register_defaults(&registry);

        for tool in registry.list() {
            let mut names: Vec<String> =
                tool.parameters().iter().map(|p| p.name.clone()).collect();
            let total = names.len();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), total, "duplicate parameter on {}", tool.name());
        }
    }
}
