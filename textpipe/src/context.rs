//! Execution context shared across pipeline steps.

use serde_json::Value;
use std::collections::HashMap;

/// Measures the rendered width of a single line of text.
///
/// Supplied by the host (e.g. measuring against the font the source document
/// was rendered with); only [`MergeSplitLines`](crate::tools::MergeSplitLines)
/// consults it.
pub type MeasureTextFn = Box<dyn Fn(&str) -> f64 + Send>;

/// Mutable state shared across all steps of one pipeline execution.
///
/// Each step sees the context as mutated by all prior steps. A context is
/// created fresh per execution (or supplied by the caller) and discarded
/// afterwards; concurrent executions must each receive their own.
#[derive(Default)]
pub struct ExecutionContext {
    values: HashMap<String, Value>,
    measure_text: Option<MeasureTextFn>,
}

impl ExecutionContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a width-measurement callback.
    #[must_use]
    pub fn with_measure_text(mut self, measure: MeasureTextFn) -> Self {
        self.measure_text = Some(measure);
        self
    }

    /// Returns the width-measurement callback, if one was supplied.
    #[must_use]
    pub fn measure_text(&self) -> Option<&MeasureTextFn> {
        self.measure_text.as_ref()
    }

    /// Gets a value from the context.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Sets a value, overwriting any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no values have been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("values", &self.values)
            .field("has_measure_text", &self.measure_text.is_some())
            .finish()
    }
}
