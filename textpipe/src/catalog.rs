//! Pipeline definitions and the pipeline catalog.

use crate::tools::ParamMap;
use serde::{Deserialize, Serialize};

/// One step of a pipeline: a tool name plus optional parameter overrides.
///
/// Overrides only need to contain keys that differ from the tool's declared
/// defaults. In catalog JSON a step may be either a bare tool name or an
/// object with `name` and `parameters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "StepDef")]
pub struct PipelineStep {
    /// The tool name, matched case- and spelling-exact against the registry.
    pub name: String,
    /// Parameter overrides for this invocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ParamMap>,
}

impl PipelineStep {
    /// Creates a step with no parameter overrides.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: None,
        }
    }

    /// Sets the parameter overrides.
    #[must_use]
    pub fn with_parameters(mut self, parameters: ParamMap) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// Wire form of a step: either `"ToolName"` or `{"name": ..., "parameters": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StepDef {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        parameters: Option<ParamMap>,
    },
}

impl From<StepDef> for PipelineStep {
    fn from(def: StepDef) -> Self {
        match def {
            StepDef::Name(name) => Self {
                name,
                parameters: None,
            },
            StepDef::Full { name, parameters } => Self { name, parameters },
        }
    }
}

/// An ordered, named sequence of tool invocations applied to one text input.
///
/// Step order is the execution order. A pipeline with zero steps is valid
/// and returns the input unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    /// Unique identifier used to resolve the pipeline at execution time.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// The tool invocations, in execution order.
    #[serde(default, alias = "tools")]
    pub steps: Vec<PipelineStep>,
}

impl Pipeline {
    /// Creates a pipeline with no steps.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            steps: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a step.
    #[must_use]
    pub fn step(mut self, step: PipelineStep) -> Self {
        self.steps.push(step);
        self
    }
}

/// Ordered store of pipeline definitions.
///
/// The executor consumes the catalog read-only; how the definitions are
/// persisted or discovered is up to the host — [`PipelineCatalog::from_json`]
/// covers the common case of a JSON document of definitions.
#[derive(Debug, Clone)]
pub struct PipelineCatalog {
    pipelines: Vec<Pipeline>,
}

impl PipelineCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pipelines: Vec::new(),
        }
    }

    /// Parses a catalog from a JSON array of pipeline definitions.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error if the document is not
    /// a valid pipeline array.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let pipelines: Vec<Pipeline> = serde_json::from_str(json)?;
        Ok(Self { pipelines })
    }

    /// Adds a pipeline, replacing any existing pipeline with the same id.
    pub fn add(&mut self, pipeline: Pipeline) {
        if let Some(existing) = self.pipelines.iter_mut().find(|p| p.id == pipeline.id) {
            *existing = pipeline;
        } else {
            self.pipelines.push(pipeline);
        }
    }

    /// Looks up a pipeline by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Pipeline> {
        self.pipelines.iter().find(|p| p.id == id)
    }

    /// Returns all pipelines in catalog order.
    #[must_use]
    pub fn list(&self) -> &[Pipeline] {
        &self.pipelines
    }

    /// Returns the number of pipelines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    /// Returns true if the catalog holds no pipelines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}

impl Default for PipelineCatalog {
    /// The stock catalog: a single whitespace-cleanup pipeline.
    fn default() -> Self {
        let mut catalog = Self::new();
        catalog.add(
            Pipeline::new("basic-cleanup", "基础清理")
                .with_description("清除文本中的多余空白字符")
                .step(PipelineStep::new("TrimWhitespace")),
        );
        catalog
    }
}
