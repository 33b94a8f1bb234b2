//! Pipeline execution engine.

use crate::catalog::{Pipeline, PipelineCatalog};
use crate::context::ExecutionContext;
use crate::errors::ExecuteError;
use crate::tools::{effective_params, ToolRegistry};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of one pipeline execution.
///
/// Exactly one of `output` and `error` is meaningful: `output` holds the
/// transformed text on success, `error` the failure message otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Whether the execution succeeded.
    pub success: bool,
    /// The transformed text; empty on failure.
    pub output: String,
    /// The failure message; absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PipelineResult {
    /// Creates a successful result.
    #[must_use]
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
        }
    }

    /// Creates a failed result. No partial output is carried.
    #[must_use]
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(error.into()),
        }
    }
}

/// Executes pipelines against a tool registry and a pipeline catalog.
///
/// Execution is synchronous and sequential, one step at a time; an
/// unresolved pipeline or tool halts the run with no partial output (all
/// steps are mandatory, so configuration errors surface early). Given
/// identical registry state, catalog, input, and context, execution is
/// deterministic.
#[derive(Debug)]
pub struct PipelineExecutor<'a> {
    registry: &'a ToolRegistry,
    catalog: &'a PipelineCatalog,
}

impl<'a> PipelineExecutor<'a> {
    /// Creates an executor over the given registry and catalog.
    #[must_use]
    pub fn new(registry: &'a ToolRegistry, catalog: &'a PipelineCatalog) -> Self {
        Self { registry, catalog }
    }

    /// Executes the pipeline with the given id on `input`.
    ///
    /// Every error class is converted into a failed [`PipelineResult`];
    /// this never panics or returns a language-level error.
    pub fn execute(
        &self,
        pipeline_id: &str,
        input: &str,
        ctx: &mut ExecutionContext,
    ) -> PipelineResult {
        let Some(pipeline) = self.catalog.get(pipeline_id) else {
            return PipelineResult::fail(
                ExecuteError::PipelineNotFound {
                    id: pipeline_id.to_string(),
                }
                .to_string(),
            );
        };
        self.run(pipeline, input, ctx)
    }

    /// Runs a pipeline definition directly, bypassing catalog lookup.
    pub fn run(
        &self,
        pipeline: &Pipeline,
        input: &str,
        ctx: &mut ExecutionContext,
    ) -> PipelineResult {
        debug!(
            pipeline = %pipeline.id,
            steps = pipeline.steps.len(),
            "executing pipeline"
        );
        match self.run_steps(pipeline, input, ctx) {
            Ok(output) => PipelineResult::ok(output),
            Err(err) => {
                debug!(pipeline = %pipeline.id, %err, "pipeline failed");
                PipelineResult::fail(err.to_string())
            }
        }
    }

    fn run_steps(
        &self,
        pipeline: &Pipeline,
        input: &str,
        ctx: &mut ExecutionContext,
    ) -> Result<String, ExecuteError> {
        let mut current = input.to_string();
        for step in &pipeline.steps {
            let tool = self
                .registry
                .get(&step.name)
                .ok_or_else(|| ExecuteError::ToolNotFound {
                    name: step.name.clone(),
                })?;
            let params = effective_params(&tool.parameters(), step.parameters.as_ref());

            if !tool.should_apply(ctx, &current, &params) {
                debug!(tool = %step.name, "condition not met, skipping step");
                continue;
            }
            debug!(tool = %step.name, "applying step");
            current = tool.apply(ctx, &current, &params)?;
        }
        Ok(current)
    }
}
