//! Error types for the pipeline engine.
//!
//! Every error in this taxonomy is caught at the executor boundary and
//! converted into a failed [`PipelineResult`](crate::executor::PipelineResult)
//! carrying a human-readable message; none of them reach the caller of
//! `execute` as a language-level fault.

use thiserror::Error;

/// Errors surfaced by one pipeline execution.
#[derive(Debug, Clone, Error)]
pub enum ExecuteError {
    /// No pipeline with the requested id exists in the catalog.
    #[error("pipeline not found: {id}")]
    PipelineNotFound {
        /// The requested pipeline id.
        id: String,
    },

    /// A step referenced a tool that is missing from the registry.
    #[error("tool not found: {name}")]
    ToolNotFound {
        /// The referenced tool name.
        name: String,
    },

    /// A tool raised a runtime fault while processing.
    #[error("{0}")]
    Tool(#[from] ToolError),
}

/// Faults that escape a tool's own handling.
///
/// Recoverable issues stay inside the tool — `RegexReplace` skips an invalid
/// rule rather than raising one of these. Only faults a tool cannot recover
/// from reach this type, and through it the executor boundary.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    /// The merged parameter map could not be decoded into the tool's
    /// typed parameter struct.
    #[error("tool {tool}: invalid parameters: {detail}")]
    InvalidParameters {
        /// The tool name.
        tool: String,
        /// What failed to decode.
        detail: String,
    },

    /// The tool failed while transforming the text.
    #[error("tool {tool} failed: {detail}")]
    Failed {
        /// The tool name.
        tool: String,
        /// The reason for failure.
        detail: String,
    },
}

impl ToolError {
    /// Creates an invalid-parameters error.
    #[must_use]
    pub fn invalid_parameters(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidParameters {
            tool: tool.into(),
            detail: detail.into(),
        }
    }

    /// Creates an execution-failure error.
    #[must_use]
    pub fn failed(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Failed {
            tool: tool.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_not_found_message() {
        let err = ExecuteError::PipelineNotFound {
            id: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "pipeline not found: missing");
    }

    #[test]
    fn test_tool_not_found_message() {
        let err = ExecuteError::ToolNotFound {
            name: "NoSuchTool".to_string(),
        };
        assert_eq!(err.to_string(), "tool not found: NoSuchTool");
    }

    #[test]
    fn test_tool_error_propagates_through_execute_error() {
        let err = ExecuteError::from(ToolError::failed("MergeSplitLines", "boom"));
        assert_eq!(err.to_string(), "tool MergeSplitLines failed: boom");
    }

    #[test]
    fn test_invalid_parameters_message() {
        let err = ToolError::invalid_parameters("RegexReplace", "expected a sequence");
        assert!(err.to_string().contains("invalid parameters"));
        assert!(err.to_string().contains("RegexReplace"));
    }
}
