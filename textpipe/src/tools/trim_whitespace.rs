//! Per-line whitespace cleanup.

use super::{ParamMap, Tool};
use crate::context::ExecutionContext;
use crate::errors::ToolError;

/// Strips leading and trailing whitespace from every line independently.
///
/// Interior whitespace within a line is preserved untouched. Applying the
/// tool twice yields the same result as applying it once.
#[derive(Debug, Default)]
pub struct TrimWhitespace;

impl Tool for TrimWhitespace {
    fn name(&self) -> &str {
        "TrimWhitespace"
    }

    fn description(&self) -> &str {
        "Strips leading and trailing whitespace from each line"
    }

    fn should_apply(&self, _ctx: &ExecutionContext, text: &str, _params: &ParamMap) -> bool {
        !text.is_empty()
    }

    fn apply(
        &self,
        _ctx: &mut ExecutionContext,
        text: &str,
        _params: &ParamMap,
    ) -> Result<String, ToolError> {
        Ok(text
            .split('\n')
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
