//! Ordered regex substitution rules.

use super::{decode_params, ParamMap, Tool, ToolParameter};
use crate::context::ExecutionContext;
use crate::errors::ToolError;
use regex::RegexBuilder;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RegexReplaceParams {
    replacements: Vec<(String, String)>,
    flags: String,
}

impl Default for RegexReplaceParams {
    fn default() -> Self {
        Self {
            replacements: Vec::new(),
            flags: "g".to_string(),
        }
    }
}

/// Applies an ordered sequence of `(pattern, replacement)` rules.
///
/// The rules compose: each pattern runs against the result of the previous
/// rule's replacement, not against the original text. An empty pattern is a
/// no-op rule; a pattern that fails to compile is skipped with a warning and
/// processing continues with the remaining rules. Neither case fails the
/// pipeline.
#[derive(Debug, Default)]
pub struct RegexReplace;

impl Tool for RegexReplace {
    fn name(&self) -> &str {
        "RegexReplace"
    }

    fn description(&self) -> &str {
        "Replaces text using an ordered list of regex substitution rules"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::new(
                "replacements",
                "Ordered (pattern, replacement) pairs, applied in sequence",
            )
            .with_default(Value::Array(Vec::new())),
            ToolParameter::new(
                "flags",
                "Pattern flags: g (replace all matches), i (ignore case), m (multi-line)",
            )
            .with_default("g"),
        ]
    }

    fn should_apply(&self, _ctx: &ExecutionContext, text: &str, params: &ParamMap) -> bool {
        !text.is_empty()
            && params
                .get("replacements")
                .and_then(Value::as_array)
                .is_some_and(|rules| !rules.is_empty())
    }

    fn apply(
        &self,
        _ctx: &mut ExecutionContext,
        text: &str,
        params: &ParamMap,
    ) -> Result<String, ToolError> {
        let params: RegexReplaceParams = decode_params(self.name(), params)?;
        let global = params.flags.contains('g');

        let mut current = text.to_string();
        for (pattern, replacement) in &params.replacements {
            if pattern.is_empty() {
                continue;
            }
            let regex = match RegexBuilder::new(pattern)
                .case_insensitive(params.flags.contains('i'))
                .multi_line(params.flags.contains('m'))
                .build()
            {
                Ok(regex) => regex,
                Err(err) => {
                    warn!(pattern = %pattern, %err, "invalid pattern, skipping rule");
                    continue;
                }
            };
            current = if global {
                regex.replace_all(&current, replacement.as_str()).into_owned()
            } else {
                regex.replace(&current, replacement.as_str()).into_owned()
            };
        }
        Ok(current)
    }
}
