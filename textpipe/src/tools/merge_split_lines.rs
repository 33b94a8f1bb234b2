//! Reflow of forcibly wrapped lines.
//!
//! Source renderers (PDF extraction, OCR) hard-wrap paragraphs at the page
//! width, so the wrapped lines of one paragraph all share a near-identical
//! rendered width. This tool finds the dominant width cluster and re-joins
//! consecutive members into single logical lines.

use super::{decode_params, ParamMap, Tool, ToolParameter};
use crate::context::ExecutionContext;
use crate::errors::ToolError;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MergeParams {
    /// Similarity tolerance, as a fraction of the maximum observed width.
    width_range_ratio: f64,
    /// Minimum cluster size required to trigger any merging.
    min_line_count: usize,
    /// Width ceiling beyond which a line cannot seed the cluster.
    max_width: f64,
}

impl Default for MergeParams {
    fn default() -> Self {
        Self {
            width_range_ratio: 0.1,
            min_line_count: 3,
            max_width: 800.0,
        }
    }
}

/// Re-joins lines that were forcibly wrapped by a source renderer.
///
/// Line widths come from the context's measure callback when one is supplied
/// and from the line's character count otherwise. Lines wider than `maxWidth`
/// are presumed already full, unwrapped lines: they cannot seed the width
/// cluster, though a line only slightly over the ceiling may still join a
/// merge run as a wrapped paragraph's terminal fragment.
///
/// On every bail-out path (too few lines, no dominant cluster) the original
/// text is returned byte-for-byte rather than reconstructed through a
/// split/join, so no incidental whitespace differences are introduced.
#[derive(Debug, Default)]
pub struct MergeSplitLines;

impl Tool for MergeSplitLines {
    fn name(&self) -> &str {
        "MergeSplitLines"
    }

    fn description(&self) -> &str {
        "Merges lines that were forcibly wrapped by the source renderer"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::new(
                "widthRangeRatio",
                "Width similarity tolerance as a fraction of the maximum observed width",
            )
            .with_default(0.1),
            ToolParameter::new(
                "minLineCount",
                "Minimum number of similar-width lines required to merge at all",
            )
            .with_default(3),
            ToolParameter::new("maxWidth", "Maximum line width (pixels)").with_default(800.0),
        ]
    }

    fn should_apply(&self, _ctx: &ExecutionContext, text: &str, _params: &ParamMap) -> bool {
        !text.is_empty()
    }

    fn apply(
        &self,
        ctx: &mut ExecutionContext,
        text: &str,
        params: &ParamMap,
    ) -> Result<String, ToolError> {
        let params: MergeParams = decode_params(self.name(), params)?;
        debug!(
            width_range_ratio = params.width_range_ratio,
            min_line_count = params.min_line_count,
            max_width = params.max_width,
            "analyzing line widths"
        );

        if ctx.measure_text().is_some() {
            debug!("measuring line widths via context callback");
        } else {
            debug!("no measure callback in context, falling back to character counts");
        }
        let measure = |line: &str| -> f64 {
            match ctx.measure_text() {
                Some(callback) => callback(line),
                None => line.chars().count() as f64,
            }
        };

        let lines: Vec<&str> = text.split('\n').collect();
        if lines.len() < params.min_line_count {
            debug!(
                lines = lines.len(),
                min = params.min_line_count,
                "too few lines to analyze"
            );
            return Ok(text.to_string());
        }

        // Lines over the ceiling are excluded from cluster-finding only;
        // step two below re-tests every line against the chosen center.
        let widths: Vec<f64> = lines.iter().map(|line| measure(line)).collect();
        let candidates: Vec<f64> = widths
            .iter()
            .copied()
            .filter(|width| *width <= params.max_width)
            .collect();
        if candidates.len() < params.min_line_count {
            debug!(
                candidates = candidates.len(),
                min = params.min_line_count,
                "too few candidate lines under the width ceiling"
            );
            return Ok(text.to_string());
        }

        let max_measured = candidates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let width_range = max_measured * params.width_range_ratio;

        // Densest width neighborhood among the candidates. Ties go to the
        // first width reaching the maximum count, in line order.
        let mut best_count = 0usize;
        let mut best_center = 0.0f64;
        for &width in &candidates {
            let count = candidates
                .iter()
                .filter(|&&other| (width - other).abs() <= width_range)
                .count();
            if count > best_count {
                best_count = count;
                best_center = width;
            }
        }
        if best_count < params.min_line_count {
            debug!(
                cluster_size = best_count,
                min = params.min_line_count,
                "no dominant width cluster"
            );
            return Ok(text.to_string());
        }
        debug!(
            center = best_center,
            cluster_size = best_count,
            range = width_range,
            "found dominant width cluster"
        );

        let mergeable: Vec<bool> = widths
            .iter()
            .map(|&width| (width - best_center).abs() <= width_range)
            .collect();

        let mut merged_lines: Vec<String> = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            if !mergeable[i] {
                merged_lines.push(lines[i].to_string());
                i += 1;
                continue;
            }
            let mut merged = String::from(lines[i]);
            i += 1;
            while i < lines.len() && mergeable[i] {
                merged.push_str(lines[i]);
                i += 1;
            }
            // The first non-mergeable line after a run is the wrapped
            // paragraph's shorter final fragment; absorb it too.
            if i < lines.len() && !mergeable[i] {
                merged.push_str(lines[i]);
                i += 1;
            }
            merged_lines.push(merged);
        }

        debug!(
            before = lines.len(),
            after = merged_lines.len(),
            "merged wrapped lines"
        );
        Ok(merged_lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn apply(text: &str, ctx: &mut ExecutionContext, overrides: serde_json::Value) -> String {
        let serde_json::Value::Object(overrides) = overrides else {
            panic!("overrides must be an object");
        };
        let params =
            crate::tools::effective_params(&MergeSplitLines.parameters(), Some(&overrides));
        MergeSplitLines.apply(ctx, text, &params).unwrap()
    }

    fn measure_by_char_tens() -> ExecutionContext {
        ExecutionContext::new()
            .with_measure_text(Box::new(|line| line.chars().count() as f64 * 10.0))
    }

    #[test]
    fn test_condition_gates_on_empty_text() {
        let ctx = ExecutionContext::new();
        assert!(!MergeSplitLines.should_apply(&ctx, "", &ParamMap::new()));
        assert!(MergeSplitLines.should_apply(&ctx, "line1\nline2", &ParamMap::new()));
    }

    #[test]
    fn test_too_few_lines_returns_input_exactly() {
        let mut ctx = measure_by_char_tens();
        let input = "line1\nline2";
        assert_eq!(apply(input, &mut ctx, serde_json::json!({})), input);
    }

    #[test]
    fn test_single_line_unchanged() {
        let mut ctx = measure_by_char_tens();
        let input = "single line text";
        assert_eq!(apply(input, &mut ctx, serde_json::json!({})), input);
    }

    #[test]
    fn test_empty_string_through_process() {
        let mut ctx = measure_by_char_tens();
        assert_eq!(apply("", &mut ctx, serde_json::json!({})), "");
    }

    #[test]
    fn test_all_lines_over_max_width_unchanged() {
        let mut ctx = measure_by_char_tens();
        let input = "very long line that exceeds the maximum width\n\
                     another very long line over the limit\n\
                     third very long line over the limit";
        assert_eq!(
            apply(input, &mut ctx, serde_json::json!({"maxWidth": 50})),
            input
        );
    }

    #[test]
    fn test_no_dominant_cluster_unchanged() {
        // Widths 10, 40, 90, 160, 250: range is 25, so no width has three
        // neighbors within it.
        let mut ctx = ExecutionContext::new().with_measure_text(Box::new(|line| {
            let n = line.chars().count() as f64;
            n * n * 10.0
        }));
        let input = "a\nbb\nccc\ndddd\neeeee";
        assert_eq!(apply(input, &mut ctx, serde_json::json!({})), input);
    }

    #[test]
    fn test_merges_similar_width_run_and_absorbs_tail() {
        // Three 10-char lines cluster at width 100 (range 10); the short
        // tail ends the run and is absorbed into the merged paragraph.
        let mut ctx = measure_by_char_tens();
        let input = "aaaaaaaaaa\nbbbbbbbbbb\ncccccccccc\nddd";
        assert_eq!(
            apply(input, &mut ctx, serde_json::json!({})),
            "aaaaaaaaaabbbbbbbbbbccccccccccddd"
        );
    }

    #[test]
    fn test_non_mergeable_head_emitted_as_is() {
        // A short heading before the cluster stays on its own line.
        let mut ctx = measure_by_char_tens();
        let input = "ttt\naaaaaaaaaa\nbbbbbbbbbb\ncccccccccc";
        assert_eq!(
            apply(input, &mut ctx, serde_json::json!({})),
            "ttt\naaaaaaaaaabbbbbbbbbbcccccccccc"
        );
    }

    #[test]
    fn test_fallback_to_char_count_without_callback() {
        let mut ctx = ExecutionContext::new();
        let input = "aaaaaaaaaa\nbbbbbbbbbb\ncccccccccc\nddd";
        assert_eq!(
            apply(input, &mut ctx, serde_json::json!({})),
            "aaaaaaaaaabbbbbbbbbbccccccccccddd"
        );
    }

    #[test]
    fn test_min_line_count_override() {
        // Four lines but five required: bail out unchanged.
        let mut ctx = measure_by_char_tens();
        let input = "aaaaaaaaaa\nbbbbbbbbbb\ncccccccccc\ndddddddddd";
        assert_eq!(
            apply(input, &mut ctx, serde_json::json!({"minLineCount": 5})),
            input
        );
    }

    #[test]
    fn test_line_slightly_over_ceiling_still_joins_run() {
        // Widths: 100, 100, 100, 102. With maxWidth=101 the 102-wide line
        // cannot seed the cluster but still falls within the range of the
        // chosen center, so it is marked mergeable and joins the run.
        let mut ctx = ExecutionContext::new().with_measure_text(Box::new(|line| {
            if line.starts_with('z') {
                102.0
            } else {
                100.0
            }
        }));
        let input = "aaa\nbbb\nccc\nzzz";
        assert_eq!(
            apply(input, &mut ctx, serde_json::json!({"maxWidth": 101})),
            "aaabbbccczzz"
        );
    }

    #[test]
    fn test_two_separate_runs_merge_independently() {
        // Two clusters of width 100 separated by wide lines. Each run
        // absorbs the single wide line that follows it; the second wide
        // line stands alone.
        let mut ctx = ExecutionContext::new().with_measure_text(Box::new(|line| {
            if line.starts_with(char::is_uppercase) {
                500.0
            } else {
                100.0
            }
        }));
        let input = "aaa\nbbb\nccc\nXXX\nYYY\nddd\neee\nfff\nZZZ";
        assert_eq!(
            apply(input, &mut ctx, serde_json::json!({})),
            "aaabbbcccXXX\nYYY\ndddeeefffZZZ"
        );
    }
}
