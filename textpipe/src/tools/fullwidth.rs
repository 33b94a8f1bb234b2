//! Full-width to half-width character normalization.

use super::{decode_params, ParamMap, Tool, ToolParameter};
use crate::context::ExecutionContext;
use crate::errors::ToolError;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FullwidthParams {
    to_lower_case: bool,
    convert_common_punctuation: bool,
}

/// Common CJK punctuation, converted only when `convertCommonPunctuation`
/// is set.
const PUNCTUATION: &[(char, char)] = &[
    ('，', ','),
    ('。', '.'),
    ('：', ':'),
    ('；', ';'),
    ('！', '!'),
    ('？', '?'),
    ('（', '('),
    ('）', ')'),
];

/// Remaining ASCII-mappable symbols, always converted.
const OTHER_SYMBOLS: &[(char, char)] = &[
    ('［', '['),
    ('］', ']'),
    ('｛', '{'),
    ('｝', '}'),
    ('＂', '"'),
    ('＇', '\''),
    ('　', ' '), // full-width space
    ('＃', '#'),
    ('＄', '$'),
    ('％', '%'),
    ('＆', '&'),
    ('＊', '*'),
    ('＋', '+'),
    ('－', '-'),
    ('／', '/'),
    ('＜', '<'),
    ('＝', '='),
    ('＞', '>'),
    ('＠', '@'),
    ('＼', '\\'),
    ('＾', '^'),
    ('＿', '_'),
    ('｀', '`'),
    ('｜', '|'),
    ('～', '~'),
];

/// Full-width forms U+FF01..=U+FF5E sit at a fixed offset from ASCII.
fn shift_to_ascii(c: char) -> char {
    char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
}

fn lookup(table: &[(char, char)], c: char) -> Option<char> {
    table
        .iter()
        .find(|(fullwidth, _)| *fullwidth == c)
        .map(|(_, halfwidth)| *halfwidth)
}

/// Converts full-width digits, letters, and symbols to their ASCII
/// equivalents.
///
/// The mapped sets are disjoint, fixed, one-to-one substitutions; characters
/// outside all of them (CJK ideographs in particular) are left untouched,
/// which makes the conversion idempotent.
#[derive(Debug, Default)]
pub struct FullwidthToHalfwidth;

impl FullwidthToHalfwidth {
    fn convert_char(c: char, params: &FullwidthParams) -> char {
        match c {
            '０'..='９' | 'ａ'..='ｚ' => shift_to_ascii(c),
            'Ａ'..='Ｚ' => {
                let halfwidth = shift_to_ascii(c);
                if params.to_lower_case {
                    halfwidth.to_ascii_lowercase()
                } else {
                    halfwidth
                }
            }
            _ => {
                if params.convert_common_punctuation {
                    if let Some(halfwidth) = lookup(PUNCTUATION, c) {
                        return halfwidth;
                    }
                }
                lookup(OTHER_SYMBOLS, c).unwrap_or(c)
            }
        }
    }
}

impl Tool for FullwidthToHalfwidth {
    fn name(&self) -> &str {
        "FullwidthToHalfwidth"
    }

    fn description(&self) -> &str {
        "Converts full-width letters, digits, and symbols to half-width form"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::new(
                "toLowerCase",
                "Convert full-width uppercase letters to half-width lowercase",
            )
            .with_default(false),
            ToolParameter::new(
                "convertCommonPunctuation",
                "Also convert common CJK punctuation (comma, period, colon, \
                 semicolon, exclamation, question mark, parentheses)",
            )
            .with_default(false),
        ]
    }

    fn should_apply(&self, _ctx: &ExecutionContext, text: &str, _params: &ParamMap) -> bool {
        !text.is_empty()
    }

    fn apply(
        &self,
        _ctx: &mut ExecutionContext,
        text: &str,
        params: &ParamMap,
    ) -> Result<String, ToolError> {
        let params: FullwidthParams = decode_params(self.name(), params)?;
        Ok(text
            .chars()
            .map(|c| Self::convert_char(c, &params))
            .collect())
    }
}
