//! Positional tokenizer for campaign names
//!
//! Splits a name into exactly one token per schema position. The cursor walks
//! the unconsumed suffix of the input:
//!
//! - the last position takes whatever is left;
//! - a `_` position ends at the first `_`, which is consumed;
//! - any other position (empty or another separator such as `-`) ends where
//!   the *next* position's separator (or `_` if that is empty) first occurs.
//!   That lookahead separator is consumed only when it is `_`; any other
//!   lookahead separator stays at the front of the cursor for the next
//!   position.
//!
//! Positions reached after the input is exhausted receive an empty token.

use crate::schema::{TokenPositionSchema, DEFAULT_SEPARATOR};

/// Split `name` into `schema.len()` tokens
///
/// # Examples
///
/// ```
/// use taxon_core::{tokenize, TokenPositionRule, TokenPositionSchema};
///
/// let schema = TokenPositionSchema::new(vec![
///     TokenPositionRule::new(0, "Brand"),
///     TokenPositionRule::new(1, "Category"),
///     TokenPositionRule::new(2, "Rest"),
/// ]).unwrap();
///
/// assert_eq!(tokenize("mny_make_a_b", &schema), vec!["mny", "make", "a_b"]);
/// assert_eq!(tokenize("mny", &schema), vec!["mny", "", ""]);
/// ```
pub fn tokenize(name: &str, schema: &TokenPositionSchema) -> Vec<String> {
    let positions = schema.positions();
    let last = positions.len().saturating_sub(1);
    let mut tokens = Vec::with_capacity(positions.len());
    let mut remaining = name;

    for (i, position) in positions.iter().enumerate() {
        if i == last {
            tokens.push(remaining.to_string());
            break;
        }

        if position.separator == DEFAULT_SEPARATOR {
            match remaining.find(DEFAULT_SEPARATOR) {
                Some(at) => {
                    tokens.push(remaining[..at].to_string());
                    remaining = &remaining[at + DEFAULT_SEPARATOR.len()..];
                }
                None => {
                    tokens.push(remaining.to_string());
                    remaining = "";
                }
            }
            continue;
        }

        let lookahead = match positions[i + 1].separator.as_str() {
            "" => DEFAULT_SEPARATOR,
            sep => sep,
        };
        match remaining.find(lookahead) {
            Some(at) => {
                tokens.push(remaining[..at].to_string());
                remaining = if lookahead == DEFAULT_SEPARATOR {
                    &remaining[at + lookahead.len()..]
                } else {
                    &remaining[at..]
                };
            }
            None => {
                tokens.push(remaining.to_string());
                remaining = "";
            }
        }
    }

    tokens
}
