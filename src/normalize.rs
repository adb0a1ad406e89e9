//! Insertion of explicit concatenation operators.

use crate::alphabet::is_operator;

/// The explicit concatenation operator.
pub const CONCAT: char = '.';

// Whether a concatenation may follow this character.
#[inline]
fn ends_operand(c: char) -> bool {
    !is_operator(c) || c == '*' || c == ')'
}

// Whether a concatenation may precede this character.
#[inline]
fn begins_operand(c: char) -> bool {
    !is_operator(c) || c == '('
}

/// Rewrite a regex so that every implied concatenation is explicit.
/// For example `a(b|c)*d` becomes `a.(b|c)*.d`.
/// This does not validate the regex.
pub fn normalize(regex: &str) -> String {
    let mut result = String::with_capacity(regex.len() * 2);
    let mut prev = None;
    for c in regex.chars() {
        if let Some(p) = prev {
            if ends_operand(p) && begins_operand(c) {
                result.push(CONCAT);
            }
        }
        result.push(c);
        prev = Some(c);
    }
    result
}
