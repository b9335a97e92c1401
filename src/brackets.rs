//! Depth-counting bracket matching over flat token sequences
use crate::Token;

/// Index of the `)` closing the first bracket at or after `start`
///
/// `start` may point at a function name, in which case its argument bracket is matched.
pub(crate) fn matching_close(tokens: &[Token<'_>], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (ind, token) in tokens.iter().enumerate().skip(start) {
        if token.is_open() {
            depth += 1;
        } else if token.is_close() {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(ind);
            }
        }
    }
    None
}

/// Index of the `(` opening the last bracket at or before `end`
pub(crate) fn matching_open(tokens: &[Token<'_>], end: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (ind, token) in tokens.get(..=end)?.iter().enumerate().rev() {
        if token.is_close() {
            depth += 1;
        } else if token.is_open() {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(ind);
            }
        }
    }
    None
}
