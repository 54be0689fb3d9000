// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translate a typed query into an ordered-fragment regular expression.
//!
//! `"foo bar"` becomes `foo.*bar`: every token must appear literally, in the
//! order typed, with anything in between.

/// Separator placed between escaped tokens
pub const FRAGMENT_JOIN: &str = ".*";

/// Build the fd search regex for `pattern`, or `None` when it has no tokens
pub fn fragment_regex(pattern: &str) -> Option<String> {
    let tokens: Vec<String> = pattern.split_whitespace().map(regex::escape).collect();
    if tokens.is_empty() {
        return None;
    }
    Some(tokens.join(FRAGMENT_JOIN))
}
