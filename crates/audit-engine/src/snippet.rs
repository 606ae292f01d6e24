//! Context snippet extraction around matched keywords

use regex::Regex;

/// Characters of context captured on each side of a matched keyword.
pub const CONTEXT_WINDOW: usize = 30;

/// Compile the context-window pattern for a keyword.
///
/// Case-insensitive, dot-matches-newline: the window may span line
/// breaks in the source document. Leftmost-match semantics pin the
/// snippet to the first occurrence of the keyword.
pub fn compile_context_pattern(keyword: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        "(?is).{{0,{w}}}{kw}.{{0,{w}}}",
        w = CONTEXT_WINDOW,
        kw = regex::escape(keyword)
    ))
}

/// Extract a trimmed snippet around the first keyword occurrence in
/// the original-case text.
///
/// The trigger decision is made on a lowercased copy, so a miss here
/// is an encoding edge case; it yields a synthetic marker instead of
/// an excerpt.
pub fn extract_snippet(text: &str, keyword: &str, pattern: &Regex) -> String {
    match pattern.find(text) {
        Some(m) => m.as_str().trim().to_string(),
        None => format!("[... {} ...]", keyword),
    }
}
