//! Autocomplete merging

use std::collections::HashSet;

/// Queries shorter than this (in characters, after trimming) get no suggestions
pub const MIN_SUGGESTION_CHARS: usize = 2;

/// Merge suggestion sources in priority order.
///
/// Duplicates are dropped case-insensitively, keeping the first spelling
/// seen, and the result is capped at `limit`.
pub fn merge_suggestions<I>(sources: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut seen = HashSet::new();
    sources
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .take(limit)
        .collect()
}
