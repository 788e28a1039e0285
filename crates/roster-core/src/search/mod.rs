//! Search model - query parsing, match classification and relevance ranking
//!
//! [`ranking`] defines what matches, how it scores and in which order results
//! come back. Backends either run [`rank`] directly or reproduce the same
//! rules in SQL over text folded with [`fold`], so case-insensitive matching
//! never depends on a database locale.

mod query;
mod ranking;
mod suggestions;

pub use query::{PopularityFilter, SearchFilters, SearchQuery, SearchType};
pub use ranking::{paginate, rank, score, MatchType, RankedCelebrity, SearchCandidate};
pub use suggestions::{merge_suggestions, MIN_SUGGESTION_CHARS};

/// Lowercase `text` for case-insensitive matching.
///
/// Stored search columns and query needles both go through this, so a
/// substring test on folded text agrees with [`contains_ci`].
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Case-insensitive substring test used by every matching rule
pub fn contains_ci(haystack: &str, needle_folded: &str) -> bool {
    fold(haystack).contains(needle_folded)
}
