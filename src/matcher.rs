//! Substring matching over catalog candidates
//!
//! Filtering is deliberately plain: case-insensitive substring containment
//! on the identifier, empty query matches everything, original order
//! preserved. No fuzzy ranking, no anchoring.

/// Anything filterable by its identifier
pub trait Candidate {
    /// The key the query is matched against
    fn identifier(&self) -> &str;
}

/// Return the indices of candidates whose identifier contains the query
///
/// The query is trimmed and lowercased before matching. An empty or
/// whitespace-only query matches every candidate. Relative order of the
/// input is preserved.
#[must_use]
pub fn matching_indices<C: Candidate>(query: &str, candidates: &[C]) -> Vec<usize> {
    let query = query.trim().to_lowercase();
    candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| query.is_empty() || c.identifier().to_lowercase().contains(&query))
        .map(|(idx, _)| idx)
        .collect()
}
