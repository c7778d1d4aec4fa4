// src/picker/filter.rs
// Candidate filtering for the dropdown.

/// Names that start with `segment`, ignoring case, in their original order.
pub(super) fn filter_candidates(names: &[String], segment: &str) -> Vec<String> {
    let query = segment.to_lowercase();
    names
        .iter()
        .filter(|name| name.to_lowercase().starts_with(&query))
        .cloned()
        .collect()
}

/// True when exactly one candidate is left and it *is* the segment.
///
/// Two names differing only in case both survive the prefix filter, so they
/// never count as an exact match and the dropdown stays open.
pub(super) fn is_exact_unique_match(candidates: &[String], segment: &str) -> bool {
    match candidates {
        [only] => only.to_lowercase() == segment.to_lowercase(),
        _ => false,
    }
}
