//! Edit-distance ranking and "did you mean" suggestions.

use crate::catalog::DocEntry;
use rapidfuzz::distance::levenshtein;

/// Classic Levenshtein distance (insert, delete, substitute), counted in chars.
pub fn distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// The candidate closest to `query`, if any is within `max_distance`.
///
/// Ties go to the candidate encountered first.
pub fn closest_match<'a, I>(query: &str, candidates: I, max_distance: usize) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let scorer = levenshtein::BatchComparator::new(query.chars());
    let mut best: Option<(&'a str, usize)> = None;

    for candidate in candidates {
        let cutoff = best.map_or(max_distance, |(_, d)| d.saturating_sub(1));
        if best.is_some_and(|(_, d)| d == 0) {
            break;
        }
        let args = levenshtein::Args::default().score_cutoff(cutoff);
        if let Some(d) = scorer.distance_with_args(candidate.chars(), &args) {
            best = Some((candidate, d));
        }
    }

    best.map(|(candidate, _)| candidate)
}

/// Stable sort of entries by ascending distance from `query` to their normalized name.
pub fn rank_by_distance(query: &str, entries: &mut [&DocEntry]) {
    let scorer = levenshtein::BatchComparator::new(query.chars());
    entries.sort_by_cached_key(|entry| scorer.distance(entry.clean_name().chars()));
}
