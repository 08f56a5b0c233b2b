//! Candidate scoring and best-match selection.
//!
//! The resolver is an explicit object: threshold and similarity function are
//! injected at construction, so tests can swap in a deterministic scorer.

use std::fmt;
use std::sync::Arc;

use crate::enrichment::domain::{ArtistRecord, MatchCandidate};

/// Default acceptance threshold. A candidate must score strictly above this.
pub const DEFAULT_THRESHOLD: u8 = 85;

/// Similarity function: (query, candidate name) -> 0..=100.
pub type Scorer = Arc<dyn Fn(&str, &str) -> u8 + Send + Sync>;

/// Picks the best search hit for a query name.
#[derive(Clone)]
pub struct MatchResolver {
    threshold: u8,
    scorer: Scorer,
}

impl fmt::Debug for MatchResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResolver")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl Default for MatchResolver {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, Arc::new(similarity_ratio))
    }
}

impl MatchResolver {
    pub fn new(threshold: u8, scorer: Scorer) -> Self {
        Self { threshold, scorer }
    }

    /// Resolver with the default scorer and a custom threshold.
    pub fn with_threshold(threshold: u8) -> Self {
        Self::new(threshold, Arc::new(similarity_ratio))
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Score every candidate against `query_name`, in input order.
    pub fn score_all(&self, query_name: &str, records: &[ArtistRecord]) -> Vec<MatchCandidate> {
        records
            .iter()
            .map(|r| MatchCandidate {
                id: r.id.clone(),
                name: r.name.clone(),
                score: (self.scorer)(query_name, &r.name).min(100),
            })
            .collect()
    }

    /// Select the best candidate scoring strictly above the threshold.
    ///
    /// Ties keep the first candidate seen. `None` means "no strong match",
    /// which callers must not treat as an error.
    pub fn select_best(&self, query_name: &str, records: &[ArtistRecord]) -> Option<MatchCandidate> {
        let mut best: Option<MatchCandidate> = None;
        let mut highest = 0u8;

        for candidate in self.score_all(query_name, records) {
            if candidate.score > highest && candidate.score > self.threshold {
                highest = candidate.score;
                best = Some(candidate);
            }
        }

        best
    }
}

/// Case-insensitive similarity ratio in 0..=100.
///
/// Based on indel distance (insertions and deletions only), so
/// `ratio = (len_a + len_b - distance) / (len_a + len_b)`.
pub fn similarity_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();

    if total == 0 {
        return 100;
    }

    let distance = indel_distance(&a, &b);
    let ratio = (total - distance) as f64 / total as f64;
    // Halves round to even
    (ratio * 100.0).round_ties_even() as u8
}

/// Edit distance counting only insertions and deletions.
fn indel_distance(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of a full matrix
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr: Vec<usize> = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            curr[j] = if a[i - 1] == b[j - 1] {
                prev[j - 1]
            } else {
                (prev[j] + 1).min(curr[j - 1] + 1)
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(names: &[(&str, &str)]) -> Vec<ArtistRecord> {
        names
            .iter()
            .map(|(id, name)| ArtistRecord::new(*id, *name))
            .collect()
    }

    /// Scorer that reads the score straight out of the candidate name, e.g. "x-95".
    fn fixed_scorer() -> Scorer {
        Arc::new(|_query: &str, name: &str| {
            name.rsplit('-')
                .next()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0)
        })
    }

    #[test]
    fn test_similarity_identical_and_case() {
        assert_eq!(similarity_ratio("Tool", "Tool"), 100);
        assert_eq!(similarity_ratio("TOOL", "tool"), 100);
        assert_eq!(similarity_ratio("", ""), 100);
    }

    #[test]
    fn test_similarity_known_values() {
        // common subsequence "ittn", 13 chars total
        assert_eq!(similarity_ratio("kitten", "sitting"), 62);
        assert_eq!(similarity_ratio("abc", ""), 0);
        assert!(similarity_ratio("completely different", "nothing alike") < 50);
    }

    #[test]
    fn test_similarity_halves_round_to_even() {
        // 2 of 16 chars shared: 12.5
        assert_eq!(similarity_ratio("a", "abcdefghijklmno"), 12);
        // 10 of 16: 62.5
        assert_eq!(similarity_ratio("abcde", "abcdefghijk"), 62);
        // 14 of 16: 87.5
        assert_eq!(similarity_ratio("abcdefg", "abcdefghi"), 88);
    }

    #[test]
    fn test_select_best_ties_keep_first() {
        let resolver = MatchResolver::new(DEFAULT_THRESHOLD, fixed_scorer());
        let candidates = records(&[("a", "a-90"), ("b", "b-95"), ("c", "c-95")]);

        let best = resolver.select_best("anything", &candidates).unwrap();

        assert_eq!(best.id, "b");
        assert_eq!(best.score, 95);
    }

    #[test]
    fn test_select_best_threshold_is_strict() {
        let resolver = MatchResolver::new(DEFAULT_THRESHOLD, fixed_scorer());
        let candidates = records(&[("a", "a-85"), ("b", "b-10")]);

        assert!(resolver.select_best("anything", &candidates).is_none());
    }

    #[test]
    fn test_select_best_empty() {
        let resolver = MatchResolver::default();
        assert!(resolver.select_best("Tool", &[]).is_none());
    }

    #[test]
    fn test_select_best_with_default_scorer() {
        let resolver = MatchResolver::default();
        let candidates = records(&[
            ("tool-tribute", "Tool Tribute Band"),
            ("tool", "TOOL"),
            ("other", "Toto"),
        ]);

        let best = resolver.select_best("Tool", &candidates).unwrap();

        assert_eq!(best.id, "tool");
        assert_eq!(best.score, 100);
    }
}
