//! Typo suggestions for unrecognized keys.

/// Largest edit distance still offered as a suggestion.
pub const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Closest candidate within [`MAX_SUGGESTION_DISTANCE`] edits, if any.
///
/// An exact match is not a suggestion. Ties keep the earlier candidate.
pub fn suggest<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, usize)> = None;
    for candidate in candidates {
        let dist = levenshtein(input, candidate);
        if dist == 0 || dist > MAX_SUGGESTION_DISTANCE {
            continue;
        }
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((candidate, dist));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Edit distance over Unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("jobs", "jobs"), 0);
        assert_eq!(levenshtein("jbos", "jobs"), 2);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("verbos", "verbose"), 1);
    }

    #[test]
    fn suggests_closest_within_two_edits() {
        let candidates = ["jobs", "rustc", "rustflags", "target"];
        assert_eq!(suggest("jbos", candidates), Some("jobs"));
        assert_eq!(suggest("rustflag", candidates), Some("rustflags"));
        assert_eq!(suggest("completely-different", candidates), None);
    }

    #[test]
    fn exact_match_is_not_a_suggestion() {
        assert_eq!(suggest("jobs", ["jobs"]), None);
    }
}
