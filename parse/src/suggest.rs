//! "Did you mean" suggestions.
//!
//! A candidate is suggested when its Levenshtein distance to the supplied
//! value is at most [`MAX_SUGGESTION_DISTANCE`] and smaller than the
//! candidate's own length, so a one-letter choice is never "close" to an
//! unrelated word. Ties go to the candidate declared first.

/// Largest edit distance that still yields a suggestion.
pub const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Levenshtein distance between two strings, by `char`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Returns the closest candidate to `input`, if one is close enough.
pub fn closest<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    if input.is_empty() {
        return None;
    }
    let mut best: Option<(usize, &'a str)> = None;
    for candidate in candidates {
        let distance = levenshtein(input, candidate);
        if distance > MAX_SUGGESTION_DISTANCE || distance >= candidate.chars().count() {
            continue;
        }
        if best.is_none_or(|(best_distance, _)| distance < best_distance) {
            best = Some((distance, candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}
