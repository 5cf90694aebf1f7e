//! Typo-tolerant name matching for "did you mean" hints.

/// Largest edit distance still offered as a suggestion.
pub const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Levenshtein distance between two strings, counted over bytes.
///
/// # Examples
///
/// ```
/// use bevy_dev_console::core::edit_distance;
///
/// assert_eq!(edit_distance("heel", "heal"), 1);
/// assert_eq!(edit_distance("", "quit"), 4);
/// ```
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a = a.as_bytes();
    let b = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Pick the candidate closest to `name`, if any is within
/// [`MAX_SUGGESTION_DISTANCE`].
///
/// Ties go to the lexicographically smaller candidate. An exact match is
/// never suggested.
pub fn closest_match<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    candidates
        .into_iter()
        .filter(|candidate| *candidate != name)
        .map(|candidate| (edit_distance(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min()
        .map(|(_, candidate)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("heal", "heal"), 0);
        assert_eq!(edit_distance("heel", "heal"), 1);
        assert_eq!(edit_distance("hlep", "help"), 2);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
    }

    #[test]
    fn test_closest_match() {
        let names = ["help", "heal", "hide", "quit"];
        assert_eq!(closest_match("heel", names), Some("heal"));
        assert_eq!(closest_match("qiut", names), Some("quit"));
        assert_eq!(closest_match("teleport", names), None);
    }

    #[test]
    fn test_closest_match_tie_break() {
        // "hel" is one insertion away from both; the smaller name wins
        assert_eq!(closest_match("hel", ["help", "heal"]), Some("heal"));
    }

    #[test]
    fn test_exact_match_not_suggested() {
        assert_eq!(closest_match("help", ["help"]), None);
    }
}
