//! Small string utilities shared by the lints and completion documentation.

/// Simple edit distance for fuzzy matching (Levenshtein).
///
/// Meant for small inputs such as kind and field names.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Closest candidate within `max_distance`. Ties go to the earliest candidate.
pub fn find_similar<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    max_distance: usize,
) -> Option<&'a str> {
    candidates
        .into_iter()
        .map(|c| (c, edit_distance(name, c)))
        .filter(|(_, d)| *d <= max_distance)
        .min_by_key(|(_, d)| *d)
        .map(|(c, _)| c)
}

/// Format a list of items for display, truncating if too long.
pub fn format_list<'a>(items: impl IntoIterator<Item = &'a str>, max_items: usize) -> String {
    let items: Vec<_> = items.into_iter().collect();
    let shown: Vec<_> = items
        .iter()
        .take(max_items)
        .map(|s| format!("`{}`", s))
        .collect();

    if items.len() <= max_items {
        shown.join(", ")
    } else {
        format!(
            "{}, ... ({} more)",
            shown.join(", "),
            items.len() - max_items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("identifer", "identifier"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn similar_names() {
        let candidates = ["identifier", "integer", "string"];
        assert_eq!(find_similar("identifer", candidates, 2), Some("identifier"));
        assert_eq!(find_similar("strin", candidates, 2), Some("string"));
        assert_eq!(find_similar("xyz", candidates, 2), None);
    }

    #[test]
    fn list_truncation() {
        assert_eq!(format_list([""; 0], 3), "");
        assert_eq!(format_list(["a", "b"], 3), "`a`, `b`");
        assert_eq!(format_list(["a", "b", "c", "d"], 2), "`a`, `b`, ... (2 more)");
    }
}
