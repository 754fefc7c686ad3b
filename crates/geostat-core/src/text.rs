// crates/geostat-core/src/text.rs

//! Name normalization helpers shared by the loader and the merger.

/// Canonical form of a region label: surrounding whitespace trimmed and
/// upper-cased (Unicode aware, so `Область` and `ОБЛАСТЬ` collide).
///
/// ```rust
/// use geostat_core::text::normalize;
///
/// assert_eq!(normalize("  Г.Астана "), "Г.АСТАНА");
/// assert_eq!(normalize("Abai Region"), "ABAI REGION");
/// ```
pub fn normalize(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Case-insensitive substring test used for keyword classification.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Transliterates to ASCII, lowercases and keeps only alphanumerics.
///
/// `Г.АСТАНА` folds to `gastana`, `Astana City` to `astanacity`. Only used to
/// suggest near matches for unresolved map regions, never for joining.
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Length of the longest common substring of two ASCII keys.
pub(crate) fn common_run(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev = vec![0usize; b.len() + 1];
    let mut best = 0;
    for &x in a {
        let mut cur = vec![0usize; b.len() + 1];
        for (j, &y) in b.iter().enumerate() {
            if x == y {
                cur[j + 1] = prev[j] + 1;
                best = best.max(cur[j + 1]);
            }
        }
        prev = cur;
    }
    best
}
