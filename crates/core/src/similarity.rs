//! Title similarity scoring.
//!
//! Scores how close a candidate title is to a free-text query using a
//! normalized Levenshtein distance. Near-misses (typos, pluralization,
//! truncated titles) degrade smoothly instead of dropping to zero.

/// Similarity of two strings in `[0.0, 1.0]`, case-insensitive.
///
/// `1.0` means identical after lowercasing; `0.0` means nothing in common
/// or exactly one side is empty. Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let max_len = a_chars.len().max(b_chars.len());
    let distance = levenshtein_distance(&a_chars, &b_chars);

    (max_len - distance) as f64 / max_len as f64
}

/// Levenshtein edit distance with unit costs.
///
/// Full table rather than two rows; titles are short.
fn levenshtein_distance(a: &[char], b: &[char]) -> usize {
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, val) in matrix[0].iter_mut().enumerate() {
        *val = j;
    }

    for (i, a_char) in a.iter().enumerate() {
        for (j, b_char) in b.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            matrix[i + 1][j + 1] = (matrix[i][j + 1] + 1)
                .min(matrix[i + 1][j] + 1)
                .min(matrix[i][j] + cost);
        }
    }

    matrix[a_len][b_len]
}
