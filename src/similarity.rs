//! # String Similarity
//!
//! Normalized string similarity for ingredient matching, implemented as the
//! Ratcliff/Obershelp ratio: `2 * M / (len(a) + len(b))` where `M` is the
//! total number of characters in recursively-found longest matching blocks.
//!
//! The formula is pinned: the matcher's 0.7 confidence threshold and 0.3
//! suggestion floor are calibrated against this exact ratio, so it must stay
//! bit-for-bit reproducible. Do not swap in a different similarity metric
//! without recalibrating those thresholds. No junk heuristics are applied;
//! ingredient names are short.

use std::collections::HashMap;

/// Compute the Ratcliff/Obershelp similarity ratio between two strings
///
/// Returns a value in `[0.0, 1.0]`; `1.0` means identical (two empty strings
/// compare as identical), `0.0` means no characters in common. Comparison is
/// case-sensitive; callers lower-case their inputs first.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let total = a_chars.len() + b_chars.len();
    if total == 0 {
        return 1.0;
    }

    let matched = matching_char_count(&a_chars, &b_chars);
    2.0 * matched as f64 / total as f64
}

/// Total length of all matching blocks between `a` and `b`
///
/// Finds the longest matching block, then recurses (via an explicit stack) on
/// the pieces to its left and right. Tie-breaking picks the earliest block in
/// `a`, then the earliest in `b`, which keeps the result deterministic.
fn matching_char_count(a: &[char], b: &[char]) -> usize {
    // Index of positions for every character in b
    let mut b_positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b_positions.entry(ch).or_default().push(j);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &b_positions, a_lo, a_hi, b_lo, b_hi);
        if size > 0 {
            matched += size;
            pending.push((a_lo, i, b_lo, j));
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// Find the longest matching block within `a[a_lo..a_hi]` and `b[b_lo..b_hi]`
///
/// Returns `(i, j, size)` such that `a[i..i + size] == b[j..j + size]`. Uses a
/// rolling map from b-index to run length, so each window is scanned in
/// O(|a-window| * occupancy) time.
fn longest_match(
    a: &[char],
    b_positions: &HashMap<char, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let mut best_i = a_lo;
    let mut best_j = b_lo;
    let mut best_size = 0;

    // run_lengths[j] = length of the match ending at a[i], b[j]
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();

    for i in a_lo..a_hi {
        let mut new_run_lengths: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b_positions.get(&a[i]) {
            for &j in positions {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }
                let k = if j > 0 {
                    run_lengths.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                new_run_lengths.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        run_lengths = new_run_lengths;
    }

    (best_i, best_j, best_size)
}
