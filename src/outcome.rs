//! Outcome index computation and one-hot encoding.
//!
//! A rank trial's outcome is the ordered subset of reference positions the
//! subject selected. `as_sparse_outcome` maps that ordered subset to a unique
//! integer in a fixed-size outcome space by ranking it among all ordered
//! k-permutations of `0..n_reference` in lexicographic order, so selecting
//! references in presented order (`[0]`, `[0, 1]`, ...) maps to index 0. The
//! space size is `n_reference! / (n_reference - n_select)!`: 56 for the
//! 8-reference/2-select configuration, 2 for 2-reference/1-select.

use crate::errors::FormatError;
use crate::types::OutcomeIndex;

/// Number of ordered k-permutations of `n` items, `n! / (n - k)!`.
///
/// Returns 0 when more selections are requested than items exist.
pub fn n_outcome(n_reference: usize, n_select: usize) -> usize {
    (0..n_select).fold(1, |acc, taken| acc * n_reference.saturating_sub(taken))
}

/// Rank an ordered list of selection positions within the outcome space.
///
/// `positions` holds 0-based indices into the ordered reference set, in
/// selection order. Positions must be distinct and in `[0, n_reference)`;
/// violations report `IndexOutOfRange`.
pub fn as_sparse_outcome(
    n_reference: usize,
    positions: &[usize],
) -> Result<OutcomeIndex, FormatError> {
    let mut remaining: Vec<usize> = (0..n_reference).collect();
    let mut index = 0usize;
    for (taken, &position) in positions.iter().enumerate() {
        let slot = remaining
            .iter()
            .position(|&candidate| candidate == position)
            .ok_or(FormatError::IndexOutOfRange {
                index: position,
                width: n_reference,
            })?;
        // Permutations of the remaining items that fill the remaining slots.
        let suffix_count = n_outcome(remaining.len() - 1, positions.len() - taken - 1);
        index += slot * suffix_count;
        remaining.remove(slot);
    }
    Ok(index as OutcomeIndex)
}

/// One-hot encode `index` into a vector of length `width`.
///
/// Exactly one entry is 1.0; every other entry is 0.0. An index outside
/// `[0, width)` is an encoder misuse and reports `IndexOutOfRange`.
pub fn one_hot(index: usize, width: usize) -> Result<Vec<f32>, FormatError> {
    if index >= width {
        return Err(FormatError::IndexOutOfRange { index, width });
    }
    let mut encoded = vec![0.0; width];
    encoded[index] = 1.0;
    Ok(encoded)
}
