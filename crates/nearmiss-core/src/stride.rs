//! Anchor stride selection.

use crate::error::ProfileError;

/// Pick the anchor stride `k` for a series of length `n` and a query of length `m`.
///
/// `k` is the smallest power of two at or above `4 * m`, clamped to `n`, so a
/// scan makes roughly `n / (4m)` oracle calls. When `4 * m` exceeds `n` the
/// stride collapses to `n` and the scan has a single anchor at 0.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ProfileError::InvalidLength`] | `n == 0` or `m == 0` |
pub fn determine_k(n: usize, m: usize) -> Result<usize, ProfileError> {
    if n == 0 || m == 0 {
        return Err(ProfileError::InvalidLength { n, m });
    }
    let k = m
        .checked_mul(4)
        .and_then(usize::checked_next_power_of_two)
        .map_or(n, |p| p.min(n));
    Ok(k)
}
