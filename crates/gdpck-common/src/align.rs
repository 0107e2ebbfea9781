//! Alignment arithmetic.

/// Number of bytes needed to round `n` up to a multiple of `alignment`.
///
/// The result is always in `0..alignment`.
///
/// # Example
///
/// ```
/// use gdpck_common::padding;
///
/// assert_eq!(padding(4, 11), 1);
/// assert_eq!(padding(4, 12), 0);
/// ```
#[inline]
pub const fn padding(alignment: usize, n: usize) -> usize {
    (alignment - n % alignment) % alignment
}
