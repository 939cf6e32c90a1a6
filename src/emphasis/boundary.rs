//! Per-word emphasis boundary
//!
//! Index `i` of a word is emphasized when it falls inside the leading
//! `ceil(len * fraction)` characters, or when the character is an ASCII
//! capital letter.

/// Fraction used when the configured value is unusable
pub const DEFAULT_EMPHASIS_FRACTION: f64 = 0.5;

/// Clamp a fraction into `[0, 1]`; NaN falls back to the default
pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        DEFAULT_EMPHASIS_FRACTION
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Number of leading characters emphasized by the fraction rule
pub fn fraction_boundary(len: usize, fraction: f64) -> usize {
    let boundary = (len as f64 * clamp_fraction(fraction)).ceil() as usize;
    boundary.min(len)
}

/// Indices of `word` to emphasize, ascending
pub fn emphasized_indices(word: &str, fraction: f64) -> impl Iterator<Item = usize> + '_ {
    let boundary = fraction_boundary(word.len(), fraction);
    word.bytes()
        .enumerate()
        .filter(move |&(i, b)| i < boundary || b.is_ascii_uppercase())
        .map(|(i, _)| i)
}
