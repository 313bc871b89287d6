//! Cosine similarity with the edge cases pinned down.

use vaultsense_core::constants::SCORE_DECIMALS;

/// Cosine similarity of `a` and `b`, rounded to three decimals.
///
/// Returns `0.0` when either slice is empty, when the lengths differ, or
/// when either magnitude is zero. Accumulates in `f64`, so the result is
/// symmetric and `similarity(v, v) == 1.0` for any nonzero `v`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    round_score((dot / denom).clamp(-1.0, 1.0))
}

/// Same as [`cosine_similarity`], with absent vectors scoring `0.0`.
pub fn similarity_of(a: Option<&[f32]>, b: Option<&[f32]>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => cosine_similarity(a, b),
        _ => 0.0,
    }
}

/// Round half away from zero to three decimals.
pub fn round_score(score: f64) -> f64 {
    let scale = 10f64.powi(SCORE_DECIMALS);
    let rounded = (score * scale).round() / scale;
    // Avoid reporting -0.0.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_values() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]), -1.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 1.0]), 0.707);
    }

    #[test]
    fn self_similarity_is_one() {
        let v = [0.1f32, -0.7, 3.3, 1e-3];
        assert_eq!(cosine_similarity(&v, &v), 1.0);
    }

    #[test]
    fn degenerate_inputs_score_zero() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
        assert_eq!(similarity_of(None, Some(&[1.0])), 0.0);
        assert_eq!(similarity_of(Some(&[1.0]), None), 0.0);
        assert_eq!(similarity_of(Some(&[2.0]), Some(&[3.0])), 1.0);
    }

    #[test]
    fn large_magnitudes_stay_finite() {
        let big = [f32::MAX; 4];
        let r = cosine_similarity(&big, &big);
        assert!(r.is_finite());
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 0.0625 and 0.4375 are exact in binary, so x * 1000 lands on .5.
        assert_eq!(round_score(0.0625), 0.063);
        assert_eq!(round_score(-0.0625), -0.063);
        assert_eq!(round_score(0.4375), 0.438);
        assert_eq!(round_score(0.12345), 0.123);
        assert_eq!(round_score(-0.0004), 0.0);
        assert!(round_score(-0.0004).is_sign_positive());
    }
}
