//! Sample moments and the moment-matching starting-value rule.
//!
//! The Student's t family with `nu` degrees of freedom has kurtosis
//! `3 + 6/(nu − 4)`. Solving for `nu` given a sample kurtosis `k` gives
//! `nu = (4k − 6)/(k − 3)`, which is only informative when the sample is
//! clearly fat-tailed; otherwise a moderate default of 12 is used.
use ndarray::ArrayView1;

/// Kurtosis above which the moment-matching rule is trusted.
pub const KURTOSIS_THRESHOLD: f64 = 3.75;

/// Degrees of freedom used when the sample is not clearly fat-tailed.
pub const DEFAULT_DEGREES_OF_FREEDOM: f64 = 12.0;

/// Floor applied to every degrees-of-freedom starting value.
pub const MIN_DEGREES_OF_FREEDOM_GUESS: f64 = 4.0;

/// Pearson (non-excess) sample kurtosis `m4 / m2²` with biased central
/// moments.
///
/// A normal sample gives values near 3. Empty or constant samples produce
/// NaN, which callers treat as "no evidence of fat tails".
pub fn sample_kurtosis(resids: ArrayView1<'_, f64>) -> f64 {
    let n = resids.len() as f64;
    let mean = resids.sum() / n;
    let (m2, m4) = resids.iter().fold((0.0, 0.0), |(m2, m4), &x| {
        let d2 = (x - mean) * (x - mean);
        (m2 + d2, m4 + d2 * d2)
    });
    let (m2, m4) = (m2 / n, m4 / n);
    m4 / (m2 * m2)
}

/// Moment-matching degrees-of-freedom guess shared by Student's t and
/// skew-t starting values.
///
/// Returns `max((4k − 6)/(k − 3), 4)` when `k > 3.75`, else `12`.
///
/// ```rust
/// # use ndarray::array;
/// # use rust_volatility::volatility::core::moments::degrees_of_freedom_guess;
/// let flat = array![-1.0, 1.0, -1.0, 1.0];
/// assert_eq!(degrees_of_freedom_guess(flat.view()), 12.0);
/// ```
pub fn degrees_of_freedom_guess(resids: ArrayView1<'_, f64>) -> f64 {
    let k = sample_kurtosis(resids);
    let guess = if k > KURTOSIS_THRESHOLD {
        (4.0 * k - 6.0) / (k - 3.0)
    } else {
        DEFAULT_DEGREES_OF_FREEDOM
    };
    let guess = guess.max(MIN_DEGREES_OF_FREEDOM_GUESS);
    log::debug!("sample kurtosis {k:.4} gives degrees-of-freedom starting value {guess:.4}");
    guess
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `sample_kurtosis` against hand-computed values.
    // - Both branches of `degrees_of_freedom_guess` and the floor at 4.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check the kurtosis of a symmetric two-point sample.
    //
    // Given
    // -----
    // - [-1, 1, -1, 1]: m2 = 1, m4 = 1.
    //
    // Expect
    // ------
    // - Kurtosis exactly 1.
    fn sample_kurtosis_of_two_point_sample_is_one() {
        let x = array![-1.0, 1.0, -1.0, 1.0];
        assert_relative_eq!(sample_kurtosis(x.view()), 1.0, epsilon = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // Check a heavy-tailed sample against the closed form.
    //
    // Given
    // -----
    // - Eight zeros plus ±2: mean 0, m2 = 0.8, m4 = 3.2, k = 5.
    //
    // Expect
    // ------
    // - k = 5 and guess = (20 − 6)/(5 − 3) = 7.
    fn degrees_of_freedom_guess_uses_moment_rule_for_fat_tails() {
        // Arrange
        let x = array![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, -2.0];

        // Act
        let k = sample_kurtosis(x.view());
        let guess = degrees_of_freedom_guess(x.view());

        // Assert
        assert_relative_eq!(k, 5.0, epsilon = 1e-12);
        assert_relative_eq!(guess, 7.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Very large kurtosis drives the rule toward 4, which is also the floor.
    //
    // Given
    // -----
    // - A long run of zeros with a single spike (k ≫ 3.75).
    //
    // Expect
    // ------
    // - The guess is ≥ 4 and close to 4.
    fn degrees_of_freedom_guess_is_floored_at_four() {
        let mut v = vec![0.0; 999];
        v.push(10.0);
        let x = ndarray::Array1::from(v);
        let guess = degrees_of_freedom_guess(x.view());
        assert!(guess >= 4.0);
        assert!(guess < 4.01, "got {guess}");
    }

    #[test]
    // Purpose
    // -------
    // Degenerate samples fall back to the default.
    //
    // Given
    // -----
    // - A constant series (m2 = 0 → NaN kurtosis) and an empty series.
    //
    // Expect
    // ------
    // - Both guesses equal 12.
    fn degrees_of_freedom_guess_falls_back_on_degenerate_samples() {
        let constant = array![0.5, 0.5, 0.5];
        let empty = ndarray::Array1::<f64>::zeros(0);
        assert_eq!(degrees_of_freedom_guess(constant.view()), DEFAULT_DEGREES_OF_FREEDOM);
        assert_eq!(degrees_of_freedom_guess(empty.view()), DEFAULT_DEGREES_OF_FREEDOM);
    }
}
