//! Domain checks run before an elementary function evaluates its argument.

use crate::errors::{ADError, Result};

/// `ln` and `log_b` need a strictly positive argument.
pub fn check_log(x: f64) -> Result<()> {
    if x <= 0.0 {
        return Err(ADError::domain(x, "a logarithmic function (x > 0)"));
    }
    Ok(())
}

/// A logarithm base must exceed one.
pub fn check_log_base(base: f64) -> Result<()> {
    if !(base > 1.0) {
        return Err(ADError::domain(base, "a logarithm base (base > 1)"));
    }
    Ok(())
}

pub fn check_sqrt(x: f64) -> Result<()> {
    if x < 0.0 {
        return Err(ADError::domain(x, "sqrt (x >= 0)"));
    }
    Ok(())
}

/// Rejects points where `cos x` vanishes. `cos(π/2)` is about `6e-17` in
/// binary floating point, so anything within machine epsilon counts as zero.
pub fn check_tan(x: f64) -> Result<()> {
    if x.cos().abs() <= f64::EPSILON {
        return Err(ADError::domain(x, "tan (cos(x) != 0)"));
    }
    Ok(())
}

pub fn check_arcsin(x: f64) -> Result<()> {
    if x.abs() > 1.0 {
        return Err(ADError::domain(x, "arcsin [-1, 1]"));
    }
    Ok(())
}

pub fn check_arccos(x: f64) -> Result<()> {
    if x.abs() > 1.0 {
        return Err(ADError::domain(x, "arccos [-1, 1]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[rstest]
    #[case(1.0)]
    #[case(1e-300)]
    fn log_accepts_positive(#[case] x: f64) {
        assert!(check_log(x).is_ok());
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(-2.0)]
    fn log_rejects_non_positive(#[case] x: f64) {
        assert!(matches!(check_log(x), Err(ADError::DomainError { value, .. }) if value == x));
    }

    #[test]
    fn log_base_must_exceed_one() {
        assert!(check_log_base(1.0).is_err());
        assert!(check_log_base(0.5).is_err());
        assert!(check_log_base(f64::NAN).is_err());
        assert!(check_log_base(2.0).is_ok());
    }

    #[test]
    fn sqrt_allows_zero() {
        assert!(check_sqrt(0.0).is_ok());
        assert!(check_sqrt(-2.0).is_err());
    }

    #[rstest]
    #[case(FRAC_PI_2)]
    #[case(-FRAC_PI_2)]
    #[case(3.0 * FRAC_PI_2)]
    fn tan_rejects_odd_multiples_of_half_pi(#[case] x: f64) {
        assert!(check_tan(x).is_err());
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(PI)]
    fn tan_accepts_regular_points(#[case] x: f64) {
        assert!(check_tan(x).is_ok());
    }

    #[test]
    fn inverse_trig_bounds() {
        for x in [-1.0, 0.0, 1.0] {
            assert!(check_arcsin(x).is_ok());
            assert!(check_arccos(x).is_ok());
        }
        assert!(check_arcsin(2.0).is_err());
        assert!(check_arcsin(-2.0).is_err());
        assert!(check_arccos(-5.0).is_err());
        assert!(check_arccos(2.0).is_err());
    }
}
