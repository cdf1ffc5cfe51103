//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This mirrors `f64::rem_euclid` from the std library for any `Float`, as
/// num is missing it. Due to floating point round-off the result can equal
/// `rhs.abs()` when `lhs` is a tiny negative number.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

/// Wrap an angle into the range [-pi, pi).
///
/// Angles are wrapped with a floored modulus, so an input of exactly `pi`
/// maps to `-pi`.
pub fn wrap_to_pi<T>(angle: T) -> T
where
    T: Float
{
    let pi_t: T = T::from(std::f64::consts::PI).unwrap();
    let tau_t: T = T::from(std::f64::consts::TAU).unwrap();

    rem_euclid(angle + pi_t, tau_t) - pi_t
}

/// Get the signed angular difference `to - from`, wrapped into [-pi, pi).
pub fn ang_diff<T>(from: T, to: T) -> T
where
    T: Float
{
    wrap_to_pi(to - from)
}

#[cfg(test)]
mod test {
    use super::*;

    const PI: f64 = std::f64::consts::PI;
    const TAU: f64 = std::f64::consts::TAU;

    #[test]
    fn test_rem_euclid() {
        assert_eq!(rem_euclid(7f64, 4f64), 3f64);
        assert_eq!(rem_euclid(-1f64, 4f64), 3f64);
        assert_eq!(rem_euclid(0f64, TAU), 0f64);
    }

    #[test]
    fn test_wrap_to_pi() {
        assert!((wrap_to_pi(0.5f64) - 0.5).abs() < 1e-12);
        assert!((wrap_to_pi(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_to_pi(-TAU - 0.5) + 0.5).abs() < 1e-12);
        assert!((wrap_to_pi(1.5 * PI) + 0.5 * PI).abs() < 1e-12);
        assert_eq!(wrap_to_pi(PI), -PI);
    }

    #[test]
    fn test_ang_diff() {
        assert!((ang_diff(0.1f64, 0.3) - 0.2).abs() < 1e-12);
        assert!((ang_diff(3.0f64, -3.0) - (TAU - 6.0)).abs() < 1e-12);
    }
}
