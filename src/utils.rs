//! Utilities module.

use num_traits::Float;

/// Fast floating point minimum.  This function matches the semantics of
///
/// ```no_compile
/// if x < y { x } else { y }
/// ```
///
/// which has efficient instruction sequences on many platforms (1 instruction on x86).  For most
/// values, it matches the semantics of `x.min(y)`; the special cases are:
///
/// ```text
/// min(-0.0, +0.0); +0.0
/// min(+0.0, -0.0): -0.0
/// min( NaN,  1.0):  1.0
/// min( 1.0,  NaN):  NaN
/// ```
///
/// Note: This exists because [`std::cmp::min`] requires Ord which floating point types do not satisfy
#[inline(always)]
pub fn fast_min<T: Float>(x: T, y: T) -> T {
    if x < y {
        x
    } else {
        y
    }
}

/// Fast floating point maximum.  This function matches the semantics of
///
/// ```no_compile
/// if x > y { x } else { y }
/// ```
///
/// which has efficient instruction sequences on many platforms (1 instruction on x86).  For most
/// values, it matches the semantics of `x.max(y)`; the special cases are:
///
/// ```text
/// max(-0.0, +0.0); +0.0
/// max(+0.0, -0.0): -0.0
/// max( NaN,  1.0):  1.0
/// max( 1.0,  NaN):  NaN
/// ```
///
/// Note: This exists because [`std::cmp::max`] requires Ord which floating point types do not satisfy
#[inline(always)]
pub fn fast_max<T: Float>(x: T, y: T) -> T {
    if x > y {
        x
    } else {
        y
    }
}

#[cfg(test)]
mod tests {
    use super::{fast_max, fast_min};

    #[test]
    fn test_fast_min_max_ordinary_values() {
        assert_eq!(fast_min(1.0f32, 2.0), 1.0);
        assert_eq!(fast_max(1.0f32, 2.0), 2.0);
        assert_eq!(fast_min(-3.0f64, -4.0), -4.0);
    }

    #[test]
    fn test_fast_min_max_nan_takes_second_argument() {
        assert_eq!(fast_min(f32::NAN, 1.0), 1.0);
        assert!(fast_min(1.0, f32::NAN).is_nan());
        assert_eq!(fast_max(f32::NAN, 1.0), 1.0);
        assert!(fast_max(1.0, f32::NAN).is_nan());
    }
}
