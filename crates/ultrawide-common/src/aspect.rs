//! Aspect ratio type and tolerant comparison.
//!
//! Display sizes reported by the host jitter in the last few bits between
//! frames, so aspect ratios are never compared with `==`. [`approx_eq`] uses a
//! relative tolerance with a tiny absolute floor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AspectError;

/// Relative tolerance for aspect comparisons.
const APPROX_RELATIVE: f32 = 1.0e-6;

/// Absolute floor: eight times the smallest positive subnormal `f32`.
const APPROX_FLOOR: f32 = 8.0 * 1e-45;

/// Returns true when `a` and `b` are equal within floating-point noise.
#[must_use]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (b - a).abs() < (APPROX_RELATIVE * a.abs().max(b.abs())).max(APPROX_FLOOR)
}

/// Width divided by height of a display or surface.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct AspectRatio(f32);

impl AspectRatio {
    /// Classic 4:3.
    pub const CLASSIC_4_3: Self = Self(4.0 / 3.0);
    /// Standard widescreen 16:9.
    pub const WIDESCREEN_16_9: Self = Self(16.0 / 9.0);
    /// Ultrawide 21:9.
    pub const ULTRAWIDE_21_9: Self = Self(21.0 / 9.0);
    /// Super ultrawide 32:9.
    pub const SUPER_ULTRAWIDE_32_9: Self = Self(32.0 / 9.0);

    /// Creates an aspect ratio, rejecting zero, negative, NaN and infinite values.
    pub fn new(value: f32) -> Result<Self, AspectError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(AspectError::Degenerate(value))
        }
    }

    /// Computes `width / height`.
    pub fn from_size(width: f32, height: f32) -> Result<Self, AspectError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(AspectError::DegenerateSize { width, height });
        }
        Self::new(width / height)
    }

    /// Raw ratio value.
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }

    /// Tolerant comparison, see [`approx_eq`].
    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        approx_eq(self.0, other.0)
    }
}

impl TryFrom<f32> for AspectRatio {
    type Error = AspectError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AspectRatio> for f32 {
    fn from(aspect: AspectRatio) -> Self {
        aspect.0
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::de::value::{Error as ValueError, F32Deserializer};
    use serde::de::IntoDeserializer;

    fn deserialize(value: f32) -> Result<AspectRatio, ValueError> {
        let deserializer: F32Deserializer<ValueError> = value.into_deserializer();
        AspectRatio::deserialize(deserializer)
    }

    #[test]
    fn test_rejects_degenerate_values() {
        assert!(AspectRatio::new(0.0).is_err());
        assert!(AspectRatio::new(-1.5).is_err());
        assert!(AspectRatio::new(f32::NAN).is_err());
        assert!(AspectRatio::new(f32::INFINITY).is_err());
        assert!(AspectRatio::new(1.0).is_ok());
    }

    #[test]
    fn test_from_size_zero_height() {
        assert_eq!(
            AspectRatio::from_size(1920.0, 0.0),
            Err(AspectError::DegenerateSize {
                width: 1920.0,
                height: 0.0
            })
        );
    }

    #[test]
    fn test_from_size() {
        let aspect = AspectRatio::from_size(1920.0, 1080.0).expect("valid size");
        assert!(aspect.approx_eq(AspectRatio::WIDESCREEN_16_9));
    }

    #[test]
    fn test_jitter_is_equal() {
        assert!(approx_eq(1.777_777_1, 1.777_777_3));
    }

    #[test]
    fn test_distinct_ratios_differ() {
        assert!(!approx_eq(1.77, 1.78));
        assert!(!approx_eq(0.0, 1.777));
        assert!(!AspectRatio::WIDESCREEN_16_9.approx_eq(AspectRatio::ULTRAWIDE_21_9));
    }

    #[test]
    fn test_deserialize_accepts_valid_ratio() {
        let aspect = deserialize(2.0).expect("valid ratio");
        assert_eq!(aspect.get(), 2.0);
    }

    #[test]
    fn test_deserialize_rejects_degenerate_ratio() {
        assert!(deserialize(0.0).is_err());
        assert!(deserialize(-1.0).is_err());
        assert!(deserialize(f32::NAN).is_err());
    }

    #[test]
    fn test_zero_equals_zero() {
        assert!(approx_eq(0.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_approx_eq_is_symmetric(a in 0.1f32..10.0, b in 0.1f32..10.0) {
            prop_assert_eq!(approx_eq(a, b), approx_eq(b, a));
        }

        #[test]
        fn prop_approx_eq_is_reflexive(a in 0.01f32..100.0) {
            prop_assert!(approx_eq(a, a));
        }
    }
}
