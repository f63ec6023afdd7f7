//! Zero-removal guard for logarithmic SAR preprocessing.
//!
//! SAR intensity values at or below zero break the log-domain statistics the
//! pipeline relies on. This utility clamps everything below a floor up to
//! the floor; the automatic floor is a power of two tied to the smallest
//! positive value present, so the clamp stays far below the useful signal
//! range. Independent of the core pipeline.

use ndarray::{Array2, ArrayView2};

use crate::float_trait::GnlmFloat;

/// Clamp every value below `floor` up to `floor`, in place.
pub fn remove_zeros<F: GnlmFloat>(image: &mut Array2<F>, floor: F) {
    for v in image.iter_mut() {
        if *v < floor {
            *v = floor;
        }
    }
}

/// Base-2 exponent of the smallest strictly positive value, rounded down.
/// `None` when the image holds no positive value.
pub fn min_positive_pow2<F: GnlmFloat>(image: ArrayView2<'_, F>) -> Option<i32> {
    let mut min_positive: Option<F> = None;
    for &v in image.iter() {
        if v > F::zero() && min_positive.map_or(true, |m| v < m) {
            min_positive = Some(v);
        }
    }
    min_positive.map(|m| m.log2().floor().to_i32().unwrap_or(i32::MIN))
}

/// Automatic clamping floor: `2^max(p - 2, min(p, -mantissa_digits))` where
/// `p` is the exponent of the smallest positive value. Falls back to
/// `2^-mantissa_digits` for images without positive values.
pub fn auto_zero_floor<F: GnlmFloat>(image: ArrayView2<'_, F>) -> F {
    let digits = -(F::MANTISSA_DIGITS as i32);
    let p = min_positive_pow2(image).unwrap_or(digits);
    let p = (p - 2).max(p.min(digits));
    F::from_f64_c(2.0f64.powi(p))
}
