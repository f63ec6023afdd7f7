//! Float trait abstraction for f32/f64 support.
//!
//! This module provides a unified trait for floating-point operations,
//! enabling the GNLM library to work with both f32 and f64 precision.

use num_traits::{Float, FromPrimitive, NumAssign};
use std::fmt::Debug;
use std::iter::Sum;

/// Trait alias for floating point types supported by GNLM.
///
/// This trait combines all the bounds needed for GNLM operations:
/// - Basic float operations (Float, NumAssign)
/// - Conversion from primitive types (FromPrimitive)
/// - Iteration support (Sum)
/// - Thread safety (Send + Sync) for the parallel driver
/// - Debug printing
pub trait GnlmFloat:
    Float + FromPrimitive + NumAssign + Sum + Debug + Send + Sync + 'static
{
    /// The constant PI for this float type.
    const PI: Self;

    /// Mantissa width of the underlying representation, used by the
    /// zero-removal floor selection.
    const MANTISSA_DIGITS: u32;

    /// Create a value from an f64 constant.
    fn from_f64_c(val: f64) -> Self;

    /// Create a value from a usize constant.
    fn usize_as(val: usize) -> Self;
}

impl GnlmFloat for f32 {
    const PI: Self = std::f32::consts::PI;
    const MANTISSA_DIGITS: u32 = f32::MANTISSA_DIGITS;

    #[inline]
    fn from_f64_c(val: f64) -> Self {
        val as f32
    }

    #[inline]
    fn usize_as(val: usize) -> Self {
        val as f32
    }
}

impl GnlmFloat for f64 {
    const PI: Self = std::f64::consts::PI;
    const MANTISSA_DIGITS: u32 = f64::MANTISSA_DIGITS;

    #[inline]
    fn from_f64_c(val: f64) -> Self {
        val
    }

    #[inline]
    fn usize_as(val: usize) -> Self {
        val as f64
    }
}
