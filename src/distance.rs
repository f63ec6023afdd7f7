//! Block distance metrics.
//!
//! A metric compares two equally-sized blocks and returns a scalar
//! dissimilarity. The additive-noise metric supports partial-distance early
//! exit: since its per-element terms are non-negative, any partial sum that
//! already exceeds the caller's bound can be returned immediately, because
//! the candidate will be rejected whatever the exact total is.

use ndarray::{ArrayView, Dimension, Ix2, Ix3};

use crate::float_trait::GnlmFloat;

/// Distance between two block views of the same shape.
pub trait PatchMetric<F: GnlmFloat, D: Dimension> {
    /// Compute the distance between `a` and `b`. Implementations with early
    /// exit may return any value strictly greater than `early_exit` as soon
    /// as the accumulated sum passes it.
    fn distance(&self, a: ArrayView<'_, F, D>, b: ArrayView<'_, F, D>, early_exit: F) -> F;

    /// The configured maximum distance between two blocks, used as the
    /// initial pruning bound of the match list.
    fn max_distance(&self) -> F;
}

/// Sum-of-squared-differences metric for additive noise, with
/// partial-distance early exit.
#[derive(Debug, Clone, Copy)]
pub struct AwgnMetric<F> {
    max_distance: F,
}

impl<F: GnlmFloat> AwgnMetric<F> {
    pub fn new(max_distance: F) -> Self {
        Self { max_distance }
    }
}

impl<F: GnlmFloat> PatchMetric<F, Ix2> for AwgnMetric<F> {
    fn distance(&self, a: ArrayView<'_, F, Ix2>, b: ArrayView<'_, F, Ix2>, early_exit: F) -> F {
        debug_assert_eq!(a.dim(), b.dim());
        let mut dist = F::zero();
        for (row_a, row_b) in a.outer_iter().zip(b.outer_iter()) {
            for (&x, &y) in row_a.iter().zip(row_b.iter()) {
                let diff = x - y;
                dist += diff * diff;
                if dist > early_exit {
                    return dist;
                }
            }
        }
        dist
    }

    fn max_distance(&self) -> F {
        self.max_distance
    }
}

impl<F: GnlmFloat> PatchMetric<F, Ix3> for AwgnMetric<F> {
    /// Multi-band variant: the bound is checked once per pixel, after all
    /// bands of that pixel have been accumulated.
    fn distance(&self, a: ArrayView<'_, F, Ix3>, b: ArrayView<'_, F, Ix3>, early_exit: F) -> F {
        debug_assert_eq!(a.dim(), b.dim());
        let mut dist = F::zero();
        for (row_a, row_b) in a.outer_iter().zip(b.outer_iter()) {
            for (px_a, px_b) in row_a.outer_iter().zip(row_b.outer_iter()) {
                for (&x, &y) in px_a.iter().zip(px_b.iter()) {
                    let diff = x - y;
                    dist += diff * diff;
                }
                if dist > early_exit {
                    return dist;
                }
            }
        }
        dist
    }

    fn max_distance(&self) -> F {
        self.max_distance
    }
}

/// Log-ratio metric for multiplicative speckle on intensity images.
///
/// Each pixel pair `(a, b)` with `a != b` contributes
/// `0.5 * ln((a + b)^2 / (4 a b))`; identical pixels contribute zero.
/// Unlike the additive metric this one runs a full pass: no partial-distance
/// early exit is implemented.
#[derive(Debug, Clone, Copy)]
pub struct SarIntensityMetric<F> {
    max_distance: F,
}

impl<F: GnlmFloat> SarIntensityMetric<F> {
    pub fn new(max_distance: F) -> Self {
        Self { max_distance }
    }
}

impl<F: GnlmFloat> PatchMetric<F, Ix2> for SarIntensityMetric<F> {
    fn distance(&self, a: ArrayView<'_, F, Ix2>, b: ArrayView<'_, F, Ix2>, _early_exit: F) -> F {
        debug_assert_eq!(a.dim(), b.dim());
        let four = F::from_f64_c(4.0);
        let half = F::from_f64_c(0.5);
        let mut dist = F::zero();
        for (row_a, row_b) in a.outer_iter().zip(b.outer_iter()) {
            for (&x, &y) in row_a.iter().zip(row_b.iter()) {
                if x != y {
                    let sum = x + y;
                    dist += (sum * sum / (four * x * y)).ln() * half;
                }
            }
        }
        dist
    }

    fn max_distance(&self) -> F {
        self.max_distance
    }
}
