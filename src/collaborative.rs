//! Collaborative averaging of a stack of matched blocks.
//!
//! The matched blocks are stacked, averaged with exponential non-local-means
//! weights derived from their match scores, and every active slot is
//! overwritten with the single averaged block. Callers must copy the result
//! out before the stack is reused.

use ndarray::{s, Array2, ArrayView2, ArrayViewMut2, Array3};

use crate::blocks::SlidingBlocks;
use crate::float_trait::GnlmFloat;
use crate::match_list::BlockMatch;

/// Scratch stack of up to `capacity` blocks, reused across reference
/// positions.
#[derive(Debug, Clone)]
pub struct PatchStack<F> {
    data: Array3<F>,
}

impl<F: GnlmFloat> PatchStack<F> {
    pub fn new(block_rows: usize, block_cols: usize, capacity: usize) -> Self {
        Self {
            data: Array3::zeros((capacity, block_rows, block_cols)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.dim().0
    }

    pub fn block_dim(&self) -> (usize, usize) {
        let (_, rows, cols) = self.data.dim();
        (rows, cols)
    }

    /// Copy the matched blocks into the first `matches.len()` slots.
    pub fn fill_from(&mut self, blocks: &SlidingBlocks<'_, F>, matches: &[BlockMatch<F>]) {
        debug_assert!(matches.len() <= self.capacity());
        for (k, m) in matches.iter().enumerate() {
            self.block_mut(k).assign(&blocks.block(m.row, m.col));
        }
    }

    pub fn block(&self, k: usize) -> ArrayView2<'_, F> {
        self.data.slice(s![k, .., ..])
    }

    pub fn block_mut(&mut self, k: usize) -> ArrayViewMut2<'_, F> {
        self.data.slice_mut(s![k, .., ..])
    }
}

/// Exponential-weight collaborative mean over the first `nb` stack slots.
///
/// The reference block (slot 0) has fixed weight 1 and is excluded from the
/// minimum-score search, since its score against itself is trivially near
/// zero and would dominate. When even the closest neighbor is too dissimilar
/// (`d_min > 16 h^2`) the average falls back to the reference block alone, a
/// corrective measure against spurious matches. Every active slot is
/// overwritten with the normalized average; the weight sum is returned.
pub fn collaborative_means<F: GnlmFloat>(
    stack: &mut PatchStack<F>,
    scores: &[F],
    filter_parameter: F,
    nb: usize,
) -> F {
    collaborative_means_impl(stack, scores, filter_parameter, nb).0
}

pub(crate) fn collaborative_means_impl<F: GnlmFloat>(
    stack: &mut PatchStack<F>,
    scores: &[F],
    filter_parameter: F,
    nb: usize,
) -> (F, bool) {
    debug_assert!(nb <= stack.capacity() && nb <= scores.len());
    let h2 = filter_parameter * filter_parameter;
    let (block_rows, block_cols) = stack.block_dim();

    let mut d_min = F::zero();
    if nb > 1 {
        d_min = scores[1];
        for &d in &scores[2..nb] {
            if d < d_min {
                d_min = d;
            }
        }
    }

    let mut mean = Array2::<F>::zeros((block_rows, block_cols));
    mean.assign(&stack.block(0));
    let mut w_sum = F::one();
    let corrected = d_min > F::from_f64_c(16.0) * h2;
    if corrected {
        log::trace!("collaborative fallback: {} blocks, d_min {:?}", nb, d_min);
    } else {
        for k in 1..nb {
            let w = (-(scores[k] - d_min) / h2).exp();
            mean.zip_mut_with(&stack.block(k), |m, &s| *m += s * w);
            w_sum += w;
        }
    }

    mean.mapv_inplace(|v| v / w_sum);
    for k in 0..nb {
        stack.block_mut(k).assign(&mean);
    }

    (w_sum, corrected)
}
