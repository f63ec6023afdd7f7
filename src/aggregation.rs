//! Windowed additive accumulation of averaged blocks.
//!
//! Overlapping contributions from different reference positions add up,
//! never overwrite. The matching weight accumulator receives the scaled
//! window itself, so the final element-wise division restores unit gain.

use ndarray::{s, Array2, ArrayView2, Zip};

use crate::float_trait::GnlmFloat;
use crate::window::AggregationWindow;

/// Accumulate one averaged block into the output buffers.
///
/// `clean[pos..] += scale * (window ⊙ block)` and
/// `weights[pos..] += scale * window`, where `scale` is the matched-block
/// count compensating for the collaborative step collapsing the whole stack
/// into a single averaged block.
pub fn aggregate_block<F: GnlmFloat>(
    block: ArrayView2<'_, F>,
    position: (usize, usize),
    scale: F,
    clean: &mut Array2<F>,
    weights: &mut Array2<F>,
    window: &AggregationWindow<F>,
) {
    let (block_rows, block_cols) = block.dim();
    let (row, col) = position;
    let win = window.matrix();
    debug_assert_eq!(win.dim(), (block_rows, block_cols));

    let clean_slice = clean.slice_mut(s![row..row + block_rows, col..col + block_cols]);
    Zip::from(clean_slice)
        .and(block)
        .and(win)
        .for_each(|d, &b, &w| *d += b * w * scale);

    let weight_slice = weights.slice_mut(s![row..row + block_rows, col..col + block_cols]);
    Zip::from(weight_slice)
        .and(win)
        .for_each(|d, &w| *d += w * scale);
}
