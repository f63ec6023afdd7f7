//! Sliding block views over single-band and multi-band images.
//!
//! A sliding view indexes an image as an overlapping grid of fixed-size
//! blocks with unit stride: every anchor position is valid, and block
//! `(i, j)` is the sub-view whose top-left pixel is `(i, j)`. Views never
//! copy pixel data.

use ndarray::{s, ArrayView2, ArrayView3};

use crate::error::GnlmError;

/// Sliding grid of `block_rows x block_cols` views over a single-band image.
#[derive(Debug, Clone)]
pub struct SlidingBlocks<'a, F> {
    image: ArrayView2<'a, F>,
    block_rows: usize,
    block_cols: usize,
    rows: usize,
    cols: usize,
}

impl<'a, F> SlidingBlocks<'a, F> {
    /// Build a sliding view. Fails if the block does not fit in the image.
    pub fn new(
        image: ArrayView2<'a, F>,
        block_rows: usize,
        block_cols: usize,
    ) -> Result<Self, GnlmError> {
        let (h, w) = image.dim();
        if block_rows == 0 || block_cols == 0 || block_rows > h || block_cols > w {
            return Err(GnlmError::BlockLargerThanImage {
                block: (block_rows, block_cols),
                image: (h, w),
            });
        }
        Ok(Self {
            image,
            block_rows,
            block_cols,
            rows: h - block_rows + 1,
            cols: w - block_cols + 1,
        })
    }

    /// Number of valid block anchors along the row axis.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of valid block anchors along the column axis.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn block_rows(&self) -> usize {
        self.block_rows
    }

    pub fn block_cols(&self) -> usize {
        self.block_cols
    }

    /// The block anchored at `(row, col)`, as a zero-copy view.
    pub fn block(&self, row: usize, col: usize) -> ArrayView2<'_, F> {
        debug_assert!(row < self.rows && col < self.cols);
        self.image.slice(s![
            row..row + self.block_rows,
            col..col + self.block_cols
        ])
    }
}

/// Sliding grid of block views over a multi-band image.
///
/// The backing array has shape `(rows, cols, bands)`; a block view keeps the
/// full band axis.
#[derive(Debug, Clone)]
pub struct SlidingBands<'a, F> {
    image: ArrayView3<'a, F>,
    block_rows: usize,
    block_cols: usize,
    rows: usize,
    cols: usize,
}

impl<'a, F> SlidingBands<'a, F> {
    /// Build a sliding view. Fails if the block does not fit in the image.
    pub fn new(
        image: ArrayView3<'a, F>,
        block_rows: usize,
        block_cols: usize,
    ) -> Result<Self, GnlmError> {
        let (h, w, _bands) = image.dim();
        if block_rows == 0 || block_cols == 0 || block_rows > h || block_cols > w {
            return Err(GnlmError::BlockLargerThanImage {
                block: (block_rows, block_cols),
                image: (h, w),
            });
        }
        Ok(Self {
            image,
            block_rows,
            block_cols,
            rows: h - block_rows + 1,
            cols: w - block_cols + 1,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The block anchored at `(row, col)`, shape `(block_rows, block_cols, bands)`.
    pub fn block(&self, row: usize, col: usize) -> ArrayView3<'_, F> {
        debug_assert!(row < self.rows && col < self.cols);
        self.image.slice(s![
            row..row + self.block_rows,
            col..col + self.block_cols,
            ..
        ])
    }
}
