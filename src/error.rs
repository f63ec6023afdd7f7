//! Error types for pipeline setup.
//!
//! Everything here is reported synchronously before any processing begins.
//! Inside the per-pixel loop there are no recoverable errors, only the
//! documented fallback policies (degenerate center, corrective averaging).

use thiserror::Error;

/// Errors that can occur while configuring or starting a denoising run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GnlmError {
    /// A configuration parameter is out of its valid range.
    #[error("The parameter '{name}' is not set correctly: {reason}")]
    BadParameter {
        name: &'static str,
        reason: &'static str,
    },

    /// An auxiliary image does not share the noisy image's extents.
    #[error("Dimension mismatch: noisy image has shape {noisy:?}, but {what} has shape {got:?}")]
    ShapeMismatch {
        what: &'static str,
        noisy: (usize, usize),
        got: (usize, usize),
    },

    /// The image is too small to hold even a single block.
    #[error("Block size {block:?} exceeds image extent {image:?}")]
    BlockLargerThanImage {
        block: (usize, usize),
        image: (usize, usize),
    },

    /// The guide image has no bands.
    #[error("The guide image must have at least one band")]
    EmptyGuide,
}
