//! Guided NLM pipeline: configuration, driver loop and finalization.
//!
//! For every reference anchor produced by the stepper, the driver matches
//! blocks around it (SAR intensity distance on the noisy image, SSD on the
//! guide), collaboratively averages the matched stack, and accumulates the
//! windowed average into the output buffers. A final element-wise division
//! by the accumulated window weights reconstructs the denoised image.
//!
//! Reference positions are processed in parallel: the index range is split
//! into contiguous chunks (at most one per worker thread), each chunk
//! accumulates into private buffers, and the partial buffers are merged
//! additively. The inputs are shared read-only; per-reference match
//! selection is unaffected by the partitioning, only the floating-point
//! accumulation order may differ between runs.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3};
use rayon::prelude::*;
use std::time::Instant;

use crate::aggregation::aggregate_block;
use crate::block_matching::guided_block_matching;
use crate::blocks::{SlidingBands, SlidingBlocks};
use crate::collaborative::{collaborative_means_impl, PatchStack};
use crate::distance::{AwgnMetric, SarIntensityMetric};
use crate::error::GnlmError;
use crate::float_trait::GnlmFloat;
use crate::match_list::BlockMatch;
use crate::neighborhood::SearchNeighborhood;
use crate::stepper::Stepper;
use crate::window::{AggregationWindow, WindowKind};

/// Minimum chunk length for the parallel reference scan.
const RAYON_MIN_CHUNK_LEN: usize = 64;

/// Filter parameter of the collaborative exponential weights.
const COLLABORATIVE_FILTER_PARAMETER: f64 = 1.0;

/// Guided NLM parameters.
///
/// `match_threshold` is the per-pixel distance budget; the effective maximum
/// block distance is `match_threshold * block_size^2`.
#[derive(Debug, Clone, Copy)]
pub struct GnlmConfig<F> {
    /// Rows and columns of a block (square).
    pub block_size: usize,
    /// Maximum number of matched blocks per reference position.
    pub stack_capacity: usize,
    /// Diameter of the search region, in block anchors. Even values shrink
    /// to the next odd value.
    pub search_diameter: usize,
    /// Stride between reference anchors.
    pub step: usize,
    /// Per-pixel bound on the distance between two matched blocks.
    pub match_threshold: F,
    /// Kaiser shape parameter of the aggregation window.
    pub window_beta: F,
    /// Blend factor between the noisy-image and guide-image distances,
    /// in `[0, 1]`: 0 ranks by the guide alone, 1 by the noisy image alone.
    pub alpha: F,
    /// Fixed gate on the primary distance; candidates at or above it never
    /// reach the guide distance.
    pub gate_threshold: F,
    /// Weight of the primary distance in the stored combined score.
    pub lambda1: F,
    /// Weight of the guide distance in the stored combined score.
    pub lambda2: F,
    /// Shape of the aggregation window.
    pub window_kind: WindowKind,
}

impl<F: GnlmFloat> Default for GnlmConfig<F> {
    fn default() -> Self {
        Self {
            block_size: 8,
            stack_capacity: 64,
            search_diameter: 39,
            step: 3,
            match_threshold: F::infinity(),
            window_beta: F::from_f64_c(2.0),
            alpha: F::from_f64_c(0.5),
            gate_threshold: F::infinity(),
            lambda1: F::one(),
            lambda2: F::one(),
            window_kind: WindowKind::Kaiser,
        }
    }
}

impl<F: GnlmFloat> GnlmConfig<F> {
    /// Check every parameter range; nothing is silently corrected.
    pub fn validate(&self) -> Result<(), GnlmError> {
        if self.block_size < 2 {
            return Err(GnlmError::BadParameter {
                name: "block_size",
                reason: "must be at least 2",
            });
        }
        if self.stack_capacity < 1 {
            return Err(GnlmError::BadParameter {
                name: "stack_capacity",
                reason: "must be at least 1",
            });
        }
        if self.search_diameter < 2 {
            return Err(GnlmError::BadParameter {
                name: "search_diameter",
                reason: "must be at least 2",
            });
        }
        if self.step < 1 {
            return Err(GnlmError::BadParameter {
                name: "step",
                reason: "must be at least 1",
            });
        }
        if !(self.match_threshold > F::zero()) {
            return Err(GnlmError::BadParameter {
                name: "match_threshold",
                reason: "must be positive",
            });
        }
        if !(self.window_beta > F::zero()) {
            return Err(GnlmError::BadParameter {
                name: "window_beta",
                reason: "must be positive",
            });
        }
        if !(self.alpha >= F::zero() && self.alpha <= F::one()) {
            return Err(GnlmError::BadParameter {
                name: "alpha",
                reason: "must be in [0, 1]",
            });
        }
        if !(self.lambda1 >= F::zero()) {
            return Err(GnlmError::BadParameter {
                name: "lambda1",
                reason: "must be non-negative",
            });
        }
        if !(self.lambda2 >= F::zero()) {
            return Err(GnlmError::BadParameter {
                name: "lambda2",
                reason: "must be non-negative",
            });
        }
        Ok(())
    }

    /// Maximum distance between two matched blocks.
    fn max_block_distance(&self) -> F {
        self.match_threshold * F::usize_as(self.block_size * self.block_size)
    }
}

/// Denoised image plus the per-reference collaborative weight sums.
#[derive(Debug, Clone)]
pub struct GnlmOutput<F> {
    /// The despeckled image.
    pub clean: Array2<F>,
    /// Collaborative weight sum written at each reference anchor, zero
    /// elsewhere. Useful for confidence estimation.
    pub weight_sum: Array2<F>,
}

/// Per-run counters and stage timings, merged across workers.
#[derive(Debug, Default, Clone, Copy)]
pub struct PipelineStats {
    pub reference_positions: u64,
    pub groups: u64,
    pub matched_blocks: u64,
    pub degenerate_centers: u64,
    pub fallback_corrections: u64,
    pub block_matching_ns: u128,
    pub filtering_ns: u128,
    pub aggregation_ns: u128,
}

impl PipelineStats {
    fn merge(self, other: Self) -> Self {
        Self {
            reference_positions: self.reference_positions + other.reference_positions,
            groups: self.groups + other.groups,
            matched_blocks: self.matched_blocks + other.matched_blocks,
            degenerate_centers: self.degenerate_centers + other.degenerate_centers,
            fallback_corrections: self.fallback_corrections + other.fallback_corrections,
            block_matching_ns: self.block_matching_ns + other.block_matching_ns,
            filtering_ns: self.filtering_ns + other.filtering_ns,
            aggregation_ns: self.aggregation_ns + other.aggregation_ns,
        }
    }
}

macro_rules! timed {
    ($enabled:expr, $acc:expr, $body:block) => {{
        if $enabled {
            let _t = Instant::now();
            let _ret = { $body };
            $acc += _t.elapsed().as_nanos();
            _ret
        } else {
            $body
        }
    }};
}

/// Despeckle `noisy` using `guide` for block selection.
///
/// `noisy` is a single-band intensity image; `guide` has shape
/// `(rows, cols, bands)` with the same spatial extents; `mask` marks pixels
/// eligible for normal processing.
pub fn guided_nlmeans<F: GnlmFloat>(
    noisy: ArrayView2<'_, F>,
    guide: ArrayView3<'_, F>,
    mask: ArrayView2<'_, bool>,
    config: &GnlmConfig<F>,
) -> Result<GnlmOutput<F>, GnlmError> {
    let (output, _) = run_guided_nlmeans(noisy, guide, mask, config, false)?;
    Ok(output)
}

/// Same as [`guided_nlmeans`], additionally returning per-stage statistics.
///
/// Timing instrumentation is only active through this entry point; the
/// summary is also emitted at debug level.
pub fn guided_nlmeans_profiled<F: GnlmFloat>(
    noisy: ArrayView2<'_, F>,
    guide: ArrayView3<'_, F>,
    mask: ArrayView2<'_, bool>,
    config: &GnlmConfig<F>,
) -> Result<(GnlmOutput<F>, PipelineStats), GnlmError> {
    let (output, stats) = run_guided_nlmeans(noisy, guide, mask, config, true)?;
    log::debug!(
        "gnlm profile: refs={} groups={} matched={} degenerate={} corrected={} \
         block_ms={:.3} filter_ms={:.3} aggregate_ms={:.3}",
        stats.reference_positions,
        stats.groups,
        stats.matched_blocks,
        stats.degenerate_centers,
        stats.fallback_corrections,
        stats.block_matching_ns as f64 / 1e6,
        stats.filtering_ns as f64 / 1e6,
        stats.aggregation_ns as f64 / 1e6,
    );
    Ok((output, stats))
}

fn check_shapes<F: GnlmFloat>(
    noisy: ArrayView2<'_, F>,
    guide: Option<ArrayView3<'_, F>>,
    mask: ArrayView2<'_, bool>,
) -> Result<(), GnlmError> {
    let dim = noisy.dim();
    if let Some(guide) = guide {
        let (g_rows, g_cols, bands) = guide.dim();
        if (g_rows, g_cols) != dim {
            return Err(GnlmError::ShapeMismatch {
                what: "guide image",
                noisy: dim,
                got: (g_rows, g_cols),
            });
        }
        if bands == 0 {
            return Err(GnlmError::EmptyGuide);
        }
    }
    if mask.dim() != dim {
        return Err(GnlmError::ShapeMismatch {
            what: "validity mask",
            noisy: dim,
            got: mask.dim(),
        });
    }
    Ok(())
}

fn run_guided_nlmeans<F: GnlmFloat>(
    noisy: ArrayView2<'_, F>,
    guide: ArrayView3<'_, F>,
    mask: ArrayView2<'_, bool>,
    config: &GnlmConfig<F>,
    profile: bool,
) -> Result<(GnlmOutput<F>, PipelineStats), GnlmError> {
    config.validate()?;
    check_shapes(noisy, Some(guide), mask)?;

    let (rows, cols) = noisy.dim();
    let block = config.block_size;
    let noisy_blocks = SlidingBlocks::new(noisy, block, block)?;
    let guide_blocks = SlidingBands::new(guide, block, block)?;

    let max_distance = config.max_block_distance();
    let primary_metric = SarIntensityMetric::new(max_distance);
    let guide_metric = AwgnMetric::new(max_distance);
    let window = AggregationWindow::new(config.window_kind, block, block, config.window_beta);
    let stepper = Stepper::new(rows, cols, block, block, config.step);
    let filter_parameter = F::from_f64_c(COLLABORATIVE_FILTER_PARAMETER);

    let total_refs = stepper.len();
    let partial_count = total_refs.min(rayon::current_num_threads().max(1)).max(1);
    let chunk_len = total_refs.div_ceil(partial_count).max(RAYON_MIN_CHUNK_LEN);
    let chunk_count = total_refs.div_ceil(chunk_len).max(1);

    let (mut clean, weights, weight_sum, stats) = (0..chunk_count)
        .into_par_iter()
        .map(|chunk_idx| {
            let chunk_start = chunk_idx * chunk_len;
            let chunk_end = ((chunk_idx + 1) * chunk_len).min(total_refs);

            let mut clean = Array2::<F>::zeros((rows, cols));
            let mut weights = Array2::<F>::zeros((rows, cols));
            let mut weight_sum = Array2::<F>::zeros((rows, cols));
            let mut neighborhood = SearchNeighborhood::new(
                noisy_blocks.rows(),
                noisy_blocks.cols(),
                config.search_diameter,
            );
            let mut matches: Vec<BlockMatch<F>> = Vec::with_capacity(config.stack_capacity);
            let mut scores: Vec<F> = Vec::with_capacity(config.stack_capacity);
            let mut stack = PatchStack::new(block, block, config.stack_capacity);
            let mut stats = PipelineStats::default();

            for ref_index in chunk_start..chunk_end {
                let (row, col) = stepper.position(ref_index);
                neighborhood.set_center((row, col));
                stats.reference_positions += 1;

                timed!(profile, stats.block_matching_ns, {
                    guided_block_matching(
                        &neighborhood,
                        config.alpha,
                        config.gate_threshold,
                        &primary_metric,
                        &guide_metric,
                        &noisy_blocks,
                        &guide_blocks,
                        config.lambda1,
                        config.lambda2,
                        mask.view(),
                        config.stack_capacity,
                        &mut matches,
                    );
                });
                let nb = matches.len();
                if nb == 0 {
                    continue;
                }
                stats.groups += 1;
                stats.matched_blocks += nb as u64;
                if !mask[(row, col)] {
                    stats.degenerate_centers += 1;
                }

                scores.clear();
                scores.extend(matches.iter().map(|m| m.score));
                stack.fill_from(&noisy_blocks, &matches);
                let (w_sum, corrected) = timed!(profile, stats.filtering_ns, {
                    collaborative_means_impl(&mut stack, &scores, filter_parameter, nb)
                });
                if corrected {
                    stats.fallback_corrections += 1;
                }
                weight_sum[(row, col)] = w_sum;

                let scale = F::usize_as(nb);
                timed!(profile, stats.aggregation_ns, {
                    aggregate_block(
                        stack.block(0),
                        (matches[0].row, matches[0].col),
                        scale,
                        &mut clean,
                        &mut weights,
                        &window,
                    );
                });
            }

            (clean, weights, weight_sum, stats)
        })
        .reduce_with(|(mut a_c, mut a_w, mut a_s, a_stats), (b_c, b_w, b_s, b_stats)| {
            a_c += &b_c;
            a_w += &b_w;
            a_s += &b_s;
            (a_c, a_w, a_s, a_stats.merge(b_stats))
        })
        .expect("reference scan produced no chunks");

    // Second aggregation phase: normalize by the accumulated window weights.
    clean.zip_mut_with(&weights, |c, &w| *c /= w);

    Ok((GnlmOutput { clean, weight_sum }, stats))
}

/// Per-anchor accepted-match counts, for tuning the matching parameters.
///
/// Runs the same dual-distance matching against an all-zero single-band
/// guide, so selection is driven by the noisy image alone (use `alpha = 1`
/// for meaningful counts).
pub fn match_count_map<F: GnlmFloat>(
    noisy: ArrayView2<'_, F>,
    mask: ArrayView2<'_, bool>,
    config: &GnlmConfig<F>,
) -> Result<Array2<usize>, GnlmError> {
    config.validate()?;
    check_shapes(noisy, None, mask)?;

    let (rows, cols) = noisy.dim();
    let block = config.block_size;
    let noisy_blocks = SlidingBlocks::new(noisy, block, block)?;
    let zero_guide = Array3::<F>::zeros((rows, cols, 1));
    let guide_blocks = SlidingBands::new(zero_guide.view(), block, block)?;

    let max_distance = config.max_block_distance();
    let primary_metric = SarIntensityMetric::new(max_distance);
    let guide_metric = AwgnMetric::new(max_distance);
    let stepper = Stepper::new(rows, cols, block, block, config.step);
    let mut neighborhood = SearchNeighborhood::new(
        noisy_blocks.rows(),
        noisy_blocks.cols(),
        config.search_diameter,
    );

    let mut counts = Array2::<usize>::zeros((rows, cols));
    let mut matches: Vec<BlockMatch<F>> = Vec::with_capacity(config.stack_capacity);
    for (row, col) in stepper.positions() {
        neighborhood.set_center((row, col));
        guided_block_matching(
            &neighborhood,
            config.alpha,
            config.gate_threshold,
            &primary_metric,
            &guide_metric,
            &noisy_blocks,
            &guide_blocks,
            config.lambda1,
            config.lambda2,
            mask.view(),
            config.stack_capacity,
            &mut matches,
        );
        counts[(row, col)] = matches.len();
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};

    // Helper: Simple Linear Congruential Generator for deterministic
    // "random" test data.
    struct SimpleLcg {
        state: u64,
    }

    impl SimpleLcg {
        fn new(seed: u64) -> Self {
            Self { state: seed }
        }

        fn next_u64(&mut self) -> u64 {
            self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
            self.state
        }

        fn next_f32(&mut self) -> f32 {
            let u = self.next_u64();
            (u >> 40) as f32 / (1u64 << 24) as f32
        }

        // Box-Muller for Gaussian noise.
        fn next_gaussian(&mut self) -> f32 {
            let u1 = self.next_f32().max(1e-10);
            let u2 = self.next_f32();
            (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
        }
    }

    fn mse(a: &Array2<f32>, b: &Array2<f32>) -> f32 {
        assert_eq!(a.dim(), b.dim());
        let sum_sq: f32 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum();
        sum_sq / (a.len() as f32)
    }

    fn small_config() -> GnlmConfig<f32> {
        GnlmConfig {
            block_size: 4,
            stack_capacity: 16,
            search_diameter: 9,
            step: 2,
            ..GnlmConfig::default()
        }
    }

    fn flat_inputs(
        rows: usize,
        cols: usize,
        value: f32,
        bands: usize,
    ) -> (Array2<f32>, Array3<f32>, Array2<bool>) {
        (
            Array2::from_elem((rows, cols), value),
            Array3::from_elem((rows, cols, bands), value),
            Array2::from_elem((rows, cols), true),
        )
    }

    #[test]
    fn test_config_validation() {
        let base = small_config();
        assert!(base.validate().is_ok());

        let cases: Vec<(&str, GnlmConfig<f32>)> = vec![
            ("block_size", GnlmConfig { block_size: 1, ..base }),
            ("stack_capacity", GnlmConfig { stack_capacity: 0, ..base }),
            ("search_diameter", GnlmConfig { search_diameter: 1, ..base }),
            ("step", GnlmConfig { step: 0, ..base }),
            ("match_threshold", GnlmConfig { match_threshold: 0.0, ..base }),
            ("match_threshold", GnlmConfig { match_threshold: f32::NAN, ..base }),
            ("window_beta", GnlmConfig { window_beta: -1.0, ..base }),
            ("alpha", GnlmConfig { alpha: 1.5, ..base }),
            ("alpha", GnlmConfig { alpha: -0.1, ..base }),
            ("lambda1", GnlmConfig { lambda1: -1.0, ..base }),
            ("lambda2", GnlmConfig { lambda2: -1.0, ..base }),
        ];
        for (name, config) in cases {
            match config.validate() {
                Err(GnlmError::BadParameter { name: got, .. }) => {
                    assert_eq!(got, name);
                }
                other => panic!("expected BadParameter for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let noisy = Array2::<f32>::ones((16, 16));
        let config = small_config();

        let guide = Array3::<f32>::ones((16, 12, 2));
        let mask = Array2::from_elem((16, 16), true);
        assert!(matches!(
            guided_nlmeans(noisy.view(), guide.view(), mask.view(), &config),
            Err(GnlmError::ShapeMismatch { what: "guide image", .. })
        ));

        let guide = Array3::<f32>::ones((16, 16, 2));
        let mask = Array2::from_elem((12, 16), true);
        assert!(matches!(
            guided_nlmeans(noisy.view(), guide.view(), mask.view(), &config),
            Err(GnlmError::ShapeMismatch { what: "validity mask", .. })
        ));

        let guide = Array3::<f32>::ones((16, 16, 0));
        let mask = Array2::from_elem((16, 16), true);
        assert!(matches!(
            guided_nlmeans(noisy.view(), guide.view(), mask.view(), &config),
            Err(GnlmError::EmptyGuide)
        ));
    }

    #[test]
    fn test_image_smaller_than_block_rejected() {
        let (noisy, guide, mask) = flat_inputs(3, 16, 1.0, 2);
        let config = small_config();
        assert!(matches!(
            guided_nlmeans(noisy.view(), guide.view(), mask.view(), &config),
            Err(GnlmError::BlockLargerThanImage { .. })
        ));
    }

    #[test]
    fn test_flat_image_is_a_fixpoint() {
        // A constant image with an identical guide must come back unchanged:
        // all matches are exact, all weights positive, full coverage.
        let (noisy, guide, mask) = flat_inputs(16, 16, 100.0, 2);
        let config = GnlmConfig {
            block_size: 4,
            stack_capacity: 64,
            search_diameter: 9,
            step: 2,
            alpha: 0.5,
            ..GnlmConfig::default()
        };

        let output = guided_nlmeans(noisy.view(), guide.view(), mask.view(), &config).unwrap();

        for &v in output.clean.iter() {
            assert!(
                (v - 100.0).abs() < 1e-3,
                "flat image not preserved: got {v}"
            );
            assert!(v.is_finite());
        }
    }

    #[test]
    fn test_weight_sum_written_at_anchors() {
        let (noisy, guide, mask) = flat_inputs(16, 16, 10.0, 2);
        let config = small_config();

        let output = guided_nlmeans(noisy.view(), guide.view(), mask.view(), &config).unwrap();
        let stepper = Stepper::new(16, 16, 4, 4, 2);

        for (row, col) in stepper.positions() {
            assert!(
                output.weight_sum[[row, col]] >= 1.0,
                "anchor ({row},{col}) has no weight sum"
            );
        }
        // Positions that are not anchors stay zero.
        assert_eq!(output.weight_sum[[1, 1]], 0.0);
    }

    #[test]
    fn test_masked_pixels_processed_degenerately() {
        let (noisy, guide, mut mask) = flat_inputs(16, 16, 10.0, 2);
        mask[[0, 0]] = false;
        let config = small_config();

        let (output, stats) =
            guided_nlmeans_profiled(noisy.view(), guide.view(), mask.view(), &config).unwrap();

        assert!(stats.degenerate_centers >= 1);
        assert!(output.clean.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_profiled_stats_cover_all_references() {
        let (noisy, guide, mask) = flat_inputs(20, 18, 10.0, 3);
        let config = small_config();

        let (_, stats) =
            guided_nlmeans_profiled(noisy.view(), guide.view(), mask.view(), &config).unwrap();

        let stepper = Stepper::new(20, 18, 4, 4, 2);
        assert_eq!(stats.reference_positions, stepper.len() as u64);
        assert_eq!(stats.groups, stepper.len() as u64);
        assert!(stats.matched_blocks >= stats.groups);
    }

    #[test]
    fn test_despeckling_reduces_noise() {
        // Piecewise-constant reference corrupted by multiplicative speckle;
        // the guide is the clean reference, so matching is reliable.
        let mut rng = SimpleLcg::new(20180427);
        let (rows, cols) = (48, 48);
        let reference = Array2::from_shape_fn((rows, cols), |(r, _)| {
            if r < rows / 2 {
                50.0f32
            } else {
                120.0
            }
        });
        let noisy = Array2::from_shape_fn((rows, cols), |(r, c)| {
            // One-look-ish speckle, clamped away from zero.
            let speckle = (1.0 + 0.4 * rng.next_gaussian()).max(0.05);
            reference[[r, c]] * speckle
        });
        let guide = Array3::from_shape_fn((rows, cols, 2), |(r, c, _)| reference[[r, c]]);
        let mask = Array2::from_elem((rows, cols), true);

        let config = GnlmConfig {
            block_size: 8,
            stack_capacity: 16,
            search_diameter: 15,
            step: 3,
            alpha: 0.0,
            ..GnlmConfig::default()
        };

        let output = guided_nlmeans(noisy.view(), guide.view(), mask.view(), &config).unwrap();

        let before = mse(&noisy, &reference);
        let after = mse(&output.clean, &reference);
        assert!(
            after < before * 0.5,
            "despeckling should cut MSE at least in half: {before} -> {after}"
        );
        assert!(output.clean.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_alpha_extremes_run_clean() {
        let (noisy, guide, mask) = flat_inputs(16, 16, 10.0, 2);
        for alpha in [0.0f32, 1.0] {
            let config = GnlmConfig {
                alpha,
                ..small_config()
            };
            let output =
                guided_nlmeans(noisy.view(), guide.view(), mask.view(), &config).unwrap();
            for &v in output.clean.iter() {
                assert!((v - 10.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_match_count_map() {
        let (noisy, _, mask) = flat_inputs(16, 16, 10.0, 1);
        let config = GnlmConfig {
            alpha: 1.0,
            ..small_config()
        };

        let counts = match_count_map(noisy.view(), mask.view(), &config).unwrap();
        let stepper = Stepper::new(16, 16, 4, 4, 2);

        for (row, col) in stepper.positions() {
            let count = counts[[row, col]];
            assert!(count >= 1 && count <= config.stack_capacity);
        }
        assert_eq!(counts[[1, 1]], 0);
    }

    #[test]
    fn test_match_count_map_masked_center() {
        let (noisy, _, mut mask) = flat_inputs(16, 16, 10.0, 1);
        mask[[0, 0]] = false;
        let config = GnlmConfig {
            alpha: 1.0,
            ..small_config()
        };

        let counts = match_count_map(noisy.view(), mask.view(), &config).unwrap();
        assert_eq!(counts[[0, 0]], 1);
    }
}
