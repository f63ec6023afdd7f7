//! Dual-distance guided block matching.
//!
//! Candidates inside the search neighborhood are ranked by a combination of
//! two distances: one computed on the noisy image (primary) and one on the
//! co-registered guide image. `alpha` selects which distance drives the
//! ranking and the pruning bound:
//!
//! - `alpha == 0`: the guide distance ranks; the primary distance only gates
//!   candidates through the fixed threshold.
//! - `alpha == 1`: the primary distance ranks; the guide distance is
//!   computed afterwards purely for the combined score.
//! - otherwise: the ranking distance is `alpha d1 + (1 - alpha) d2`, and the
//!   pruning bound is split between the two metrics in the same proportion.
//!
//! The score stored with each match is always `lambda1 d1 + lambda2 d2`;
//! collaborative averaging consumes it as the dissimilarity measure.
//!
//! The reference block matches itself with distance zero, so it is seeded
//! into the list before the scan and skipped during it; insertion-order
//! tie-breaking then guarantees the reference is always the first match
//! extracted, and every reference position aggregates at least its own
//! block.
//!
//! Pixels where the validity mask is false are skipped as candidates. A
//! masked-out center short-circuits the whole search: the reference itself
//! is returned as the single match with distance 0 and score 1, so the
//! pixel is denoised trivially instead of borrowing unreliable neighbors.

use ndarray::{ArrayView2, Ix2, Ix3};

use crate::blocks::{SlidingBands, SlidingBlocks};
use crate::distance::PatchMetric;
use crate::float_trait::GnlmFloat;
use crate::match_list::{BlockMatch, MatchList};
use crate::neighborhood::SearchNeighborhood;

/// Find the best-matching blocks around the neighborhood's center.
///
/// Results are written into `matches` in ascending ranking-distance order
/// with insertion-order tie-breaking; the vector is cleared first. Fewer
/// than `max_matched` entries may be produced when too few candidates pass
/// the gate threshold — the actual length is authoritative.
#[allow(clippy::too_many_arguments)]
pub fn guided_block_matching<F, M1, M2>(
    neighborhood: &SearchNeighborhood,
    alpha: F,
    gate_threshold: F,
    primary_metric: &M1,
    guide_metric: &M2,
    primary_blocks: &SlidingBlocks<'_, F>,
    guide_blocks: &SlidingBands<'_, F>,
    lambda1: F,
    lambda2: F,
    mask: ArrayView2<'_, bool>,
    max_matched: usize,
    matches: &mut Vec<BlockMatch<F>>,
) where
    F: GnlmFloat,
    M1: PatchMetric<F, Ix2>,
    M2: PatchMetric<F, Ix3>,
{
    let mut list = MatchList::new(max_matched, primary_metric.max_distance());
    let center = neighborhood.central();

    if mask[center] {
        let ref_primary = primary_blocks.block(center.0, center.1);
        let ref_guide = guide_blocks.block(center.0, center.1);

        if alpha == F::zero() {
            // Guide-only ranking: the primary bound stays fixed, the guide
            // bound tightens as the list fills.
            let primary_bound = primary_metric.max_distance();
            let mut bound = list.insert(F::zero(), F::zero(), center);
            for pos in neighborhood.scan() {
                if pos == center || !mask[pos] {
                    continue;
                }
                let d1 = primary_metric.distance(
                    primary_blocks.block(pos.0, pos.1),
                    ref_primary,
                    primary_bound,
                );
                if d1 < gate_threshold {
                    let d2 =
                        guide_metric.distance(guide_blocks.block(pos.0, pos.1), ref_guide, bound);
                    bound = list.insert(d2, lambda1 * d1 + lambda2 * d2, pos);
                }
            }
        } else if alpha == F::one() {
            // Noisy-only ranking: symmetric to the guide-only mode.
            let guide_bound = guide_metric.max_distance();
            let mut bound = list.insert(F::zero(), F::zero(), center);
            for pos in neighborhood.scan() {
                if pos == center || !mask[pos] {
                    continue;
                }
                let d1 =
                    primary_metric.distance(primary_blocks.block(pos.0, pos.1), ref_primary, bound);
                if d1 < gate_threshold {
                    let d2 = guide_metric.distance(
                        guide_blocks.block(pos.0, pos.1),
                        ref_guide,
                        guide_bound,
                    );
                    bound = list.insert(d1, lambda1 * d1 + lambda2 * d2, pos);
                }
            }
        } else {
            // Blended ranking: split the combined bound between the metrics
            // in proportion alpha / (1 - alpha).
            let alpha2 = F::one() - alpha;
            let mut bound = list.insert(F::zero(), F::zero(), center);
            for pos in neighborhood.scan() {
                if pos == center || !mask[pos] {
                    continue;
                }
                let d1 = primary_metric.distance(
                    primary_blocks.block(pos.0, pos.1),
                    ref_primary,
                    bound / alpha,
                );
                if d1 < gate_threshold {
                    let d2 = guide_metric.distance(
                        guide_blocks.block(pos.0, pos.1),
                        ref_guide,
                        bound / alpha2,
                    );
                    let combined = alpha * d1 + alpha2 * d2;
                    bound = list.insert(combined, lambda1 * d1 + lambda2 * d2, pos);
                }
            }
        }
    } else {
        list.insert(F::zero(), F::one(), center);
    }

    list.extract_into(matches);
}
