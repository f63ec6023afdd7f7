//! Window functions and the 2-D aggregation window.
//!
//! The aggregation step weights each block with a fixed 2-D mask built once
//! per configuration from a 1-D window (symmetric sampling) outer-producted
//! with itself. Kaiser is the profile default; the rest of the family is
//! kept for completeness.

use ndarray::{Array2, ArrayView2, Zip};

use crate::float_trait::GnlmFloat;

/// Supported 1-D window shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Flat window (all ones).
    Ones,
    /// Hamming: `0.54 - 0.46 cos(2 pi n / N)`.
    Hamming,
    /// Hanning: `0.5 (1 - cos(2 pi n / N))`.
    Hanning,
    /// Blackman: `0.42 - 0.5 cos(2 pi n / N) + 0.08 cos(4 pi n / N)`.
    Blackman,
    /// Kaiser window with shape parameter beta.
    Kaiser,
}

/// Sample a 1-D window of the given size (symmetric sampling). `beta` is
/// only consulted by the Kaiser window.
pub fn window_1d<F: GnlmFloat>(kind: WindowKind, size: usize, beta: F) -> Vec<F> {
    if size <= 1 {
        return vec![F::one(); size];
    }
    match kind {
        WindowKind::Ones => vec![F::one(); size],
        WindowKind::Hamming => cosine_window(size, 0.54, 0.46, 0.0),
        WindowKind::Hanning => cosine_window(size, 0.5, 0.5, 0.0),
        WindowKind::Blackman => cosine_window(size, 0.42, 0.5, 0.08),
        WindowKind::Kaiser => kaiser(size, beta),
    }
}

/// Generalized cosine window: `a0 - a1 cos(2 pi x / N) + a2 cos(4 pi x / N)`
/// with `N = size - 1`.
fn cosine_window<F: GnlmFloat>(size: usize, a0: f64, a1: f64, a2: f64) -> Vec<F> {
    let two_pi = F::PI + F::PI;
    let n = F::usize_as(size - 1);
    let (a0, a1, a2) = (F::from_f64_c(a0), F::from_f64_c(a1), F::from_f64_c(a2));
    (0..size)
        .map(|i| {
            let x = F::usize_as(i) / n;
            a0 - a1 * (two_pi * x).cos() + a2 * (two_pi * (x + x)).cos()
        })
        .collect()
}

/// Zeroth-order modified Bessel function of the first kind, by series
/// expansion. Truncated at 25 terms or once the relative contribution drops
/// below 1e-8.
fn bessel_i0<F: GnlmFloat>(x: F) -> F {
    let tolerance = F::from_f64_c(1.0e-8);
    let y = F::from_f64_c(0.5) * x;
    let mut e = F::one();
    let mut de = F::one();
    for i in 1..26 {
        de = de * y / F::usize_as(i);
        let sde = de * de;
        e += sde;
        if e * tolerance - sde > F::zero() {
            break;
        }
    }
    e
}

fn kaiser<F: GnlmFloat>(size: usize, beta: F) -> Vec<F> {
    let bes = bessel_i0(beta);
    let xd = F::usize_as((size - 1) * (size - 1));
    let four = F::from_f64_c(4.0);
    let half = F::from_f64_c(0.5);

    // Compute the upper half (center outward) and mirror it.
    let odd = size % 2;
    let n = (size + odd) / 2;
    let mut half_win = Vec::with_capacity(n);
    for i in 0..n {
        let xi = if odd == 1 {
            F::usize_as(i)
        } else {
            F::usize_as(i) + half
        };
        let xi = four * xi * xi;
        half_win.push(bessel_i0(beta * (F::one() - xi / xd).sqrt()) / bes);
    }

    let mut win = Vec::with_capacity(size);
    win.extend(half_win.iter().rev().copied());
    win.extend(half_win.iter().skip(odd).copied());
    win
}

/// Precomputed 2-D aggregation window (outer product of a 1-D window with
/// itself), built once per configuration and read-only thereafter.
#[derive(Debug, Clone)]
pub struct AggregationWindow<F> {
    win: Array2<F>,
}

impl<F: GnlmFloat> AggregationWindow<F> {
    pub fn new(kind: WindowKind, rows: usize, cols: usize, beta: F) -> Self {
        let win_row = window_1d(kind, rows, beta);
        let win_col = window_1d(kind, cols, beta);
        let win = Array2::from_shape_fn((rows, cols), |(i, j)| win_row[i] * win_col[j]);
        Self { win }
    }

    /// The weight matrix.
    pub fn matrix(&self) -> &Array2<F> {
        &self.win
    }

    /// `dest = src` weighted element-wise by the window.
    pub fn apply(&self, src: ArrayView2<'_, F>, dest: &mut Array2<F>) {
        debug_assert_eq!(src.dim(), self.win.dim());
        Zip::from(dest)
            .and(src)
            .and(&self.win)
            .for_each(|d, &s, &w| *d = s * w);
    }
}
