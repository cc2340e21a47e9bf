//! Binning Module
//! Computes bin edges and counts for 1D and 2D histograms.

use super::{ensure_len, linspace, DataError};
use log::{debug, warn};
use rayon::prelude::*;
use statrs::statistics::{Data, OrderStatistics};

/// How the edges of a 1D histogram are chosen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Bins {
    /// The larger of the Sturges and Freedman-Diaconis bin counts, falling
    /// back to Sturges when Freedman-Diaconis exceeds [`MAX_AUTO_BINS`].
    #[default]
    Auto,
    /// A fixed number of equal-width bins over the range.
    Count(usize),
    /// Explicit, strictly increasing edges.
    Edges(Vec<f64>),
}

/// How the edges of a 2D histogram are chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum Bins2D {
    /// Same number of bins along both axes.
    Count(usize),
    /// `(x, y)` bin counts.
    PerAxis(usize, usize),
    /// Explicit `(x, y)` edges.
    Edges(Vec<f64>, Vec<f64>),
}

impl Default for Bins2D {
    fn default() -> Self {
        Bins2D::Count(10)
    }
}

/// Edges and (possibly normalized) counts of a 1D histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<f64>,
}

impl Histogram {
    /// Bin `data`.
    ///
    /// Values outside the range are ignored and the last bin is closed on the
    /// right. With `density` the counts are divided by `total * width` so
    /// that the histogram integrates to one; with `cumulative` each bin holds
    /// the running total up to and including itself.
    pub fn compute(
        data: &[f64],
        bins: &Bins,
        range: Option<(f64, f64)>,
        density: bool,
        cumulative: bool,
    ) -> Result<Self, DataError> {
        if data.is_empty() {
            return Err(DataError::Empty);
        }

        let (lo, hi) = resolve_range(data, range)?;
        let edges = match bins {
            Bins::Auto => auto_edges(data, lo, hi),
            Bins::Count(n) => uniform_edges(lo, hi, *n)?,
            Bins::Edges(edges) => checked_edges(edges)?,
        };

        let mut counts = count(data, &edges);
        if density {
            let total: f64 = counts.iter().sum();
            if total > 0.0 {
                for (c, w) in counts.iter_mut().zip(edges.windows(2)) {
                    *c /= total * (w[1] - w[0]);
                }
            }
        }
        if cumulative {
            let mut running = 0.0;
            for (c, w) in counts.iter_mut().zip(edges.windows(2)) {
                running += if density { *c * (w[1] - w[0]) } else { *c };
                *c = running;
            }
        }

        debug!("Histogram edges: {:?}", edges);
        debug!("Histogram counts: {:?}", counts);

        Ok(Self { edges, counts })
    }

    /// Bin edges; one more than the number of bins.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Value of each bin.
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Width of each bin.
    pub fn widths(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Center of each bin.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }

    /// `sum(counts * widths)`; one for a non-cumulative density histogram.
    pub fn area(&self) -> f64 {
        self.counts
            .iter()
            .zip(self.edges.windows(2))
            .map(|(c, w)| c * (w[1] - w[0]))
            .sum()
    }
}

/// Edges and counts of a 2D histogram; `counts[i][j]` is the x bin `i`,
/// y bin `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram2D {
    x_edges: Vec<f64>,
    y_edges: Vec<f64>,
    counts: Vec<Vec<f64>>,
}

impl Histogram2D {
    pub fn compute(
        a: &[f64],
        b: &[f64],
        bins: &Bins2D,
        range: Option<[(f64, f64); 2]>,
        density: bool,
    ) -> Result<Self, DataError> {
        ensure_len("second sample", a.len(), b.len())?;
        if a.is_empty() {
            return Err(DataError::Empty);
        }

        let (x_range, y_range) = match range {
            Some([x, y]) => (Some(x), Some(y)),
            None => (None, None),
        };

        let (x_edges, y_edges) = match bins {
            Bins2D::Count(n) => (
                uniform_edges_over(a, x_range, *n)?,
                uniform_edges_over(b, y_range, *n)?,
            ),
            Bins2D::PerAxis(nx, ny) => (
                uniform_edges_over(a, x_range, *nx)?,
                uniform_edges_over(b, y_range, *ny)?,
            ),
            Bins2D::Edges(xs, ys) => (checked_edges(xs)?, checked_edges(ys)?),
        };

        let (nx, ny) = (x_edges.len() - 1, y_edges.len() - 1);
        let flat = a
            .par_iter()
            .zip(b.par_iter())
            .fold(
                || vec![0.0; nx * ny],
                |mut acc, (&x, &y)| {
                    if let (Some(i), Some(j)) = (locate(&x_edges, x), locate(&y_edges, y)) {
                        acc[i * ny + j] += 1.0;
                    }
                    acc
                },
            )
            .reduce(|| vec![0.0; nx * ny], merge);

        let mut counts: Vec<Vec<f64>> = flat.chunks(ny).map(|row| row.to_vec()).collect();

        if density {
            let total: f64 = flat.iter().sum();
            if total > 0.0 {
                for (row, xw) in counts.iter_mut().zip(x_edges.windows(2)) {
                    for (c, yw) in row.iter_mut().zip(y_edges.windows(2)) {
                        *c /= total * (xw[1] - xw[0]) * (yw[1] - yw[0]);
                    }
                }
            }
        }

        debug!("2D histogram: {} x {} bins", nx, ny);

        Ok(Self {
            x_edges,
            y_edges,
            counts,
        })
    }

    pub fn x_edges(&self) -> &[f64] {
        &self.x_edges
    }

    pub fn y_edges(&self) -> &[f64] {
        &self.y_edges
    }

    pub fn counts(&self) -> &[Vec<f64>] {
        &self.counts
    }

    /// Smallest and largest bin value.
    pub fn value_range(&self) -> (f64, f64) {
        self.counts
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

fn resolve_range(data: &[f64], range: Option<(f64, f64)>) -> Result<(f64, f64), DataError> {
    if let Some((lo, hi)) = range {
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(DataError::InvalidRange(lo, hi));
        }
        return Ok((lo, hi));
    }

    let (lo, hi) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo > hi {
        return Err(DataError::Empty);
    }
    if lo == hi {
        Ok((lo - 0.5, hi + 0.5))
    } else {
        Ok((lo, hi))
    }
}

fn uniform_edges(lo: f64, hi: f64, n: usize) -> Result<Vec<f64>, DataError> {
    if n == 0 {
        return Err(DataError::InvalidBins("at least one bin is required".to_string()));
    }
    Ok(linspace(lo, hi, n + 1, true))
}

fn uniform_edges_over(data: &[f64], range: Option<(f64, f64)>, n: usize) -> Result<Vec<f64>, DataError> {
    let (lo, hi) = resolve_range(data, range)?;
    uniform_edges(lo, hi, n)
}

fn checked_edges(edges: &[f64]) -> Result<Vec<f64>, DataError> {
    if edges.len() < 2 {
        return Err(DataError::InvalidBins("at least two edges are required".to_string()));
    }
    if edges.iter().any(|e| !e.is_finite()) || edges.windows(2).any(|w| w[1] <= w[0]) {
        return Err(DataError::InvalidBins(
            "edges must be finite and strictly increasing".to_string(),
        ));
    }
    Ok(edges.to_vec())
}

/// Upper bound on the number of automatic bins. Past it the
/// Freedman-Diaconis estimate is dropped in favour of Sturges.
pub const MAX_AUTO_BINS: usize = 10_000;

/// Equal-width edges whose count is the larger of the Sturges and
/// Freedman-Diaconis estimates, capped at [`MAX_AUTO_BINS`].
fn auto_edges(data: &[f64], lo: f64, hi: f64) -> Vec<f64> {
    let inside: Vec<f64> = data
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v >= lo && *v <= hi)
        .collect();
    let n = inside.len().max(1) as f64;
    let span = hi - lo;

    let sturges = span / (n.log2() + 1.0);
    let iqr = Data::new(inside).interquartile_range();
    let fd = 2.0 * iqr / n.cbrt();
    let sturges_count = (span / sturges).ceil().max(1.0);
    let fd_count = if fd.is_finite() && fd > 0.0 {
        (span / fd).ceil()
    } else {
        0.0
    };

    // A lone outlier stretches the span far beyond the IQR.
    let count = if fd_count > MAX_AUTO_BINS as f64 {
        warn!(
            "Freedman-Diaconis asks for {} bins, using {} (Sturges)",
            fd_count, sturges_count
        );
        sturges_count
    } else {
        fd_count.max(sturges_count)
    };
    let count = (count as usize).clamp(1, MAX_AUTO_BINS);
    linspace(lo, hi, count + 1, true)
}

fn locate(edges: &[f64], v: f64) -> Option<usize> {
    let last = edges.len() - 1;
    if !(v >= edges[0] && v <= edges[last]) {
        return None;
    }
    if v == edges[last] {
        return Some(last - 1);
    }
    Some(edges.partition_point(|&e| e <= v) - 1)
}

fn count(data: &[f64], edges: &[f64]) -> Vec<f64> {
    let n = edges.len() - 1;
    data.par_iter()
        .fold(
            || vec![0.0; n],
            |mut acc, &v| {
                if let Some(i) = locate(edges, v) {
                    acc[i] += 1.0;
                }
                acc
            },
        )
        .reduce(|| vec![0.0; n], merge)
}

fn merge(mut a: Vec<f64>, b: Vec<f64>) -> Vec<f64> {
    for (x, y) in a.iter_mut().zip(b) {
        *x += y;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_use_closed_last_bin() {
        let hist =
            Histogram::compute(&[0.0, 0.5, 1.0, 1.5, 2.0], &Bins::Count(2), None, false, false)
                .unwrap();
        assert_eq!(hist.edges(), &[0.0, 1.0, 2.0]);
        assert_eq!(hist.counts(), &[2.0, 3.0]);
    }

    #[test]
    fn values_outside_range_are_ignored() {
        let hist = Histogram::compute(
            &[-5.0, 0.2, 0.7, 9.0],
            &Bins::Count(2),
            Some((0.0, 1.0)),
            false,
            false,
        )
        .unwrap();
        assert_eq!(hist.counts(), &[1.0, 1.0]);
    }

    #[test]
    fn density_integrates_to_one() {
        let data: Vec<f64> = (0..200).map(|i| ((i * 37) % 101) as f64 / 7.0).collect();
        let hist = Histogram::compute(&data, &Bins::Auto, None, true, false).unwrap();
        assert!((hist.area() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cumulative_density_ends_at_one() {
        let data = [1.0, 2.0, 2.0, 3.0, 4.0, 4.0, 4.0];
        let hist = Histogram::compute(&data, &Bins::Count(3), None, true, true).unwrap();
        let last = *hist.counts().last().unwrap();
        assert!((last - 1.0).abs() < 1e-12);
        assert!(hist.counts().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn outlier_does_not_blow_up_auto_bins() {
        let mut data: Vec<f64> = (0..1000).map(|i| i as f64 / 1000.0).collect();
        data.push(1.0e5);
        let hist = Histogram::compute(&data, &Bins::Auto, None, false, false).unwrap();
        assert!(hist.bin_count() <= MAX_AUTO_BINS);
        assert_eq!(hist.bin_count(), 11);
        assert_eq!(hist.counts().iter().sum::<f64>(), 1001.0);

        data.push(1.0e12);
        let hist = Histogram::compute(&data, &Bins::Auto, None, true, false).unwrap();
        assert!(hist.bin_count() <= MAX_AUTO_BINS);
        assert!((hist.area() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn constant_data_gets_unit_range() {
        let hist = Histogram::compute(&[3.0, 3.0, 3.0], &Bins::Count(1), None, false, false)
            .unwrap();
        assert_eq!(hist.edges(), &[2.5, 3.5]);
        assert_eq!(hist.counts(), &[3.0]);
    }

    #[test]
    fn explicit_edges_are_validated() {
        assert!(matches!(
            Histogram::compute(&[1.0], &Bins::Edges(vec![0.0, 2.0, 1.0]), None, false, false),
            Err(DataError::InvalidBins(_))
        ));
        assert!(matches!(
            Histogram::compute(&[1.0], &Bins::Count(0), None, false, false),
            Err(DataError::InvalidBins(_))
        ));
        assert_eq!(
            Histogram::compute(&[], &Bins::Auto, None, false, false),
            Err(DataError::Empty)
        );
    }

    #[test]
    fn histogram_2d_counts_pairs() {
        let a = [0.0, 0.0, 1.0, 1.0];
        let b = [0.0, 1.0, 1.0, 1.0];
        let hist = Histogram2D::compute(&a, &b, &Bins2D::Count(2), None, false).unwrap();
        assert_eq!(hist.counts(), &[vec![1.0, 1.0], vec![0.0, 2.0]]);
        assert_eq!(hist.value_range(), (0.0, 2.0));
    }

    #[test]
    fn histogram_2d_rejects_unequal_samples() {
        assert!(matches!(
            Histogram2D::compute(&[0.0, 1.0], &[0.0], &Bins2D::Count(2), None, false),
            Err(DataError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn histogram_2d_density_integrates_to_one() {
        let a: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
        let b: Vec<f64> = (0..50).map(|i| (i % 7) as f64).collect();
        let hist = Histogram2D::compute(&a, &b, &Bins2D::PerAxis(4, 3), None, true).unwrap();
        let area: f64 = hist
            .counts()
            .iter()
            .zip(hist.x_edges().windows(2))
            .flat_map(|(row, xw)| {
                row.iter()
                    .zip(hist.y_edges().windows(2))
                    .map(move |(c, yw)| c * (xw[1] - xw[0]) * (yw[1] - yw[0]))
            })
            .sum();
        assert!((area - 1.0).abs() < 1e-9);
    }
}
