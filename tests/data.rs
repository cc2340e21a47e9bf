//! Integration tests for sampling helpers and histogram binning.

use plotter::data::{linspace, make_denser, make_wider, Histogram, MAX_AUTO_BINS};
use plotter::{Bins, DataError, Hist, HistOptions};

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{:?} vs {:?}", actual, expected);
    }
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

#[test]
fn make_wider_extends_both_ends() {
    let wide = make_wider(&[0.0, 1.0, 2.0], 0.1, 0.1, 1).unwrap();
    assert_close(&wide, &[-0.2, 0.0, 1.0, 2.0, 2.2]);
}

#[test]
fn make_denser_inserts_midpoints() {
    assert_close(&make_denser(&[0.0, 1.0, 2.0], 2), &[0.0, 0.5, 1.0, 1.5, 2.0]);
}

#[test]
fn invalid_sampling_arguments_fail() {
    assert!(matches!(
        make_wider(&[0.0, 1.0], -0.1, 0.0, 1),
        Err(DataError::NegativeWidening { .. })
    ));
    assert!(matches!(
        make_wider(&[0.0, 1.0], 0.1, 0.1, 0),
        Err(DataError::InvalidDensity(0))
    ));
    assert!(matches!(make_wider(&[], 0.1, 0.1, 1), Err(DataError::Empty)));
}

#[test]
fn linspace_with_and_without_endpoint() {
    assert_close(&linspace(0.0, 1.0, 5, true), &[0.0, 0.25, 0.5, 0.75, 1.0]);
    assert_close(&linspace(0.0, 1.0, 4, false), &[0.0, 0.25, 0.5, 0.75]);
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

#[test]
fn density_hist_integrates_to_one() {
    let data: Vec<f64> = (0..1000).map(|i| ((i * 37) % 101) as f64 / 10.0).collect();
    for bins in [Bins::Auto, Bins::Count(7), Bins::Edges(vec![0.0, 2.5, 5.0, 10.0])] {
        let hist = Hist::with_options(
            &data,
            HistOptions {
                bins,
                density: true,
                ..HistOptions::default()
            },
        )
        .unwrap();
        assert!((hist.histogram().area() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn counts_include_the_last_edge() {
    let hist = Histogram::compute(&[0.0, 1.0, 2.0, 3.0], &Bins::Count(3), None, false, false).unwrap();
    assert_close(hist.edges(), &[0.0, 1.0, 2.0, 3.0]);
    assert_close(hist.counts(), &[1.0, 1.0, 2.0]);
}

#[test]
fn cumulative_counts_end_at_sample_size() {
    let data = [0.5, 1.5, 1.7, 2.5];
    let hist = Histogram::compute(&data, &Bins::Count(3), Some((0.0, 3.0)), false, true).unwrap();
    assert_close(hist.counts(), &[1.0, 3.0, 4.0]);
}

#[test]
fn single_outlier_keeps_auto_bins_small() {
    let mut data: Vec<f64> = (0..1000).map(|i| i as f64 / 1000.0).collect();
    data.push(1.0e12);
    let hist = Hist::new(&data, true).unwrap();
    assert!(hist.counts().len() <= MAX_AUTO_BINS);
    assert!((hist.histogram().area() - 1.0).abs() < 1e-9);
}

#[test]
fn empty_sample_is_rejected() {
    assert!(matches!(Hist::new(&[], false), Err(DataError::Empty)));
}
