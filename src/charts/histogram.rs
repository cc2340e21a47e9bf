//! Histogram
//! 1D histogram whose bins are computed at construction, so edges and
//! counts are available before (and without) drawing, e.g. to fit a curve.

use super::palette;
use super::Draw;
use crate::canvas::layer::BarLayer;
use crate::canvas::{Canvas, CanvasError, Layer};
use crate::data::{Bins, DataError, Histogram};
use crate::text::SeriesKind;
use log::{debug, info};
use plotters::style::RGBColor;

/// Binning options of a [`Hist`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistOptions {
    pub bins: Bins,
    /// Lower and upper edge; the data extent when `None`.
    pub range: Option<(f64, f64)>,
    /// Normalize so the histogram integrates to one.
    pub density: bool,
    pub cumulative: bool,
}

#[derive(Debug, Clone)]
pub struct Hist {
    histogram: Histogram,
    color: RGBColor,
    alpha: f64,
    label: Option<String>,
}

impl Hist {
    pub fn new(data: &[f64], density: bool) -> Result<Self, DataError> {
        Self::with_options(
            data,
            HistOptions {
                density,
                ..HistOptions::default()
            },
        )
    }

    pub fn with_options(data: &[f64], options: HistOptions) -> Result<Self, DataError> {
        info!("Created 'Hist' object");
        let histogram = Histogram::compute(
            data,
            &options.bins,
            options.range,
            options.density,
            options.cumulative,
        )?;
        Ok(Self {
            histogram,
            color: palette::CORNFLOWER_BLUE,
            alpha: 1.0,
            label: None,
        })
    }

    pub fn color(mut self, color: RGBColor) -> Self {
        self.color = color;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Bin edges (number of bins + 1).
    pub fn bins(&self) -> &[f64] {
        self.histogram.edges()
    }

    pub fn counts(&self) -> &[f64] {
        self.histogram.counts()
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }
}

impl Draw for Hist {
    fn draw(&self, canvas: &mut Canvas, index: usize) -> Result<(), CanvasError> {
        let label = canvas.series_label(index, SeriesKind::Histogram, self.label.as_deref())?;
        canvas.add_layer(
            index,
            Layer::Bars(BarLayer {
                edges: self.bins().to_vec(),
                heights: self.counts().to_vec(),
                color: self.color,
                alpha: self.alpha,
                label,
            }),
        )?;
        debug!("Hist drawn on subplot {}", index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_and_counts_are_available_after_construction() {
        let hist = Hist::with_options(
            &[1.0, 1.5, 2.5, 3.0],
            HistOptions {
                bins: Bins::Count(2),
                ..HistOptions::default()
            },
        )
        .unwrap();
        assert_eq!(hist.bins(), &[1.0, 2.0, 3.0]);
        assert_eq!(hist.counts(), &[2.0, 2.0]);
    }

    #[test]
    fn density_histogram_has_unit_area() {
        let data: Vec<f64> = (0..500).map(|i| ((i as f64) * 0.618).fract() * 4.0 - 2.0).collect();
        let hist = Hist::new(&data, true).unwrap();
        let area: f64 = hist
            .counts()
            .iter()
            .zip(hist.bins().windows(2))
            .map(|(c, w)| c * (w[1] - w[0]))
            .sum();
        assert!((area - 1.0).abs() < 1e-9);
    }
}
