//! 2D Histogram
//! Colormapped counts over a rectangular grid of bins, with a color bar.

use super::palette::{Colormap, Scale, Shading};
use super::Draw;
use crate::canvas::layer::CellLayer;
use crate::canvas::{Canvas, CanvasError, Cell, ColorBar, Layer};
use crate::data::{Bins2D, DataError, Histogram2D};
use log::{debug, info};

#[derive(Debug, Clone)]
pub struct Hist2D {
    histogram: Histogram2D,
    colormap: Colormap,
    alpha: f64,
    scale: Scale,
    colorbar_label: Option<String>,
}

impl Hist2D {
    pub fn new(a: &[f64], b: &[f64], bins: Bins2D) -> Result<Self, DataError> {
        Self::with_options(a, b, bins, false, None)
    }

    /// `range` is `[(xmin, xmax), (ymin, ymax)]`; the data extent when `None`.
    pub fn with_options(
        a: &[f64],
        b: &[f64],
        bins: Bins2D,
        density: bool,
        range: Option<[(f64, f64); 2]>,
    ) -> Result<Self, DataError> {
        info!("Created 'Hist2D' object");
        Ok(Self {
            histogram: Histogram2D::compute(a, b, &bins, range, density)?,
            colormap: Colormap::Plasma,
            alpha: 1.0,
            scale: Scale::Linear,
            colorbar_label: None,
        })
    }

    pub fn colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn colorbar_label(mut self, label: impl Into<String>) -> Self {
        self.colorbar_label = Some(label.into());
        self
    }

    /// Bin values indexed `[x][y]`.
    pub fn counts(&self) -> &[Vec<f64>] {
        self.histogram.counts()
    }

    pub fn x_bins(&self) -> &[f64] {
        self.histogram.x_edges()
    }

    pub fn y_bins(&self) -> &[f64] {
        self.histogram.y_edges()
    }

    fn shading(&self) -> Shading {
        let fallback = match self.scale {
            Scale::Log => (1.0, 10.0),
            _ => (0.0, 1.0),
        };
        let range = self
            .scale
            .value_range(self.counts().iter().flatten().copied())
            .unwrap_or(fallback);
        Shading {
            colormap: self.colormap,
            scale: self.scale,
            range,
        }
    }

    fn cells(&self, shading: &Shading) -> Vec<Cell> {
        let mut cells = Vec::new();
        for (row, xw) in self.counts().iter().zip(self.x_bins().windows(2)) {
            for (&v, yw) in row.iter().zip(self.y_bins().windows(2)) {
                // Values the scale cannot show (e.g. zero on a log scale) stay blank.
                if let Some(color) = shading.color(v) {
                    cells.push(Cell {
                        x: (xw[0], xw[1]),
                        y: (yw[0], yw[1]),
                        color,
                    });
                }
            }
        }
        cells
    }
}

impl Draw for Hist2D {
    fn draw(&self, canvas: &mut Canvas, index: usize) -> Result<(), CanvasError> {
        self.scale.validate()?;
        let shading = self.shading();
        let cells = self.cells(&shading);
        let count = cells.len();

        canvas.add_layer(
            index,
            Layer::Cells(CellLayer {
                cells,
                alpha: self.alpha,
                colorbar: Some(ColorBar {
                    shading,
                    label: self.colorbar_label.clone(),
                }),
            }),
        )?;
        debug!("Hist2D drawn on subplot {} ({} cells)", index, count);
        Ok(())
    }
}
