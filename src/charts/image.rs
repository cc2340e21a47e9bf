//! Image
//! A scalar grid shown through a colormap, or an RGBA picture, mapped onto
//! a data-space extent.

use super::palette::{Colormap, Scale, Shading};
use super::Draw;
use crate::canvas::layer::CellLayer;
use crate::canvas::{Canvas, CanvasError, Cell, ColorBar, Layer};
use crate::data::DataError;
use crate::text::SeriesKind;
use image::RgbaImage;
use log::{debug, info};
use plotters::style::RGBColor;
use std::path::Path;

/// Where row 0 of the grid is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    Upper,
    Lower,
}

#[derive(Debug, Clone)]
enum Pixels {
    Scalar(Vec<Vec<f64>>),
    Rgba(RgbaImage),
}

#[derive(Debug, Clone)]
pub struct Image {
    pixels: Pixels,
    colormap: Colormap,
    scale: Scale,
    value_range: Option<(f64, f64)>,
    origin: Origin,
    extent: Option<[f64; 4]>,
    alpha: f64,
    label: Option<String>,
}

impl Image {
    /// Scalar grid given as rows; every row must have the same length.
    pub fn from_grid(rows: Vec<Vec<f64>>) -> Result<Self, DataError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(DataError::Empty);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(DataError::RaggedGrid {
                row,
                expected: width,
                found,
            });
        }
        info!("Created 'Image' object ({} x {} grid)", rows.len(), width);
        Ok(Self::with_pixels(Pixels::Scalar(rows)))
    }

    pub fn from_rgba(image: RgbaImage) -> Self {
        info!("Created 'Image' object ({} x {} pixels)", image.width(), image.height());
        Self::with_pixels(Pixels::Rgba(image))
    }

    /// Decode a picture file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CanvasError> {
        let image = image::open(path.as_ref())?.to_rgba8();
        Ok(Self::from_rgba(image))
    }

    fn with_pixels(pixels: Pixels) -> Self {
        Self {
            pixels,
            colormap: Colormap::Plasma,
            scale: Scale::Linear,
            value_range: None,
            origin: Origin::Upper,
            extent: None,
            alpha: 1.0,
            label: None,
        }
    }

    pub fn colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    /// Values mapped to the ends of the colormap.
    pub fn value_range(mut self, lo: f64, hi: f64) -> Self {
        self.value_range = Some((lo, hi));
        self
    }

    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// `[left, right, bottom, top]` in data coordinates. Defaults to one
    /// unit per pixel starting at the origin.
    pub fn extent(mut self, extent: [f64; 4]) -> Self {
        self.extent = Some(extent);
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

    /// Grid size as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        match &self.pixels {
            Pixels::Scalar(rows) => (rows.len(), rows.first().map(Vec::len).unwrap_or(0)),
            Pixels::Rgba(img) => (img.height() as usize, img.width() as usize),
        }
    }

    fn shading(&self, rows: &[Vec<f64>]) -> Shading {
        let range = self
            .value_range
            .or_else(|| self.scale.value_range(rows.iter().flatten().copied()))
            .unwrap_or((0.0, 1.0));
        Shading {
            colormap: self.colormap,
            scale: self.scale,
            range,
        }
    }

    /// Data-space rectangle of pixel `(row, col)`.
    fn cell_rect(&self, row: usize, col: usize) -> ((f64, f64), (f64, f64)) {
        let (nrows, ncols) = self.shape();
        let [left, right, bottom, top] = self
            .extent
            .unwrap_or([0.0, ncols as f64, 0.0, nrows as f64]);
        let dx = (right - left) / ncols as f64;
        let dy = (top - bottom) / nrows as f64;

        let x = (left + col as f64 * dx, left + (col + 1) as f64 * dx);
        let y = match self.origin {
            Origin::Upper => (top - (row + 1) as f64 * dy, top - row as f64 * dy),
            Origin::Lower => (bottom + row as f64 * dy, bottom + (row + 1) as f64 * dy),
        };
        (x, y)
    }

    fn layer(&self, label: Option<String>) -> CellLayer {
        let mut cells = Vec::new();
        let colorbar = match &self.pixels {
            Pixels::Scalar(rows) => {
                let shading = self.shading(rows);
                for (r, row) in rows.iter().enumerate() {
                    for (c, &v) in row.iter().enumerate() {
                        if let Some(color) = shading.color(v) {
                            let (x, y) = self.cell_rect(r, c);
                            cells.push(Cell { x, y, color });
                        }
                    }
                }
                Some(ColorBar { shading, label })
            }
            Pixels::Rgba(img) => {
                for (c, r, px) in img.enumerate_pixels() {
                    let [red, green, blue, a] = px.0;
                    // Fully transparent pixels are not drawn.
                    if a == 0 {
                        continue;
                    }
                    let (x, y) = self.cell_rect(r as usize, c as usize);
                    cells.push(Cell {
                        x,
                        y,
                        color: RGBColor(red, green, blue),
                    });
                }
                None
            }
        };
        CellLayer {
            cells,
            alpha: self.alpha,
            colorbar,
        }
    }
}

impl Draw for Image {
    fn draw(&self, canvas: &mut Canvas, index: usize) -> Result<(), CanvasError> {
        self.scale.validate()?;
        let label = canvas.series_label(index, SeriesKind::Image, self.label.as_deref())?;
        let layer = self.layer(label);
        let count = layer.cells.len();
        canvas.add_layer(index, Layer::Cells(layer))?;
        debug!("Image drawn on subplot {} ({} cells)", index, count);
        Ok(())
    }
}
