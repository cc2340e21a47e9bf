//! Function Plot
//! A line through `f(x)` over a widened, densified domain.

use super::palette;
use super::Draw;
use crate::canvas::layer::LineLayer;
use crate::canvas::{Canvas, CanvasError, Layer};
use crate::data::{ensure_len, make_wider, DataError};
use crate::text::SeriesKind;
use log::{debug, info};
use plotters::style::RGBColor;

/// Density used when widening the domain of a function.
const DEFAULT_DENSITY: usize = 2;

#[derive(Debug, Clone)]
pub struct Plot {
    x: Vec<f64>,
    y: Vec<f64>,
    color: RGBColor,
    line_width: f64,
    inverted: bool,
    label: Option<String>,
}

impl Plot {
    /// Evaluate `f` over `x` widened by `(left, right)` fractions of its
    /// span and densified.
    pub fn new<F>(x: &[f64], f: F, wider: (f64, f64)) -> Result<Self, DataError>
    where
        F: Fn(f64) -> f64,
    {
        Self::with_density(x, f, wider, DEFAULT_DENSITY)
    }

    pub fn with_density<F>(x: &[f64], f: F, wider: (f64, f64), density: usize) -> Result<Self, DataError>
    where
        F: Fn(f64) -> f64,
    {
        info!("Created 'Plot' object");
        let x = make_wider(x, wider.0, wider.1, density)?;
        let y = x.iter().map(|&v| f(v)).collect();
        Ok(Self::from_points(x, y))
    }

    /// Plot given y values; lengths are checked when drawing.
    pub fn from_points(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            color: palette::BLACK,
            line_width: 1.5,
            inverted: false,
            label: None,
        }
    }

    pub fn color(mut self, color: RGBColor) -> Self {
        self.color = color;
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    /// Plot `x` against `y` instead, i.e. the inverse function.
    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

impl Draw for Plot {
    fn draw(&self, canvas: &mut Canvas, index: usize) -> Result<(), CanvasError> {
        ensure_len("y values", self.x.len(), self.y.len())?;

        let points = self
            .x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| if self.inverted { (y, x) } else { (x, y) })
            .collect();
        let label = canvas.series_label(index, SeriesKind::Function, self.label.as_deref())?;

        canvas.add_layer(
            index,
            Layer::Line(LineLayer {
                points,
                color: self.color,
                width: self.line_width,
                label,
            }),
        )?;
        debug!("Plot drawn on subplot {}", index);
        Ok(())
    }
}
