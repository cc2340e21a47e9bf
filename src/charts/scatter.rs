//! Scatter Plot
//! Markers with optional x/y error bars.

use super::palette;
use super::Draw;
use crate::canvas::layer::MarkerLayer;
use crate::canvas::{Canvas, CanvasError, Layer, Marker};
use crate::data::{ensure_len, DataError};
use crate::text::SeriesKind;
use log::{debug, info};
use plotters::style::RGBColor;

#[derive(Debug, Clone)]
pub struct ScatterPlot {
    x: Vec<f64>,
    y: Vec<f64>,
    y_err: Option<Vec<f64>>,
    x_err: Option<Vec<f64>>,
    color: RGBColor,
    marker: Marker,
    marker_size: i32,
    label: Option<String>,
}

impl ScatterPlot {
    pub fn new(x: Vec<f64>, y: Vec<f64>, y_err: Option<Vec<f64>>, x_err: Option<Vec<f64>>) -> Self {
        info!("Created 'ScatterPlot' object");
        Self {
            x,
            y,
            y_err,
            x_err,
            color: palette::FIREBRICK,
            marker: Marker::Circle,
            marker_size: 4,
            label: None,
        }
    }

    pub fn color(mut self, color: RGBColor) -> Self {
        self.color = color;
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn marker_size(mut self, size: i32) -> Self {
        self.marker_size = size;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Check that y values and errors match the x values in length.
    pub fn validate(&self) -> Result<(), DataError> {
        ensure_len("y values", self.x.len(), self.y.len())?;
        if let Some(y_err) = &self.y_err {
            ensure_len("y errors", self.x.len(), y_err.len())?;
        }
        if let Some(x_err) = &self.x_err {
            ensure_len("x errors", self.x.len(), x_err.len())?;
        }
        Ok(())
    }
}

impl Draw for ScatterPlot {
    fn draw(&self, canvas: &mut Canvas, index: usize) -> Result<(), CanvasError> {
        self.validate()?;

        let label = canvas.series_label(index, SeriesKind::Dataset, self.label.as_deref())?;
        canvas.add_layer(
            index,
            Layer::Markers(MarkerLayer {
                points: self.x.iter().copied().zip(self.y.iter().copied()).collect(),
                x_err: self.x_err.clone(),
                y_err: self.y_err.clone(),
                color: self.color,
                marker: self.marker,
                size: self.marker_size,
                label,
            }),
        )?;
        debug!("ScatterPlot drawn on subplot {}", index);
        Ok(())
    }
}
