//! Charts module - Preset drawables

mod histogram;
mod histogram_2d;
mod image;
pub mod palette;
mod plot;
mod scatter;

pub use histogram::{Hist, HistOptions};
pub use histogram_2d::Hist2D;
pub use image::{Image, Origin};
pub use plot::Plot;
pub use scatter::ScatterPlot;

use crate::canvas::{Canvas, CanvasError};

/// Something that renders itself onto one subplot of a canvas.
pub trait Draw {
    /// Append this item to subplot `index` of `canvas`. Fails without
    /// touching the canvas when the input data is inconsistent.
    fn draw(&self, canvas: &mut Canvas, index: usize) -> Result<(), CanvasError>;
}

/// The closed set of preset drawables.
#[derive(Debug, Clone)]
pub enum Drawable {
    Plot(Plot),
    Scatter(ScatterPlot),
    Hist(Hist),
    Hist2D(Hist2D),
    Image(Image),
}

impl Draw for Drawable {
    fn draw(&self, canvas: &mut Canvas, index: usize) -> Result<(), CanvasError> {
        match self {
            Drawable::Plot(p) => p.draw(canvas, index),
            Drawable::Scatter(s) => s.draw(canvas, index),
            Drawable::Hist(h) => h.draw(canvas, index),
            Drawable::Hist2D(h) => h.draw(canvas, index),
            Drawable::Image(i) => i.draw(canvas, index),
        }
    }
}

impl From<Plot> for Drawable {
    fn from(p: Plot) -> Self {
        Drawable::Plot(p)
    }
}

impl From<ScatterPlot> for Drawable {
    fn from(s: ScatterPlot) -> Self {
        Drawable::Scatter(s)
    }
}

impl From<Hist> for Drawable {
    fn from(h: Hist) -> Self {
        Drawable::Hist(h)
    }
}

impl From<Hist2D> for Drawable {
    fn from(h: Hist2D) -> Self {
        Drawable::Hist2D(h)
    }
}

impl From<Image> for Drawable {
    fn from(i: Image) -> Self {
        Drawable::Image(i)
    }
}
