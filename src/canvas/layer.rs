//! Layer Module
//! Retained artists stored in a subplot until the canvas is finalized.

use crate::charts::palette::Shading;
use plotters::style::RGBColor;

/// Marker shapes for scatter plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    #[default]
    Circle,
    Square,
    Triangle,
    Cross,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineLayer {
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub width: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLayer {
    pub points: Vec<(f64, f64)>,
    pub x_err: Option<Vec<f64>>,
    pub y_err: Option<Vec<f64>>,
    pub color: RGBColor,
    pub marker: Marker,
    pub size: i32,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayer {
    pub edges: Vec<f64>,
    pub heights: Vec<f64>,
    pub color: RGBColor,
    pub alpha: f64,
    pub label: Option<String>,
}

/// One colored rectangle `[x0, x1] x [y0, y1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub color: RGBColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorBar {
    pub shading: Shading,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellLayer {
    pub cells: Vec<Cell>,
    pub alpha: f64,
    pub colorbar: Option<ColorBar>,
}

/// Data-space bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Bounds {
    fn from_points<I: IntoIterator<Item = (f64, f64)>>(points: I) -> Option<Self> {
        points
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .fold(None, |acc: Option<Bounds>, (x, y)| {
                Some(match acc {
                    None => Bounds {
                        x: (x, x),
                        y: (y, y),
                    },
                    Some(b) => Bounds {
                        x: (b.x.0.min(x), b.x.1.max(x)),
                        y: (b.y.0.min(y), b.y.1.max(y)),
                    },
                })
            })
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            x: (self.x.0.min(other.x.0), self.x.1.max(other.x.1)),
            y: (self.y.0.min(other.y.0), self.y.1.max(other.y.1)),
        }
    }
}

/// A retained artist.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Line(LineLayer),
    Markers(MarkerLayer),
    Bars(BarLayer),
    Cells(CellLayer),
}

impl Layer {
    pub fn label(&self) -> Option<&str> {
        match self {
            Layer::Line(l) => l.label.as_deref(),
            Layer::Markers(m) => m.label.as_deref(),
            Layer::Bars(b) => b.label.as_deref(),
            Layer::Cells(_) => None,
        }
    }

    pub fn colorbar(&self) -> Option<&ColorBar> {
        match self {
            Layer::Cells(c) => c.colorbar.as_ref(),
            _ => None,
        }
    }

    /// Extent of the layer, including error bars and bar baselines.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Layer::Line(l) => Bounds::from_points(l.points.iter().copied()),
            Layer::Markers(m) => {
                let err = |errs: &Option<Vec<f64>>, i: usize| {
                    errs.as_ref().and_then(|e| e.get(i)).copied().unwrap_or(0.0).abs()
                };
                Bounds::from_points(m.points.iter().enumerate().flat_map(|(i, &(x, y))| {
                    let (dx, dy) = (err(&m.x_err, i), err(&m.y_err, i));
                    [(x - dx, y - dy), (x + dx, y + dy)]
                }))
            }
            Layer::Bars(b) => Bounds::from_points(
                b.edges
                    .windows(2)
                    .zip(&b.heights)
                    .flat_map(|(w, &h)| [(w[0], 0.0), (w[1], h)]),
            ),
            Layer::Cells(c) => Bounds::from_points(
                c.cells
                    .iter()
                    .flat_map(|cell| [(cell.x.0, cell.y.0), (cell.x.1, cell.y.1)]),
            ),
        }
    }
}
