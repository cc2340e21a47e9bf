//! Plotter - Quick figures from numeric data
//!
//! A [`Canvas`] holds a grid of subplots. Each subplot is set up once, then
//! preset drawables ([`Plot`], [`ScatterPlot`], [`Hist`], [`Hist2D`],
//! [`Image`]) are drawn onto it; [`Canvas::end`] saves the figure and/or
//! shows it in a window.
//!
//! ```no_run
//! use plotter::{Canvas, Draw, Plot};
//!
//! let mut canvas = Canvas::new("", (1, 1), "img/parabola.png")?;
//! canvas.setup(0)?;
//! Plot::new(&[0.0, 1.0, 2.0], |x| x * x, (0.1, 0.1))?.draw(&mut canvas, 0)?;
//! canvas.end(false)?;
//! # Ok::<(), plotter::CanvasError>(())
//! ```

pub mod canvas;
pub mod charts;
pub mod config;
pub mod data;
pub mod text;

pub use canvas::{Canvas, CanvasError, Figure, Presenter, Subplot, WindowPresenter};
pub use charts::palette::{Colormap, Scale};
pub use charts::{Draw, Drawable, Hist, Hist2D, HistOptions, Image, Origin, Plot, ScatterPlot};
pub use config::{ConfigError, Style, Workspace};
pub use data::{Bins, Bins2D, DataError};
pub use text::{Labels, TextConfig, TextError};
