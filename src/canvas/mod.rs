//! Canvas module - Grid of subplots, per-subplot setup and output
//!
//! A [`Canvas`] owns a [`Figure`]. Drawables append [`Layer`]s to one of its
//! subplots; [`Canvas::end`] renders the figure to the save path and/or hands
//! it to a [`Presenter`].

pub mod layer;
mod renderer;
mod subplot;
mod viewer;

pub use layer::{Bounds, Cell, ColorBar, Layer, Marker};
pub use renderer::{OutputFormat, StaticFigureRenderer};
pub use subplot::{Figure, Subplot};
pub use viewer::{Presenter, WindowPresenter};

use crate::charts::Draw;
use crate::config::Style;
use crate::data::DataError;
use crate::text::{Labels, SeriesKind, TextConfig, TextError};
use log::{debug, info};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("Invalid grid shape ({rows}, {cols}): both must be at least 1")]
    InvalidShape { rows: usize, cols: usize },
    #[error("A ({rows}, {cols}) grid does not fit in a figure")]
    FigureTooLarge { rows: usize, cols: usize },
    #[error("Subplot index {index} out of range for a grid of {count} subplots")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("Subplot {0} was drawn on before setup()")]
    NotSetUp(usize),
    #[error("Invalid limits [{0}, {1}]")]
    InvalidLimits(f64, f64),
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("Text config error: {0}")]
    Text(#[from] TextError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Unsupported output format for '{0}'")]
    UnsupportedFormat(PathBuf),
    #[error("Rendering failed: {0}")]
    Render(String),
    #[error("Display failed: {0}")]
    Display(String),
}

/// A figure with a grid of subplots and an output target.
pub struct Canvas {
    figure: Figure,
    text: TextConfig,
    save_path: Option<PathBuf>,
    presenter: Box<dyn Presenter>,
}

impl Canvas {
    /// Create a `rows x cols` canvas.
    ///
    /// An empty `text_config_path` means no text config; an empty
    /// `save_path` means the figure is only displayed.
    pub fn new(
        text_config_path: &str,
        (rows, cols): (usize, usize),
        save_path: &str,
    ) -> Result<Self, CanvasError> {
        if rows == 0 || cols == 0 {
            return Err(CanvasError::InvalidShape { rows, cols });
        }
        if Style::default().figure_size((rows, cols)).is_none() {
            return Err(CanvasError::FigureTooLarge { rows, cols });
        }

        let text = if text_config_path.is_empty() {
            TextConfig::default()
        } else {
            TextConfig::load(text_config_path)?
        };
        let save_path = (!save_path.is_empty()).then(|| PathBuf::from(save_path));

        info!("Created {}x{} canvas", rows, cols);

        Ok(Self {
            figure: Figure::new((rows, cols), Style::default()),
            text,
            save_path,
            presenter: Box::new(WindowPresenter::default()),
        })
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.figure.set_style(style);
        self
    }

    /// Replace the text config with an explicit one.
    pub fn with_text(mut self, text: TextConfig) -> Self {
        self.text = text;
        self
    }

    pub fn with_presenter<P: Presenter + 'static>(mut self, presenter: P) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn text(&self) -> &TextConfig {
        &self.text
    }

    pub fn save_path(&self) -> Option<&Path> {
        self.save_path.as_deref()
    }

    pub fn subplot(&self, index: usize) -> Option<&Subplot> {
        self.figure.subplots().get(index)
    }

    /// Initialize subplot `index` with the style defaults and its labels
    /// from the text config. Already drawn layers are kept.
    pub fn setup(&mut self, index: usize) -> Result<(), CanvasError> {
        let entry = self.text.entry(index);
        let style = self.figure.style().clone();
        self.subplot_in_range(index)?.setup(entry, &style);
        debug!("Subplot {} set up", index);
        Ok(())
    }

    pub fn set_labels(&mut self, index: usize, labels: Labels) -> Result<(), CanvasError> {
        self.subplot_ready(index)?.set_labels(labels);
        Ok(())
    }

    /// Fix the visible x and/or y range of subplot `index`; `None` keeps the
    /// automatic range.
    pub fn set_limits(
        &mut self,
        index: usize,
        x: Option<(f64, f64)>,
        y: Option<(f64, f64)>,
    ) -> Result<(), CanvasError> {
        for (lo, hi) in x.into_iter().chain(y) {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(CanvasError::InvalidLimits(lo, hi));
            }
        }
        self.subplot_ready(index)?.set_limits(x, y);
        Ok(())
    }

    pub fn set_legend(&mut self, index: usize, legend: bool) -> Result<(), CanvasError> {
        self.subplot_ready(index)?.set_legend(legend);
        Ok(())
    }

    pub fn set_grid(&mut self, index: usize, grid: bool) -> Result<(), CanvasError> {
        self.subplot_ready(index)?.set_grid(grid);
        Ok(())
    }

    /// Draw `item` onto subplot `index`.
    pub fn draw<D: Draw + ?Sized>(&mut self, item: &D, index: usize) -> Result<(), CanvasError> {
        item.draw(self, index)
    }

    /// Append a layer to a set-up subplot.
    pub(crate) fn add_layer(&mut self, index: usize, layer: Layer) -> Result<(), CanvasError> {
        self.subplot_ready(index)?.push(layer);
        debug!("Layer added to subplot {}", index);
        Ok(())
    }

    /// `explicit` if given, otherwise the next label of `kind` from the text
    /// config of subplot `index`.
    pub(crate) fn series_label(
        &mut self,
        index: usize,
        kind: SeriesKind,
        explicit: Option<&str>,
    ) -> Result<Option<String>, CanvasError> {
        let subplot = self.subplot_ready(index)?;
        let from_text = subplot.next_series_label(kind);
        Ok(explicit.map(str::to_string).or(from_text))
    }

    /// Render the figure: save it if a save path was given, then show it if
    /// `show` is set. Consumes the canvas.
    pub fn end(self, show: bool) -> Result<(), CanvasError> {
        if let Some(path) = &self.save_path {
            StaticFigureRenderer::save(&self.figure, path)?;
            info!("Figure saved to '{}'", path.display());
        }
        if show {
            self.presenter.present(&self.figure)?;
        }
        info!("Canvas closed");
        Ok(())
    }

    fn subplot_in_range(&mut self, index: usize) -> Result<&mut Subplot, CanvasError> {
        let count = self.figure.subplots().len();
        self.figure
            .subplot_mut(index)
            .ok_or(CanvasError::IndexOutOfRange { index, count })
    }

    fn subplot_ready(&mut self, index: usize) -> Result<&mut Subplot, CanvasError> {
        let subplot = self.subplot_in_range(index)?;
        if subplot.is_set_up() {
            Ok(subplot)
        } else {
            Err(CanvasError::NotSetUp(index))
        }
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("shape", &self.figure.shape())
            .field("save_path", &self.save_path)
            .finish()
    }
}
