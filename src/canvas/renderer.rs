//! Static Figure Renderer
//! Writes a figure to disk through plotters.
//!
//! Layout:
//! 1. The figure is split evenly into the subplot grid (row-major).
//! 2. Each set-up subplot gets a cartesian chart with title, axis
//!    descriptions, mesh and legend.
//! 3. Subplots holding a color-mapped layer reserve a strip on the right for
//!    the color bar.

use super::layer::{BarLayer, CellLayer, ColorBar, LineLayer, Marker, MarkerLayer};
use super::{CanvasError, Figure, Layer, Subplot};
use crate::config::Style;
use log::debug;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::ErrorBar;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Width in pixels of error-bar caps.
const CAP_WIDTH: u32 = 4;
/// Number of color steps drawn in a color bar.
const COLORBAR_STEPS: usize = 64;
/// Length of the sample line drawn in legend entries.
const LEGEND_SAMPLE: i32 = 20;

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Output encodings, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG, BMP or JPEG through the bitmap backend.
    Bitmap,
    Svg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, CanvasError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") | Some("bmp") | Some("jpg") | Some("jpeg") => Ok(OutputFormat::Bitmap),
            Some("svg") => Ok(OutputFormat::Svg),
            _ => Err(CanvasError::UnsupportedFormat(PathBuf::from(path))),
        }
    }
}

fn render_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> CanvasError {
    CanvasError::Render(err.to_string())
}

pub struct StaticFigureRenderer;

impl StaticFigureRenderer {
    /// Render `figure` into `path`; the encoding follows the extension.
    pub fn save(figure: &Figure, path: &Path) -> Result<(), CanvasError> {
        let size = figure.pixel_size()?;
        match OutputFormat::from_path(path)? {
            OutputFormat::Bitmap => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                Self::render(&root, figure)?;
                root.present().map_err(render_err)
            }
            OutputFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                Self::render(&root, figure)?;
                root.present().map_err(render_err)
            }
        }
    }

    /// Draw every set-up subplot of `figure` onto `root`.
    pub fn render<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        figure: &Figure,
    ) -> Result<(), CanvasError> {
        let style = figure.style();
        root.fill(&style.background_color()).map_err(render_err)?;

        let areas = root.split_evenly(figure.shape());
        for (index, (subplot, area)) in figure.subplots().iter().zip(&areas).enumerate() {
            if !subplot.is_set_up() {
                continue;
            }
            Self::draw_subplot(area, subplot, style)?;
            debug!("Subplot {} rendered", index);
        }
        Ok(())
    }

    fn draw_subplot<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        subplot: &Subplot,
        style: &Style,
    ) -> Result<(), CanvasError> {
        let (plot_area, bar_area) = match subplot.colorbar() {
            Some(_) => {
                let (w, _) = area.dim_in_pixel();
                let split = w.saturating_sub(style.colorbar_width) as i32;
                let (left, right) = area.split_horizontally(split);
                (left, Some(right))
            }
            None => (area.clone(), None),
        };

        let font = style.font_family.as_str();
        let labels = subplot.labels();
        let view = subplot.view();

        let mut builder = ChartBuilder::on(&plot_area);
        builder
            .margin(style.margin)
            .x_label_area_size(style.label_area)
            .y_label_area_size(style.label_area + 10);
        if !labels.title.is_empty() {
            builder.caption(&labels.title, (font, style.title_size).into_font());
        }
        let mut chart = builder
            .build_cartesian_2d(view.x.0..view.x.1, view.y.0..view.y.1)
            .map_err(render_err)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(labels.xlabel.as_str())
            .y_desc(labels.ylabel.as_str())
            .label_style((font, style.tick_size).into_font())
            .axis_desc_style((font, style.label_size).into_font());
        if !subplot.grid() {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(render_err)?;

        for layer in subplot.layers() {
            match layer {
                Layer::Line(line) => Self::draw_line(&mut chart, line)?,
                Layer::Markers(markers) => Self::draw_markers(&mut chart, markers)?,
                Layer::Bars(bars) => Self::draw_bars(&mut chart, bars)?,
                Layer::Cells(cells) => Self::draw_cells(&mut chart, cells)?,
            }
        }

        if subplot.legend() && subplot.has_labeled_layers() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .label_font((font, style.legend_size).into_font())
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(render_err)?;
        }

        if let (Some(bar_area), Some(colorbar)) = (bar_area, subplot.colorbar()) {
            Self::draw_colorbar(&bar_area, colorbar, style)?;
        }
        Ok(())
    }

    fn draw_line<DB: DrawingBackend>(chart: &mut Chart<'_, DB>, line: &LineLayer) -> Result<(), CanvasError> {
        let color = line.color;
        let width = stroke(line.width);
        let anno = chart
            .draw_series(LineSeries::new(
                line.points.iter().copied(),
                color.stroke_width(width),
            ))
            .map_err(render_err)?;
        if let Some(label) = &line.label {
            anno.label(label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + LEGEND_SAMPLE, y)], color.stroke_width(width))
            });
        }
        Ok(())
    }

    fn draw_markers<DB: DrawingBackend>(
        chart: &mut Chart<'_, DB>,
        markers: &MarkerLayer,
    ) -> Result<(), CanvasError> {
        let color = markers.color;
        let size = markers.size;

        if let Some(y_err) = &markers.y_err {
            chart
                .draw_series(markers.points.iter().zip(y_err).map(|(&(x, y), &e)| {
                    ErrorBar::new_vertical(x, y - e, y, y + e, color.stroke_width(1), CAP_WIDTH)
                }))
                .map_err(render_err)?;
        }
        if let Some(x_err) = &markers.x_err {
            chart
                .draw_series(markers.points.iter().zip(x_err).map(|(&(x, y), &e)| {
                    ErrorBar::new_horizontal(y, x - e, x, x + e, color.stroke_width(1), CAP_WIDTH)
                }))
                .map_err(render_err)?;
        }

        let points = markers.points.iter().copied();
        let anno = match markers.marker {
            Marker::Circle => chart
                .draw_series(points.map(|p| Circle::new(p, size, color.filled())))
                .map_err(render_err)?,
            Marker::Square => chart
                .draw_series(points.map(|p| {
                    EmptyElement::at(p) + Rectangle::new([(-size, -size), (size, size)], color.filled())
                }))
                .map_err(render_err)?,
            Marker::Triangle => chart
                .draw_series(points.map(|p| TriangleMarker::new(p, size, color.filled())))
                .map_err(render_err)?,
            Marker::Cross => chart
                .draw_series(points.map(|p| Cross::new(p, size, color.stroke_width(2))))
                .map_err(render_err)?,
        };
        if let Some(label) = &markers.label {
            anno.label(label.as_str())
                .legend(move |(x, y)| Circle::new((x + LEGEND_SAMPLE / 2, y), size, color.filled()));
        }
        Ok(())
    }

    fn draw_bars<DB: DrawingBackend>(chart: &mut Chart<'_, DB>, bars: &BarLayer) -> Result<(), CanvasError> {
        let fill = bars.color.mix(bars.alpha);
        let anno = chart
            .draw_series(
                bars.edges
                    .windows(2)
                    .zip(&bars.heights)
                    .map(|(w, &h)| Rectangle::new([(w[0], 0.0), (w[1], h)], fill.filled())),
            )
            .map_err(render_err)?;
        if let Some(label) = &bars.label {
            anno.label(label.as_str()).legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + LEGEND_SAMPLE, y + 5)], fill.filled())
            });
        }
        Ok(())
    }

    fn draw_cells<DB: DrawingBackend>(chart: &mut Chart<'_, DB>, cells: &CellLayer) -> Result<(), CanvasError> {
        let alpha = cells.alpha;
        chart
            .draw_series(cells.cells.iter().map(|cell| {
                Rectangle::new(
                    [(cell.x.0, cell.y.0), (cell.x.1, cell.y.1)],
                    cell.color.mix(alpha).filled(),
                )
            }))
            .map_err(render_err)?;
        Ok(())
    }

    fn draw_colorbar<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        colorbar: &ColorBar,
        style: &Style,
    ) -> Result<(), CanvasError> {
        let font = style.font_family.as_str();
        let (lo, hi) = colorbar.shading.range;
        let hi = if hi > lo { hi } else { lo + 1.0 };

        let mut chart = ChartBuilder::on(area)
            .margin(style.margin)
            .margin_left(4)
            .x_label_area_size(style.label_area)
            .y_label_area_size(style.label_area)
            .build_cartesian_2d(0.0..1.0, lo..hi)
            .map_err(render_err)?;

        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .disable_x_axis()
            .label_style((font, style.tick_size).into_font())
            .axis_desc_style((font, style.label_size).into_font());
        if let Some(label) = &colorbar.label {
            mesh.y_desc(label.as_str());
        }
        mesh.draw().map_err(render_err)?;

        let step = (hi - lo) / COLORBAR_STEPS as f64;
        chart
            .draw_series((0..COLORBAR_STEPS).map(|k| {
                let y0 = lo + k as f64 * step;
                let color = colorbar
                    .shading
                    .color(y0 + 0.5 * step)
                    .unwrap_or(WHITE);
                Rectangle::new([(0.0, y0), (1.0, y0 + step)], color.filled())
            }))
            .map_err(render_err)?;
        Ok(())
    }
}

fn stroke(width: f64) -> u32 {
    width.round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.PNG")).unwrap(), OutputFormat::Bitmap);
        assert_eq!(OutputFormat::from_path(Path::new("plot.svg")).unwrap(), OutputFormat::Svg);
        assert!(matches!(
            OutputFormat::from_path(Path::new("plot.pdf")),
            Err(CanvasError::UnsupportedFormat(_))
        ));
        assert!(OutputFormat::from_path(Path::new("plot")).is_err());
    }

    #[test]
    fn stroke_width_is_at_least_one() {
        assert_eq!(stroke(0.2), 1);
        assert_eq!(stroke(1.5), 2);
    }
}
