//! Figure Viewer
//! Interactive display of a figure: one egui_plot panel per subplot,
//! arranged in the figure's grid inside a scrollable eframe window.

use super::layer::{BarLayer, CellLayer, LineLayer, Marker, MarkerLayer};
use super::{CanvasError, Figure, Layer, Subplot};
use egui::{Color32, RichText, ScrollArea};
use egui_plot::{Bar, BarChart, Legend, Line, MarkerShape, Plot, PlotPoints, Points, Polygon};
use plotters::style::RGBColor;

/// Spacing between subplot cards
const CARD_SPACING: f32 = 15.0;

/// Shows a finished figure to the user.
pub trait Presenter {
    fn present(&self, figure: &Figure) -> Result<(), CanvasError>;
}

/// Opens a native window and blocks until it is closed.
pub struct WindowPresenter {
    pub title: String,
}

impl Default for WindowPresenter {
    fn default() -> Self {
        Self {
            title: "Plotter".to_string(),
        }
    }
}

impl Presenter for WindowPresenter {
    fn present(&self, figure: &Figure) -> Result<(), CanvasError> {
        let (w, h) = figure.pixel_size()?;
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([w as f32 + 40.0, h as f32 + 60.0])
                .with_title(&self.title),
            ..Default::default()
        };

        let viewer = FigureViewer::new(figure.clone());
        eframe::run_native(
            &self.title,
            options,
            Box::new(move |_cc| Ok(Box::new(viewer))),
        )
        .map_err(|err| CanvasError::Display(err.to_string()))
    }
}

/// eframe application drawing a figure.
pub struct FigureViewer {
    figure: Figure,
}

impl FigureViewer {
    pub fn new(figure: Figure) -> Self {
        Self { figure }
    }

    fn draw_subplot(ui: &mut egui::Ui, index: usize, subplot: &Subplot, size: (f32, f32)) {
        let labels = subplot.labels();
        let view = subplot.view();

        ui.vertical(|ui| {
            if !labels.title.is_empty() {
                ui.label(RichText::new(&labels.title).size(16.0).strong());
            }

            let mut plot = Plot::new(format!("subplot_{}", index))
                .width(size.0)
                .height(size.1)
                .x_axis_label(labels.xlabel.clone())
                .y_axis_label(labels.ylabel.clone())
                .show_grid(subplot.grid())
                .include_x(view.x.0)
                .include_x(view.x.1)
                .include_y(view.y.0)
                .include_y(view.y.1);
            if subplot.legend() && subplot.has_labeled_layers() {
                plot = plot.legend(Legend::default());
            }

            plot.show(ui, |plot_ui| {
                for layer in subplot.layers() {
                    match layer {
                        Layer::Line(line) => plot_ui.line(Self::line(line)),
                        Layer::Markers(markers) => {
                            for bar in Self::error_bars(markers) {
                                plot_ui.line(bar);
                            }
                            plot_ui.points(Self::points(markers));
                        }
                        Layer::Bars(bars) => plot_ui.bar_chart(Self::bars(bars)),
                        Layer::Cells(cells) => {
                            for polygon in Self::cells(cells) {
                                plot_ui.polygon(polygon);
                            }
                        }
                    }
                }
            });
        });
    }

    fn line(line: &LineLayer) -> Line {
        let points: PlotPoints = line.points.iter().map(|&(x, y)| [x, y]).collect();
        let mut item = Line::new(points)
            .color(color32(line.color, 1.0))
            .width(line.width as f32);
        if let Some(label) = &line.label {
            item = item.name(label);
        }
        item
    }

    fn points(markers: &MarkerLayer) -> Points {
        let points: PlotPoints = markers.points.iter().map(|&(x, y)| [x, y]).collect();
        let shape = match markers.marker {
            Marker::Circle => MarkerShape::Circle,
            Marker::Square => MarkerShape::Square,
            Marker::Triangle => MarkerShape::Up,
            Marker::Cross => MarkerShape::Cross,
        };
        let mut item = Points::new(points)
            .shape(shape)
            .filled(true)
            .radius(markers.size as f32)
            .color(color32(markers.color, 1.0));
        if let Some(label) = &markers.label {
            item = item.name(label);
        }
        item
    }

    fn error_bars(markers: &MarkerLayer) -> Vec<Line> {
        let color = color32(markers.color, 1.0);
        let mut lines = Vec::new();
        for (i, &(x, y)) in markers.points.iter().enumerate() {
            if let Some(&e) = markers.y_err.as_ref().and_then(|errs| errs.get(i)) {
                lines.push(Line::new(vec![[x, y - e], [x, y + e]]).color(color).width(1.0));
            }
            if let Some(&e) = markers.x_err.as_ref().and_then(|errs| errs.get(i)) {
                lines.push(Line::new(vec![[x - e, y], [x + e, y]]).color(color).width(1.0));
            }
        }
        lines
    }

    fn bars(bars: &BarLayer) -> BarChart {
        let items: Vec<Bar> = bars
            .edges
            .windows(2)
            .zip(&bars.heights)
            .map(|(w, &h)| Bar::new(0.5 * (w[0] + w[1]), h).width(w[1] - w[0]))
            .collect();
        let mut chart = BarChart::new(items).color(color32(bars.color, bars.alpha));
        if let Some(label) = &bars.label {
            chart = chart.name(label);
        }
        chart
    }

    fn cells(cells: &CellLayer) -> Vec<Polygon> {
        cells
            .cells
            .iter()
            .map(|cell| {
                let fill = color32(cell.color, cells.alpha);
                Polygon::new(vec![
                    [cell.x.0, cell.y.0],
                    [cell.x.1, cell.y.0],
                    [cell.x.1, cell.y.1],
                    [cell.x.0, cell.y.1],
                ])
                .fill_color(fill)
                .stroke(egui::Stroke::new(0.0, fill))
            })
            .collect()
    }
}

impl eframe::App for FigureViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (rows, cols) = self.figure.shape();
        let (w, h) = self.figure.style().subplot_size;
        let size = (w as f32 - CARD_SPACING, h as f32 - 3.0 * CARD_SPACING);

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
                egui::Grid::new("subplot_grid")
                    .spacing([CARD_SPACING, CARD_SPACING])
                    .show(ui, |ui| {
                        for row in 0..rows {
                            for col in 0..cols {
                                let index = row * cols + col;
                                match self.figure.subplots().get(index) {
                                    Some(subplot) if subplot.is_set_up() => {
                                        Self::draw_subplot(ui, index, subplot, size)
                                    }
                                    _ => {
                                        ui.label("");
                                    }
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
        });
    }
}

fn color32(color: RGBColor, alpha: f64) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.0, color.1, color.2, a)
}
