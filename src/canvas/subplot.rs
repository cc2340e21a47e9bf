//! Subplot and Figure
//! Backend-independent figure state: a row-major grid of subplots, each
//! holding its labels, limits and the layers drawn onto it.

use super::layer::{Bounds, ColorBar, Layer};
use super::CanvasError;
use crate::config::Style;
use crate::text::{Labels, SeriesKind, SubplotText};
use log::warn;
use std::collections::HashMap;

/// Fraction of the data span added on each side when limits are automatic.
const AUTO_MARGIN: f64 = 0.05;

/// State of one subplot.
#[derive(Debug, Clone, Default)]
pub struct Subplot {
    text: SubplotText,
    set_up: bool,
    layers: Vec<Layer>,
    x_limits: Option<(f64, f64)>,
    y_limits: Option<(f64, f64)>,
    legend: bool,
    grid: bool,
    drawn: HashMap<SeriesKind, usize>,
}

impl Subplot {
    pub(crate) fn setup(&mut self, text: SubplotText, style: &Style) {
        self.text = text;
        if !self.set_up {
            self.legend = style.legend;
            self.grid = style.grid;
        }
        self.set_up = true;
    }

    pub fn is_set_up(&self) -> bool {
        self.set_up
    }

    pub fn labels(&self) -> Labels {
        self.text.labels()
    }

    pub(crate) fn set_labels(&mut self, labels: Labels) {
        self.text.title = labels.title;
        self.text.xlabel = labels.xlabel;
        self.text.ylabel = labels.ylabel;
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub(crate) fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn legend(&self) -> bool {
        self.legend
    }

    pub(crate) fn set_legend(&mut self, legend: bool) {
        self.legend = legend;
    }

    pub fn grid(&self) -> bool {
        self.grid
    }

    pub(crate) fn set_grid(&mut self, grid: bool) {
        self.grid = grid;
    }

    pub fn limits(&self) -> (Option<(f64, f64)>, Option<(f64, f64)>) {
        (self.x_limits, self.y_limits)
    }

    pub(crate) fn set_limits(&mut self, x: Option<(f64, f64)>, y: Option<(f64, f64)>) {
        self.x_limits = x;
        self.y_limits = y;
    }

    /// Next legend label of `kind` from the text config, if any is left.
    pub(crate) fn next_series_label(&mut self, kind: SeriesKind) -> Option<String> {
        let n = self.drawn.entry(kind).or_insert(0);
        let names = self.text.series(kind);
        let label = names.get(*n).cloned();
        if label.is_none() && !names.is_empty() {
            warn!("Only {} {:?} labels given, drawing series {} without one", names.len(), kind, *n + 1);
        }
        *n += 1;
        label.filter(|l| !l.is_empty())
    }

    pub fn has_labeled_layers(&self) -> bool {
        self.layers.iter().any(|l| l.label().is_some())
    }

    /// First color bar requested by a layer.
    pub fn colorbar(&self) -> Option<&ColorBar> {
        self.layers.iter().find_map(Layer::colorbar)
    }

    /// Visible area: explicit limits where set, otherwise the data extent
    /// padded by a small margin.
    pub fn view(&self) -> Bounds {
        let data = self
            .layers
            .iter()
            .filter_map(Layer::bounds)
            .reduce(Bounds::union);
        let (x, y) = match data {
            Some(b) => (pad(b.x), pad(b.y)),
            None => ((0.0, 1.0), (0.0, 1.0)),
        };
        Bounds {
            x: self.x_limits.unwrap_or(x),
            y: self.y_limits.unwrap_or(y),
        }
    }
}

fn pad((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi > lo {
        let m = (hi - lo) * AUTO_MARGIN;
        (lo - m, hi + m)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

/// The figure owned by a canvas.
#[derive(Debug, Clone)]
pub struct Figure {
    shape: (usize, usize),
    style: Style,
    subplots: Vec<Subplot>,
}

impl Figure {
    pub(crate) fn new(shape: (usize, usize), style: Style) -> Self {
        Self {
            shape,
            style,
            subplots: vec![Subplot::default(); shape.0 * shape.1],
        }
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub(crate) fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Subplots in row-major order.
    pub fn subplots(&self) -> &[Subplot] {
        &self.subplots
    }

    pub(crate) fn subplot_mut(&mut self, index: usize) -> Option<&mut Subplot> {
        self.subplots.get_mut(index)
    }

    pub fn pixel_size(&self) -> Result<(u32, u32), CanvasError> {
        let (rows, cols) = self.shape;
        self.style
            .figure_size(self.shape)
            .ok_or(CanvasError::FigureTooLarge { rows, cols })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::layer::LineLayer;
    use plotters::style::RGBColor;

    #[test]
    fn empty_subplot_has_unit_view() {
        let view = Subplot::default().view();
        assert_eq!(view.x, (0.0, 1.0));
        assert_eq!(view.y, (0.0, 1.0));
    }

    #[test]
    fn view_pads_data_and_respects_limits() {
        let mut subplot = Subplot::default();
        subplot.push(Layer::Line(LineLayer {
            points: vec![(0.0, 0.0), (10.0, 20.0)],
            color: RGBColor(0, 0, 0),
            width: 1.0,
            label: None,
        }));
        let view = subplot.view();
        assert_eq!(view.x, (-0.5, 10.5));
        assert_eq!(view.y, (-1.0, 21.0));

        subplot.set_limits(None, Some((0.0, 5.0)));
        assert_eq!(subplot.view().y, (0.0, 5.0));
    }

    #[test]
    fn series_labels_are_consumed_in_order() {
        let mut subplot = Subplot::default();
        let text = SubplotText {
            datasets: vec!["a".to_string(), "b".to_string()],
            ..SubplotText::default()
        };
        subplot.setup(text, &Style::default());
        assert_eq!(subplot.next_series_label(SeriesKind::Dataset).as_deref(), Some("a"));
        assert_eq!(subplot.next_series_label(SeriesKind::Dataset).as_deref(), Some("b"));
        assert_eq!(subplot.next_series_label(SeriesKind::Dataset), None);
        assert_eq!(subplot.next_series_label(SeriesKind::Function), None);
    }
}
