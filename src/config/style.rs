//! Style Sheet Module
//! Figure-wide look: sizes, fonts, spacing and default toggles.

use super::ConfigError;
use crate::charts::palette;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Style sheet applied to every subplot of a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Pixel size `(width, height)` of a single subplot.
    pub subplot_size: (u32, u32),
    pub font_family: String,
    pub title_size: f64,
    pub label_size: f64,
    pub tick_size: f64,
    pub legend_size: f64,
    /// Space around each subplot, in pixels.
    pub margin: u32,
    /// Space reserved for tick labels and axis descriptions.
    pub label_area: u32,
    /// Width of the strip holding a color bar.
    pub colorbar_width: u32,
    /// Background color, as `#rrggbb` or a color name.
    pub background: String,
    pub grid: bool,
    pub legend: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            subplot_size: (640, 480),
            font_family: "sans-serif".to_string(),
            title_size: 22.0,
            label_size: 16.0,
            tick_size: 12.0,
            legend_size: 13.0,
            margin: 12,
            label_area: 45,
            colorbar_width: 90,
            background: "#ffffff".to_string(),
            grid: true,
            legend: true,
        }
    }
}

impl Style {
    /// Load a JSON style sheet; absent fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Background color; white when the configured value cannot be parsed.
    pub fn background_color(&self) -> RGBColor {
        palette::parse_color(&self.background).unwrap_or(plotters::style::WHITE)
    }

    /// Pixel size of a figure holding a `rows x cols` grid of subplots, or
    /// `None` when it does not fit in `u32`.
    pub fn figure_size(&self, (rows, cols): (usize, usize)) -> Option<(u32, u32)> {
        let (w, h) = self.subplot_size;
        let width = w.checked_mul(u32::try_from(cols).ok()?)?;
        let height = h.checked_mul(u32::try_from(rows).ok()?)?;
        Some((width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_sheet_keeps_defaults() {
        let style: Style = serde_json::from_str(r#"{"font_family": "serif", "grid": false}"#).unwrap();
        assert_eq!(style.font_family, "serif");
        assert!(!style.grid);
        assert_eq!(style.subplot_size, Style::default().subplot_size);
    }

    #[test]
    fn figure_size_scales_with_grid() {
        let style = Style::default();
        assert_eq!(style.figure_size((2, 3)), Some((1920, 960)));
        assert_eq!(style.figure_size((1, 7_000_000)), None);
        assert_eq!(style.figure_size((usize::MAX, 1)), None);
    }

    #[test]
    fn unknown_background_falls_back_to_white() {
        let style = Style {
            background: "not-a-color".to_string(),
            ..Style::default()
        };
        assert_eq!(style.background_color(), plotters::style::WHITE);
    }
}
