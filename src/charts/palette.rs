//! Palette Module
//! Named colors, color lists for multi-series plots, colormaps and value
//! scales used by 2D histograms and images.

use crate::data::DataError;
use plotters::style::RGBColor;

pub const BLACK: RGBColor = RGBColor(0, 0, 0);
pub const FIREBRICK: RGBColor = RGBColor(178, 34, 34);
pub const CORNFLOWER_BLUE: RGBColor = RGBColor(100, 149, 237);

/// Tableau palette, the default color cycle.
pub const TABLEAU: [RGBColor; 10] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
    RGBColor(188, 189, 34),  // Olive
    RGBColor(23, 190, 207),  // Cyan
];

const NAMED: [(&str, RGBColor); 22] = [
    ("black", BLACK),
    ("white", RGBColor(255, 255, 255)),
    ("red", RGBColor(255, 0, 0)),
    ("green", RGBColor(0, 128, 0)),
    ("blue", RGBColor(0, 0, 255)),
    ("gray", RGBColor(128, 128, 128)),
    ("orange", RGBColor(255, 165, 0)),
    ("purple", RGBColor(128, 0, 128)),
    ("firebrick", FIREBRICK),
    ("cornflowerblue", CORNFLOWER_BLUE),
    ("navy", RGBColor(0, 0, 128)),
    ("teal", RGBColor(0, 128, 128)),
    ("tab:blue", TABLEAU[0]),
    ("tab:orange", TABLEAU[1]),
    ("tab:green", TABLEAU[2]),
    ("tab:red", TABLEAU[3]),
    ("tab:purple", TABLEAU[4]),
    ("tab:brown", TABLEAU[5]),
    ("tab:pink", TABLEAU[6]),
    ("tab:gray", TABLEAU[7]),
    ("tab:olive", TABLEAU[8]),
    ("tab:cyan", TABLEAU[9]),
];

/// Names accepted by [`parse_color`].
pub fn color_names() -> impl Iterator<Item = &'static str> {
    NAMED.iter().map(|(name, _)| *name)
}

/// Parse `#rrggbb` or a color name (case-insensitive).
pub fn parse_color(text: &str) -> Option<RGBColor> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(RGBColor(channel(0)?, channel(2)?, channel(4)?));
    }
    let lower = text.to_ascii_lowercase();
    NAMED
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, color)| *color)
}

/// `length` colors: a linear gradient between two colors, or the Tableau
/// cycle when no gradient is given.
pub fn colors(length: usize, gradient: Option<(RGBColor, RGBColor)>) -> Vec<RGBColor> {
    match gradient {
        Some((from, to)) => (0..length)
            .map(|i| {
                let t = if length > 1 {
                    i as f64 / (length - 1) as f64
                } else {
                    0.0
                };
                lerp(from, to, t)
            })
            .collect(),
        None => (0..length).map(|i| TABLEAU[i % TABLEAU.len()]).collect(),
    }
}

fn lerp(from: RGBColor, to: RGBColor, t: f64) -> RGBColor {
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Continuous colormaps, sampled at evenly spaced stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    #[default]
    Plasma,
    Viridis,
    Greys,
    Coolwarm,
}

impl Colormap {
    fn stops(&self) -> &'static [RGBColor] {
        const PLASMA: [RGBColor; 5] = [
            RGBColor(13, 8, 135),
            RGBColor(126, 3, 168),
            RGBColor(204, 71, 120),
            RGBColor(248, 149, 64),
            RGBColor(240, 249, 33),
        ];
        const VIRIDIS: [RGBColor; 5] = [
            RGBColor(68, 1, 84),
            RGBColor(59, 82, 139),
            RGBColor(33, 145, 140),
            RGBColor(94, 201, 98),
            RGBColor(253, 231, 37),
        ];
        const GREYS: [RGBColor; 2] = [RGBColor(255, 255, 255), RGBColor(0, 0, 0)];
        const COOLWARM: [RGBColor; 3] = [
            RGBColor(59, 76, 192),
            RGBColor(221, 221, 221),
            RGBColor(180, 4, 38),
        ];
        match self {
            Colormap::Plasma => &PLASMA,
            Colormap::Viridis => &VIRIDIS,
            Colormap::Greys => &GREYS,
            Colormap::Coolwarm => &COOLWARM,
        }
    }

    /// Color at `t` in `[0, 1]` (clamped).
    pub fn color(&self, t: f64) -> RGBColor {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (stops.len() - 1) as f64;
        let i = (pos.floor() as usize).min(stops.len() - 2);
        lerp(stops[i], stops[i + 1], pos - i as f64)
    }
}

/// Mapping from values to the `[0, 1]` colormap axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Scale {
    #[default]
    Linear,
    /// Base-10 logarithm; non-positive values are not drawn.
    Log,
    /// Symmetric logarithm, linear within `(-linthresh, linthresh)`.
    SymLog(f64),
}

impl Scale {
    /// Reject a symlog threshold that is not a positive finite number.
    pub fn validate(&self) -> Result<(), DataError> {
        match *self {
            Scale::SymLog(linthresh) if !(linthresh.is_finite() && linthresh > 0.0) => {
                Err(DataError::InvalidLinthresh(linthresh))
            }
            _ => Ok(()),
        }
    }

    fn transform(&self, v: f64) -> Option<f64> {
        match *self {
            Scale::Linear => Some(v),
            Scale::Log => (v > 0.0).then(|| v.log10()),
            Scale::SymLog(linthresh) => (linthresh.is_finite() && linthresh > 0.0)
                .then(|| v.signum() * (1.0 + v.abs() / linthresh).log10()),
        }
    }

    /// Position of `v` between `lo` and `hi`, or `None` when `v` cannot be
    /// shown on this scale.
    pub fn normalize(&self, v: f64, lo: f64, hi: f64) -> Option<f64> {
        if !v.is_finite() {
            return None;
        }
        let (v, lo, hi) = (self.transform(v)?, self.transform(lo)?, self.transform(hi)?);
        if hi == lo {
            Some(0.5)
        } else {
            Some(((v - lo) / (hi - lo)).clamp(0.0, 1.0))
        }
    }

    /// Default value range for `values` on this scale.
    pub fn value_range<I: IntoIterator<Item = f64>>(&self, values: I) -> Option<(f64, f64)> {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite() && (*self != Scale::Log || *v > 0.0))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        (lo <= hi).then_some((lo, hi))
    }
}

/// Colormapped shading of a set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shading {
    pub colormap: Colormap,
    pub scale: Scale,
    pub range: (f64, f64),
}

impl Shading {
    pub fn color(&self, v: f64) -> Option<RGBColor> {
        self.scale
            .normalize(v, self.range.0, self.range.1)
            .map(|t| self.colormap.color(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(parse_color("#ff8000"), Some(RGBColor(255, 128, 0)));
        assert_eq!(parse_color("FireBrick"), Some(FIREBRICK));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("no-such-color"), None);
    }

    #[test]
    fn gradient_hits_both_ends() {
        let list = colors(3, Some((BLACK, RGBColor(255, 255, 255))));
        assert_eq!(list[0], BLACK);
        assert_eq!(list[1], RGBColor(128, 128, 128));
        assert_eq!(list[2], RGBColor(255, 255, 255));
        assert_eq!(colors(12, None)[10], TABLEAU[0]);
    }

    #[test]
    fn colormap_ends_are_first_and_last_stops() {
        assert_eq!(Colormap::Greys.color(0.0), RGBColor(255, 255, 255));
        assert_eq!(Colormap::Greys.color(1.0), BLACK);
        assert_eq!(Colormap::Greys.color(7.0), BLACK);
    }

    #[test]
    fn log_scale_skips_non_positive() {
        assert_eq!(Scale::Log.normalize(0.0, 1.0, 100.0), None);
        assert_eq!(Scale::Log.normalize(10.0, 1.0, 100.0), Some(0.5));
        assert_eq!(Scale::Log.value_range([0.0, 2.0, 8.0]), Some((2.0, 8.0)));
    }

    #[test]
    fn symlog_threshold_must_be_positive() {
        assert!(Scale::SymLog(0.5).validate().is_ok());
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(Scale::SymLog(bad).validate().is_err());
            assert_eq!(Scale::SymLog(bad).normalize(1.0, -10.0, 10.0), None);
        }
    }

    #[test]
    fn symlog_is_odd() {
        let s = Scale::SymLog(1.0);
        let mid = s.normalize(0.0, -10.0, 10.0).unwrap();
        assert!((mid - 0.5).abs() < 1e-12);
    }
}
