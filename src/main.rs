//! Plotter - Showcase figure
//!
//! Initializes a workspace in the current directory and renders one example
//! of every preset drawable.

use anyhow::{Context, Result};
use log::{info, LevelFilter};
use plotter::charts::palette;
use plotter::data::linspace;
use plotter::{Bins, Bins2D, Canvas, Draw, Drawable, Hist, Hist2D, HistOptions, Plot, ScatterPlot, Workspace};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};
use std::path::PathBuf;

const DEFAULT_OUTPUT: &str = "img/showcase.png";

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("PLOTTER_LOG", "warn,plotter=info"))
        .init();

    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let workspace = Workspace::init(".").context("Failed to initialize workspace")?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }

    let text = workspace.text_dir().join("text_example.json");
    let mut canvas = Canvas::new(&text.to_string_lossy(), (2, 2), &output.to_string_lossy())?
        .with_style(workspace.style().clone());
    for index in 0..4 {
        canvas.setup(index)?;
    }

    for (index, drawables) in showcase()?.iter().enumerate() {
        for drawable in drawables {
            drawable.draw(&mut canvas, index)?;
        }
    }

    canvas.end(false).context("Failed to render showcase")?;
    info!("Showcase written to '{}'", output.display());
    Ok(())
}

/// Drawables for each of the four subplots.
fn showcase() -> Result<Vec<Vec<Drawable>>> {
    let x = linspace(0.0, 4.0, 9, true);

    let parabola = Plot::new(&x, |v| v * v - 4.0 * v + 3.0, (0.1, 0.1))?.label("x² - 4x + 3");

    let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0 + (3.0 * v).sin() * 0.5).collect();
    let y_err = vec![0.4; x.len()];
    let cycle = palette::colors(2, None);
    let scatter = ScatterPlot::new(x.clone(), y, Some(y_err), None).color(cycle[0]);
    let line = Plot::new(&x, |v| 2.0 * v + 1.0, (0.05, 0.05))?.color(cycle[1]);

    let normal = Normal::new(0.0, 1.0).context("Invalid normal distribution")?;
    let samples = normal_quantiles(&normal, 2000);
    let hist = Hist::with_options(
        &samples,
        HistOptions {
            bins: Bins::Auto,
            density: true,
            ..HistOptions::default()
        },
    )?
    .alpha(0.7);
    let fit = Plot::with_density(hist.bins(), |v| normal.pdf(v), (0.0, 0.0), 4)?
        .color(palette::FIREBRICK);

    let n = samples.len();
    let shifted: Vec<f64> = (0..n)
        .map(|i| 0.6 * samples[i] + 0.8 * samples[(i * 7919) % n])
        .collect();
    let hist_2d = Hist2D::new(&samples, &shifted, Bins2D::Count(25))?.colorbar_label("counts");

    Ok(vec![
        vec![parabola.into()],
        vec![scatter.into(), line.into()],
        vec![hist.into(), fit.into()],
        vec![hist_2d.into()],
    ])
}

/// Evenly spaced quantiles of `dist`, a noise-free stand-in for a sample.
fn normal_quantiles(dist: &Normal, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| dist.inverse_cdf((i as f64 + 0.5) / n as f64))
        .collect()
}
