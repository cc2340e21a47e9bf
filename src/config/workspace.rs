//! Workspace Module
//! Creates the directory layout used by canvases (images, logs, text
//! configs, style sheet) and hands out canvases bound to it.

use super::{ConfigError, Style};
use crate::canvas::{Canvas, CanvasError};
use crate::charts::palette;
use log::{info, LevelFilter};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const STYLE_FILE: &str = "utils/style.json";
const TEXT_EXAMPLE_FILE: &str = "text/text_example.json";
const COLORS_FILE: &str = "utils/info/colors.txt";
const LOG_FILE: &str = "log/plotter.log";

const TEXT_EXAMPLE: &str = r#"[
    {
        "title": "Example",
        "xlabel": "x",
        "ylabel": "y",
        "datasets": ["data"],
        "functions": ["fit"],
        "histograms": ["samples"],
        "images": ["intensity"]
    }
]
"#;

/// Handle on an initialized workspace directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    style: Style,
}

impl Workspace {
    /// Sub-directories created under the root.
    pub const DIRS: [&'static str; 5] = ["img", "log", "text", "utils", "utils/info"];

    /// Create the layout under `root` and seed the style sheet, the example
    /// text config and the color list. Existing files are left untouched.
    pub fn init<P: AsRef<Path>>(root: P) -> Result<Self, ConfigError> {
        let root = root.as_ref().to_path_buf();

        for dir in Self::DIRS {
            let path = root.join(dir);
            fs::create_dir_all(&path).map_err(|source| ConfigError::Io { path, source })?;
        }

        seed(&root.join(STYLE_FILE), &Style::default().to_json()?)?;
        seed(&root.join(TEXT_EXAMPLE_FILE), TEXT_EXAMPLE)?;
        let colors: Vec<&str> = palette::color_names().collect();
        seed(&root.join(COLORS_FILE), &(colors.join("\n") + "\n"))?;

        let style = Style::from_file(root.join(STYLE_FILE))?;
        info!("Workspace ready at '{}'", root.display());

        Ok(Self { root, style })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn img_dir(&self) -> PathBuf {
        self.root.join("img")
    }

    pub fn text_dir(&self) -> PathBuf {
        self.root.join("text")
    }

    pub fn log_file(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Canvas whose text config is read from `text/` and whose output is
    /// written to `img/`. Empty names keep their usual meaning (no text
    /// config, display only).
    pub fn canvas(
        &self,
        text_file: &str,
        shape: (usize, usize),
        save_file: &str,
    ) -> Result<Canvas, CanvasError> {
        let text = resolve(&self.text_dir(), text_file);
        let save = resolve(&self.img_dir(), save_file);
        Ok(Canvas::new(&text, shape, &save)?.with_style(self.style.clone()))
    }

    /// Install an `env_logger` writing to `log/plotter.log`. The filter is
    /// read from `PLOTTER_LOG` and defaults to `info`.
    pub fn setup_logging(&self) -> Result<(), ConfigError> {
        let path = self.log_file();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| ConfigError::Io { path, source })?;

        env_logger::Builder::new()
            .filter_level(LevelFilter::Info)
            .parse_env(env_logger::Env::default().filter_or("PLOTTER_LOG", "info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init()?;
        Ok(())
    }
}

fn resolve(dir: &Path, name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        dir.join(name).to_string_lossy().into_owned()
    }
}

fn seed(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, contents).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::init(dir.path()).unwrap();
        for sub in Workspace::DIRS {
            assert!(dir.path().join(sub).is_dir(), "missing {}", sub);
        }
        assert!(dir.path().join(STYLE_FILE).exists());
        assert!(dir.path().join(TEXT_EXAMPLE_FILE).exists());
        assert_eq!(ws.style(), &Style::default());
    }

    #[test]
    fn init_keeps_existing_style() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("utils")).unwrap();
        fs::write(dir.path().join(STYLE_FILE), r#"{"margin": 3}"#).unwrap();
        let ws = Workspace::init(dir.path()).unwrap();
        assert_eq!(ws.style().margin, 3);
    }

    #[test]
    fn canvas_resolves_paths_inside_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::init(dir.path()).unwrap();
        let canvas = ws.canvas("text_example.json", (1, 1), "out.png").unwrap();
        assert_eq!(canvas.save_path(), Some(ws.img_dir().join("out.png").as_path()));
        assert_eq!(canvas.text().labels(0).title, "Example");
    }
}
