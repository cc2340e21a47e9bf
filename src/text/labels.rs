//! Text Config Module
//! Titles, axis labels and legend entries for each subplot.
//!
//! Two JSON layouts are accepted:
//! - a list, where the position is the subplot index;
//! - an object keyed by subplot index (`"0"`, `"1"`, ...), with an optional
//!   `"default"` entry used by subplots that have none of their own.

use super::TextError;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const DEFAULT_KEY: &str = "default";

/// Title and axis labels of one subplot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
}

impl Labels {
    pub fn new(title: impl Into<String>, xlabel: impl Into<String>, ylabel: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            xlabel: xlabel.into(),
            ylabel: ylabel.into(),
        }
    }
}

/// Which legend list a drawable takes its label from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Dataset,
    Function,
    Histogram,
    Image,
}

/// Everything the text config holds for one subplot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubplotText {
    pub title: String,
    #[serde(alias = "abscissa")]
    pub xlabel: String,
    #[serde(alias = "ordinate")]
    pub ylabel: String,
    pub datasets: Vec<String>,
    pub functions: Vec<String>,
    pub histograms: Vec<String>,
    pub images: Vec<String>,
}

impl SubplotText {
    pub fn labels(&self) -> Labels {
        Labels::new(&self.title, &self.xlabel, &self.ylabel)
    }

    pub fn series(&self, kind: SeriesKind) -> &[String] {
        match kind {
            SeriesKind::Dataset => &self.datasets,
            SeriesKind::Function => &self.functions,
            SeriesKind::Histogram => &self.histograms,
            SeriesKind::Image => &self.images,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    List(Vec<SubplotText>),
    Map(BTreeMap<String, SubplotText>),
}

/// Text for every subplot of a canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextConfig {
    entries: BTreeMap<usize, SubplotText>,
    fallback: Option<SubplotText>,
}

impl TextConfig {
    /// Read a text config file. A missing file is logged and yields an
    /// empty config; unreadable or malformed files are errors.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => {
                debug!("Opened '{}'", path.display());
                Self::from_json(&json)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                error!("Impossible to open '{}'", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(TextError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, TextError> {
        let mut config = Self::default();
        match serde_json::from_str(json)? {
            RawText::List(list) => {
                config.entries = list.into_iter().enumerate().collect();
            }
            RawText::Map(map) => {
                for (key, entry) in map {
                    if key == DEFAULT_KEY {
                        config.fallback = Some(entry);
                        continue;
                    }
                    let index = key
                        .parse::<usize>()
                        .map_err(|_| TextError::InvalidKey(key.clone()))?;
                    config.entries.insert(index, entry);
                }
            }
        }
        debug!("Text config entries: {:?}", config.entries);
        Ok(config)
    }

    /// Replace the text of subplot `index`.
    pub fn with_entry(mut self, index: usize, entry: SubplotText) -> Self {
        self.entries.insert(index, entry);
        self
    }

    /// Replace only the title and axis labels of subplot `index`.
    pub fn with_labels(mut self, index: usize, labels: Labels) -> Self {
        let entry = self.entries.entry(index).or_default();
        entry.title = labels.title;
        entry.xlabel = labels.xlabel;
        entry.ylabel = labels.ylabel;
        self
    }

    /// Text of subplot `index`, falling back to the `"default"` entry and
    /// then to empty strings.
    pub fn entry(&self, index: usize) -> SubplotText {
        self.entries
            .get(&index)
            .or(self.fallback.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    pub fn labels(&self, index: usize) -> Labels {
        self.entry(index).labels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_layout_uses_positions() {
        let config = TextConfig::from_json(
            r#"[{"title": "a", "abscissa": "t", "ordinate": "v", "functions": ["f"]},
                {"title": "b"}]"#,
        )
        .unwrap();
        assert_eq!(config.labels(0), Labels::new("a", "t", "v"));
        assert_eq!(config.entry(0).series(SeriesKind::Function), ["f".to_string()]);
        assert_eq!(config.labels(1), Labels::new("b", "", ""));
        assert_eq!(config.labels(5), Labels::default());
    }

    #[test]
    fn map_layout_with_default_entry() {
        let config = TextConfig::from_json(
            r#"{"1": {"title": "second"}, "default": {"title": "any", "xlabel": "x"}}"#,
        )
        .unwrap();
        assert_eq!(config.labels(1).title, "second");
        assert_eq!(config.labels(0), Labels::new("any", "x", ""));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            TextConfig::from_json(r#"{"left": {"title": "x"}}"#),
            Err(TextError::InvalidKey(_))
        ));
    }

    #[test]
    fn missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = TextConfig::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, TextConfig::default());
    }

    #[test]
    fn explicit_labels_override_entry() {
        let config = TextConfig::default().with_labels(2, Labels::new("T", "X", "Y"));
        assert_eq!(config.labels(2), Labels::new("T", "X", "Y"));
    }
}
