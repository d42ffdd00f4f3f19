use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub strip_punctuation: bool,
    pub drop_fillers: bool,
    pub punctuation: Vec<String>,
    pub fillers: Vec<String>,
    pub output_dir: PathBuf,
    /// Fail the run when WER (percent) is above this.
    pub max_wer: Option<f64>,
}

fn default_punctuation() -> Vec<String> {
    [",", ".", "?", "!", "*"].iter().map(|p| p.to_string()).collect()
}

fn default_fillers() -> Vec<String> {
    vec!["uh".to_string(), "um".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strip_punctuation: false,
            drop_fillers: false,
            punctuation: default_punctuation(),
            fillers: default_fillers(),
            output_dir: PathBuf::from("."),
            max_wer: None,
        }
    }
}

/// One configuration source (a config file or the command line).
///
/// Only the keys a layer actually sets override the layers below it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub strip_punctuation: Option<bool>,
    pub drop_fillers: Option<bool>,
    pub punctuation: Option<Vec<String>>,
    pub fillers: Option<Vec<String>>,
    pub output_dir: Option<PathBuf>,
    pub max_wer: Option<f64>,
}

impl ConfigLayer {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(cli: ConfigLayer) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.merge(ConfigLayer::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(".werdiff.toml");
        if local_path.exists() {
            config = config.merge(ConfigLayer::from_file(&local_path)?);
        }

        Ok(config.merge(cli))
    }

    pub fn merge(mut self, layer: ConfigLayer) -> Self {
        if let Some(strip) = layer.strip_punctuation {
            self.strip_punctuation = strip;
        }
        if let Some(drop) = layer.drop_fillers {
            self.drop_fillers = drop;
        }
        if let Some(punctuation) = layer.punctuation {
            self.punctuation = punctuation;
        }
        if let Some(fillers) = layer.fillers {
            self.fillers = fillers;
        }
        if let Some(dir) = layer.output_dir {
            self.output_dir = dir;
        }
        if layer.max_wer.is_some() {
            self.max_wer = layer.max_wer;
        }
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "werdiff").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
