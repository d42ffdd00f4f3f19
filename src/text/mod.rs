use crate::{Config, WordSequence};
use aho_corasick::AhoCorasick;
use anyhow::{Context, Result};
use log::debug;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// How raw transcript text is turned into words.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Lowercase and remove `punctuation` before splitting.
    pub strip_punctuation: bool,
    /// Remove `fillers` tokens after splitting.
    pub drop_fillers: bool,
    pub punctuation: Vec<String>,
    pub fillers: Vec<String>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for TextOptions {
    fn from(config: &Config) -> Self {
        Self {
            strip_punctuation: config.strip_punctuation,
            drop_fillers: config.drop_fillers,
            punctuation: config.punctuation.clone(),
            fillers: config.fillers.clone(),
        }
    }
}

pub struct TextLoader {
    strip_punctuation: bool,
    punctuation: Option<AhoCorasick>,
    fillers: Option<HashSet<String>>,
}

impl TextLoader {
    pub fn new(options: &TextOptions) -> Result<Self> {
        let punctuation = if options.strip_punctuation {
            let patterns: Vec<&str> = options
                .punctuation
                .iter()
                .map(String::as_str)
                .filter(|p| !p.is_empty())
                .collect();
            if patterns.is_empty() {
                None
            } else {
                Some(AhoCorasick::new(patterns).context("Failed to build punctuation matcher")?)
            }
        } else {
            None
        };

        let fillers = if options.drop_fillers {
            Some(
                options
                    .fillers
                    .iter()
                    .map(|f| {
                        if options.strip_punctuation {
                            f.to_lowercase()
                        } else {
                            f.clone()
                        }
                    })
                    .collect(),
            )
        } else {
            None
        };

        Ok(Self {
            strip_punctuation: options.strip_punctuation,
            punctuation,
            fillers,
        })
    }

    /// Normalize raw text and split it into words.
    pub fn normalize(&self, raw: &str) -> WordSequence {
        let text = raw
            .strip_suffix('\n')
            .map(|t| t.strip_suffix('\r').unwrap_or(t))
            .unwrap_or(raw);

        let text = if self.strip_punctuation {
            let lowered = text.to_lowercase();
            match &self.punctuation {
                Some(matcher) => {
                    let blanks = vec![""; matcher.patterns_len()];
                    matcher.replace_all(&lowered, &blanks)
                }
                None => lowered,
            }
        } else {
            text.to_string()
        };

        text.split_whitespace()
            .filter(|word| match &self.fillers {
                Some(fillers) => !fillers.contains(*word),
                None => true,
            })
            .map(str::to_string)
            .collect()
    }

    /// Read `path` and normalize its contents.
    pub fn load(&self, path: &Path) -> Result<WordSequence> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let words = self.normalize(&content);
        debug!("{}: {} words", path.display(), words.len());
        Ok(words)
    }
}
