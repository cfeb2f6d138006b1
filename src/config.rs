//! Configuration loading for courselens.
//!
//! Settings live in an optional `courselens.toml` next to the data; every
//! field has a default so the tool runs with no config file at all. CLI
//! flags override file values.

use crate::core::errors::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "courselens.toml";

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub report: ReportConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Field delimiter, a single character.
    pub delimiter: String,
    /// Comment prefix; lines starting with it are ignored.
    pub comment: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: ";".to_string(),
            comment: Some("#".to_string()),
        }
    }
}

impl InputConfig {
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.bytes().next().unwrap_or(b';')
    }

    pub fn comment_byte(&self) -> Option<u8> {
        self.comment.as_ref().and_then(|c| c.bytes().next())
    }

    fn validate(&self) -> Result<()> {
        if self.delimiter.len() != 1 {
            return Err(Error::Configuration(format!(
                "delimiter must be a single character, got '{}'",
                self.delimiter
            )));
        }
        if let Some(comment) = &self.comment {
            if comment.len() != 1 {
                return Err(Error::Configuration(format!(
                    "comment prefix must be a single character, got '{comment}'"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// How many courses the gain ranking keeps.
    pub top_gain: usize,
    /// Price points compared in the per-category/per-level share breakdowns.
    pub price_points: Vec<f64>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_gain: 5,
            price_points: vec![0.0, 200.0],
        }
    }
}

impl Config {
    /// Load configuration: an explicit path must exist; otherwise
    /// `courselens.toml` in the working directory is used when present,
    /// and defaults apply when it is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    Error::Configuration(format!("cannot read '{}': {e}", path.display()))
                })?;
                toml::from_str(&text)?
            }
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.exists() {
                    debug!("Using {CONFIG_FILE_NAME} from working directory");
                    let text = std::fs::read_to_string(default_path)?;
                    toml::from_str(&text)?
                } else {
                    Config::default()
                }
            }
        };
        config.input.validate()?;
        Ok(config)
    }

    /// The default configuration rendered as TOML, used by `init`.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Config::default()).expect("default config serializes")
    }
}
