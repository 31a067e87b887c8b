use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::defs::HISTORY_SIZE;
use crate::error::{BingoError, Result};
use crate::logging::{log_info, log_warning};

pub const DEFAULT_CONFIG_PATH: &str = "conf/console.conf";

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub seed: Option<u64>,
    pub history_size: usize,
    pub colors: bool,
    pub show_card: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            seed: None,
            history_size: HISTORY_SIZE,
            colors: true,
            show_card: true,
        }
    }
}

impl ConsoleConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_content(&content)
    }

    pub fn from_content(content: &str) -> Result<Self> {
        let config_map = parse_config(content)?;
        let defaults = Self::default();

        let seed = config_map
            .get("seed")
            .map(|s| parse_value::<u64>("seed", s))
            .transpose()?;

        let history_size = config_map
            .get("history_size")
            .map(|h| parse_value::<usize>("history_size", h))
            .transpose()?
            .unwrap_or(defaults.history_size);

        let colors = config_map
            .get("colors")
            .map(|c| parse_bool("colors", c))
            .transpose()?
            .unwrap_or(defaults.colors);

        let show_card = config_map
            .get("show_card")
            .map(|c| parse_bool("show_card", c))
            .transpose()?
            .unwrap_or(defaults.show_card);

        Ok(ConsoleConfig { seed, history_size, colors, show_card })
    }

    /// Load `path`, falling back to defaults when the file is missing or broken.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(config) => {
                log_info(&format!("Loaded console configuration from {}", path.display()));
                config
            }
            Err(e) => {
                log_warning(&format!(
                    "Could not load console config from {}: {}. Using defaults.",
                    path.display(),
                    e
                ));
                Self::default()
            }
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| BingoError::Config(format!("invalid value '{value}' for '{key}'")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(BingoError::Config(format!("invalid value '{value}' for '{key}'"))),
    }
}

fn parse_config(content: &str) -> Result<HashMap<String, String>> {
    let mut config = HashMap::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) => {
                config.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                return Err(BingoError::Config(format!(
                    "line {}: expected 'key = value', got '{}'",
                    line_no + 1,
                    line
                )));
            }
        }
    }

    Ok(config)
}
