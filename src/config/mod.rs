pub mod file;
pub mod subsystems;

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use crate::error::{Error, Result};
use log::{debug, warn, trace};

pub trait FromIni {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CooccurConfig {
    // File paths
    pub files: file::FileConfig,

    // Subsystem configs
    pub parser: subsystems::ParserConfig,
    pub matcher: subsystems::MatcherConfig,
    pub processor: subsystems::ProcessorConfig,
}

impl CooccurConfig {
    pub fn validate(&self) -> Result<()> {
        self.files.validate()?;
        self.parser.validate()?;
        self.matcher.validate()?;
        self.processor.validate()?;
        Ok(())
    }

    pub fn from_ini<P: AsRef<Path>>(path: P) -> Result<Self> {
        trace!("Loading configuration from: {:?}", path.as_ref());

        let content = fs::read_to_string(&path).map_err(|e| Error::config(
            format!("Cannot read config file {}: {}", path.as_ref().display(), e)
        ))?;
        let config = Self::from_ini_str(&content)?;
        debug!("Loaded configuration from {:?}: {:?}", path.as_ref(), config);
        Ok(config)
    }

    pub fn from_ini_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut current_section = String::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].trim().to_string();
                trace!("  Line {}: Found section: [{}]", line_num + 1, current_section);
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Delegate to appropriate subsystem config
                let handled = match current_section.as_str() {
                    "file" => config.files.from_ini_section(&current_section, key, value),
                    "parser" => config.parser.from_ini_section(&current_section, key, value),
                    "matcher" => config.matcher.from_ini_section(&current_section, key, value),
                    "processor" => config.processor.from_ini_section(&current_section, key, value),
                    _ => None,
                };

                match handled {
                    Some(result) => result?,
                    None => warn!("Unrecognized config key: {}={} in section [{}]", key, value, current_section),
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}
