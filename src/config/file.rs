// src/config/file.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use crate::error::{Error, Result};
use super::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Destination of the match list; overwritten on every run.
    pub output_path: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("output.txt"),
        }
    }
}

impl FromIni for FileConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        match key {
            "output_path" => {
                self.output_path = PathBuf::from(value.trim_matches('"'));
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        if self.output_path.as_os_str().is_empty() {
            return Err(Error::config("output_path must not be empty"));
        }
        Ok(())
    }
}
