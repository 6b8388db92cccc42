// src/config/subsystems/processor.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use std::time::Duration;
use log::LevelFilter;
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    // Parallel matching settings (0 = rayon default)
    pub thread_count: usize,

    // Abort the whole run after this many seconds (0 = no deadline)
    pub deadline_secs: u64,

    // Progress bar on stderr while matching
    pub show_progress: bool,

    // Logging
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            thread_count: 0,
            deadline_secs: 0,
            show_progress: false,
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

impl FromIni for ProcessorConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        match key {
            "thread_count" => {
                match value.parse::<usize>() {
                    Ok(count) => {
                        self.thread_count = count;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid thread_count: {}", value)
                    ))),
                }
            },
            "deadline_secs" => {
                match value.parse::<u64>() {
                    Ok(secs) => {
                        self.deadline_secs = secs;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid deadline_secs: {}", value)
                    ))),
                }
            },
            "show_progress" => {
                match value.parse::<bool>() {
                    Ok(val) => {
                        self.show_progress = val;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid show_progress (must be true or false): {}", value)
                    ))),
                }
            },
            "log_level" => {
                self.log_level = value.trim_matches('"').to_string();
                Some(Ok(()))
            },
            "log_file" => {
                let path = value.trim_matches('"');
                self.log_file = if path.is_empty() { None } else { Some(PathBuf::from(path)) };
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl ProcessorConfig {
    pub fn deadline(&self) -> Option<Duration> {
        if self.deadline_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.deadline_secs))
        }
    }

    pub fn get_thread_count(&self) -> usize {
        if self.thread_count == 0 {
            num_cpus::get()
        } else {
            self.thread_count
        }
    }

    pub fn get_log_level(&self) -> LevelFilter {
        match self.log_level.trim().to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "none" => LevelFilter::Off,
            _ => LevelFilter::Warn,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.log_level.trim().to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" | "none" => Ok(()),
            other => Err(Error::Config(
                format!("Invalid log_level (error|warn|info|debug|trace|none): {}", other)
            )),
        }
    }
}
