// src/config/subsystems/parser.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Character separating item names within one line.
    pub delimiter: char,
    /// Strip surrounding whitespace from every item name.
    pub trim_items: bool,
    /// Drop empty item names (after trimming, if enabled).
    pub skip_empty_items: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            trim_items: false,
            skip_empty_items: false,
        }
    }
}

/// Parses a delimiter setting; quotes are optional so `","` and `;` both work.
pub fn parse_delimiter(value: &str) -> Result<char> {
    let cleaned = if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    };
    let cleaned = match cleaned {
        "\\t" => "\t",
        other => other,
    };

    let mut chars = cleaned.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::Config(
            format!("Invalid delimiter (must be exactly one character): {}", value)
        )),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value.parse::<bool>().map_err(|_| Error::Config(
        format!("Invalid {} (must be true or false): {}", key, value)
    ))
}

impl FromIni for ParserConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        match key {
            "delimiter" => Some(parse_delimiter(value).map(|c| self.delimiter = c)),
            "trim_items" => Some(parse_bool(key, value).map(|b| self.trim_items = b)),
            "skip_empty_items" => Some(parse_bool(key, value).map(|b| self.skip_empty_items = b)),
            _ => None,
        }
    }
}

impl ParserConfig {
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(Error::config("delimiter cannot be a line terminator"));
        }
        Ok(())
    }
}
