//! Dual-sink match output: a file and the console, both rendered from one
//! buffer.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::types::Match;

/// Renders matches as newline-terminated `itemA,itemB` lines.
pub fn render_matches(matches: &[Match]) -> String {
    let mut buffer = String::new();
    for m in matches {
        buffer.push_str(&m.first);
        buffer.push(',');
        buffer.push_str(&m.second);
        buffer.push('\n');
    }
    buffer
}

/// The closing line printed after all matches.
pub fn summary_line(match_count: usize, elapsed: Duration) -> String {
    format!("{} matches found in {} milliseconds", match_count, elapsed.as_millis())
}

pub struct MatchSink {
    output_path: PathBuf,
}

impl MatchSink {
    pub fn new<P: AsRef<Path>>(output_path: P) -> Self {
        Self {
            output_path: output_path.as_ref().to_path_buf(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes the file first, then the console. If the file cannot be
    /// persisted nothing is printed, so the two sinks never disagree.
    pub fn emit<W: Write>(&self, matches: &[Match], console: &mut W) -> Result<()> {
        let rendered = render_matches(matches);
        self.write_file(rendered.as_bytes())?;
        console.write_all(rendered.as_bytes())?;
        console.flush()?;
        Ok(())
    }

    /// Replaces the output file via a uniquely named scratch file in the
    /// same directory, so no other file is ever touched.
    pub fn write_file(&self, contents: &[u8]) -> Result<()> {
        let dir = match self.output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        debug!("Writing {} bytes to {:?} via a scratch file in {:?}", contents.len(), self.output_path, dir);

        // Dropping an unpersisted NamedTempFile removes it
        let persisted = (|| -> io::Result<()> {
            let mut scratch = NamedTempFile::new_in(dir)?;
            scratch.write_all(contents)?;
            scratch.flush()?;
            scratch.as_file().sync_all()?;
            scratch.persist(&self.output_path).map_err(|e| e.error)?;
            Ok(())
        })();
        persisted.map_err(|e| Error::output(&self.output_path, e))?;

        info!("Wrote matches to {:?}", self.output_path);
        Ok(())
    }
}
