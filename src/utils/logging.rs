use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use chrono::Local;
use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::error::Result;

/// Installs the global logger. Records go to `log_file` when given,
/// otherwise to stderr; stdout is reserved for matches.
pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            builder.target(Target::Pipe(Box::new(file)));
        },
        None => {
            builder.target(Target::Stderr);
        },
    }

    // A logger may already be installed (tests, embedding callers)
    let _ = builder.try_init();
    Ok(())
}
