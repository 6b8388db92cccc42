use thiserror::Error;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not read input file {}: {source}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write output file {}: {source}", .path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Deadline of {limit:?} exceeded during {phase}")]
    DeadlineExceeded {
        phase: &'static str,
        limit: Duration,
    },

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

// Type alias for Result
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error conversions
impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn input<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Error::InputUnavailable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn output<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Error::OutputWriteFailure {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::ThreadPool(format!("Thread pool build failed: {}", err))
    }
}
