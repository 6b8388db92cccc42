use std::time::{Duration, Instant};
use log::warn;

use crate::error::{Error, Result};

/// Wall-clock budget for one run, measured from `start`.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub fn new(start: Instant, limit: Option<Duration>) -> Self {
        Self { start, limit }
    }

    pub fn unbounded() -> Self {
        Self::new(Instant::now(), None)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn check(&self, phase: &'static str) -> Result<()> {
        match self.limit {
            Some(limit) if self.start.elapsed() > limit => {
                warn!("Deadline of {:?} exceeded during {}", limit, phase);
                Err(Error::DeadlineExceeded { phase, limit })
            },
            _ => Ok(()),
        }
    }
}
