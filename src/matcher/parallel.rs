// src/matcher/parallel.rs
use indicatif::ProgressBar;
use log::debug;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::error::{Error, Result};
use crate::index::ItemIndex;
use crate::types::Match;
use crate::utils::deadline::Deadline;
use super::pairwise::match_row;

/// Builds the worker pool used when a thread count is configured.
pub fn create_thread_pool(thread_count: usize) -> Result<ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .thread_name(|i| format!("pair-worker-{}", i))
        .build()
        .map_err(Error::from)
}

/// Runs one row per rayon task against the shared, read-only index.
///
/// Each row fills its own buffer; buffers are concatenated in row order once
/// every task has finished, so the result equals the sequential scan.
pub fn find_pairs_parallel(
    index: &ItemIndex,
    threshold: usize,
    deadline: &Deadline,
    progress: &ProgressBar,
    pool: Option<&ThreadPool>,
) -> Result<Vec<Match>> {
    let scan = || -> Result<Vec<Vec<Match>>> {
        (0..index.len())
            .into_par_iter()
            .map(|row| -> Result<Vec<Match>> {
                deadline.check("matching")?;
                let matches = match_row(index, row, threshold);
                progress.inc(1);
                Ok(matches)
            })
            .collect()
    };

    let rows = match pool {
        Some(pool) => pool.install(scan)?,
        None => scan()?,
    };

    debug!("Merging {} row buffers", rows.len());
    Ok(rows.into_iter().flatten().collect())
}
