// src/run.rs
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};
use log::{debug, info};

use crate::config::CooccurConfig;
use crate::error::Result;
use crate::index::{IndexBuilder, ItemIndex};
use crate::matcher::PairMatcher;
use crate::output::{summary_line, MatchSink};
use crate::parser::GroupReader;
use crate::types::Match;
use crate::utils::Deadline;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub group_count: usize,
    pub item_count: usize,
    pub matches: Vec<Match>,
    pub elapsed: Duration,
}

/// One batch computation: read groups, build and prune the index, match,
/// then emit. Nothing outlives the run.
pub struct CooccurrenceRun {
    config: CooccurConfig,
    deadline: Deadline,
}

impl CooccurrenceRun {
    pub fn new(config: CooccurConfig) -> Result<Self> {
        Self::started_at(config, Instant::now())
    }

    /// A run whose clock (summary time and deadline) began at `start`,
    /// e.g. process start, so startup work is counted.
    pub fn started_at(config: CooccurConfig, start: Instant) -> Result<Self> {
        config.validate()?;
        let deadline = Deadline::new(start, config.processor.deadline());
        Ok(Self { config, deadline })
    }

    pub fn config(&self) -> &CooccurConfig {
        &self.config
    }

    pub fn build_index<P: AsRef<Path>>(&self, input: P) -> Result<ItemIndex> {
        let parser = GroupReader::new(self.config.parser.clone());
        let index = IndexBuilder::build_from_path(input, &parser, self.config.matcher.threshold)?;
        self.deadline.check("indexing")?;
        Ok(index)
    }

    pub fn find_matches(&self, index: &ItemIndex) -> Result<Vec<Match>> {
        let matcher = PairMatcher::new(&self.config.matcher, &self.config.processor)?;
        debug!("Matching at threshold {} with {} strategy", matcher.threshold(), matcher.strategy().as_str());
        matcher.find_matches_within(index, &self.deadline)
    }

    /// Runs every phase and writes matches plus the summary line to `console`.
    pub fn execute<P: AsRef<Path>, W: Write>(self, input: P, console: &mut W) -> Result<RunReport> {
        info!("Starting co-occurrence run on {:?}", input.as_ref());

        let index = self.build_index(&input)?;
        let matches = self.find_matches(&index)?;

        MatchSink::new(&self.config.files.output_path).emit(&matches, console)?;

        let elapsed = self.deadline.elapsed();
        writeln!(console, "{}", summary_line(matches.len(), elapsed))?;
        console.flush()?;

        info!("Run finished: {} matches in {:?}", matches.len(), elapsed);
        Ok(RunReport {
            group_count: index.group_count(),
            item_count: index.len(),
            matches,
            elapsed,
        })
    }
}
