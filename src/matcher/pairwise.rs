// src/matcher/pairwise.rs
use std::sync::Arc;
use std::time::Instant;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, trace, warn};
use rayon::ThreadPool;

use crate::config::subsystems::{MatcherConfig, MatchStrategy, ProcessorConfig};
use crate::error::Result;
use crate::index::ItemIndex;
use crate::types::Match;
use crate::utils::deadline::Deadline;
use super::parallel;

/// Compares item `row` against every later item in the index.
///
/// Only positions greater than `row` are visited, so across all rows each
/// unordered pair is evaluated exactly once and no item meets itself.
pub fn match_row(index: &ItemIndex, row: usize, threshold: usize) -> Vec<Match> {
    let first = index.membership(row);
    let mut matches = Vec::new();

    for col in (row + 1)..index.len() {
        let shared = first.intersection_cardinality(index.membership(col));
        if shared >= threshold {
            trace!("{} + {} share {} groups", index.name(row), index.name(col), shared);
            matches.push(Match::new(index.name(row), index.name(col), shared));
        }
    }
    matches
}

/// Single-threaded all-pairs scan in index order.
pub fn find_pairs(index: &ItemIndex, threshold: usize) -> Vec<Match> {
    (0..index.len())
        .flat_map(|row| match_row(index, row, threshold))
        .collect()
}

pub struct PairMatcher {
    threshold: usize,
    strategy: MatchStrategy,
    thread_pool: Option<Arc<ThreadPool>>,
    show_progress: bool,
}

impl PairMatcher {
    pub fn new(matcher_config: &MatcherConfig, processor_config: &ProcessorConfig) -> Result<Self> {
        // Dedicated pool only when a thread count is pinned
        let thread_pool = if matcher_config.strategy == MatchStrategy::Parallel
            && processor_config.thread_count > 0
        {
            Some(Arc::new(parallel::create_thread_pool(processor_config.get_thread_count())?))
        } else {
            None
        };

        debug!("Pair matcher: threshold {}, strategy {}, threads {}",
               matcher_config.threshold,
               matcher_config.strategy.as_str(),
               thread_pool.as_ref().map_or(rayon::current_num_threads(), |pool| pool.current_num_threads()));

        Ok(Self {
            threshold: matcher_config.threshold,
            strategy: matcher_config.strategy,
            thread_pool,
            show_progress: processor_config.show_progress,
        })
    }

    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            threshold,
            strategy: MatchStrategy::Sequential,
            thread_pool: None,
            show_progress: false,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// All matches in the index, without a time limit.
    pub fn find_matches(&self, index: &ItemIndex) -> Vec<Match> {
        match self.find_matches_within(index, &Deadline::unbounded()) {
            Ok(matches) => matches,
            Err(e) => unreachable!("unbounded deadline expired: {}", e),
        }
    }

    /// All matches in the index, checking `deadline` once per row.
    ///
    /// Both strategies return matches in the same order: by row, then by
    /// column, following the index's item order.
    pub fn find_matches_within(&self, index: &ItemIndex, deadline: &Deadline) -> Result<Vec<Match>> {
        let start = Instant::now();
        let pairs = index.len().saturating_sub(1) * index.len() / 2;
        info!("Comparing {} items ({} pairs) using {} strategy",
              index.len(), pairs, self.strategy.as_str());

        if index.threshold() > self.threshold {
            warn!("Index was pruned at {} but pairs are accepted at {}; pairs of pruned items are missed",
                  index.threshold(), self.threshold);
        }

        let progress = self.progress_bar(index.len());
        let matches = match self.strategy {
            MatchStrategy::Sequential => {
                let mut matches = Vec::new();
                for row in 0..index.len() {
                    deadline.check("matching")?;
                    matches.extend(match_row(index, row, self.threshold));
                    progress.inc(1);
                }
                matches
            },
            MatchStrategy::Parallel => parallel::find_pairs_parallel(
                index,
                self.threshold,
                deadline,
                &progress,
                self.thread_pool.as_deref(),
            )?,
        };
        progress.finish_and_clear();

        info!("Found {} matches in {:?}", matches.len(), start.elapsed());
        Ok(matches)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.green} Items: [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})"
        ).unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuilder;
    use crate::parser::GroupReader;

    fn index_of(text: &[&str], threshold: usize) -> ItemIndex {
        let reader = GroupReader::default();
        let groups: Vec<Vec<&str>> = text.iter().map(|line| reader.split_line(line)).collect();
        IndexBuilder::build(groups, threshold)
    }

    fn shared(index: &ItemIndex, a: &str, b: &str) -> usize {
        index.get(a).unwrap().intersection_cardinality(index.get(b).unwrap())
    }

    #[test]
    fn basic_match() {
        let index = index_of(&["a,b", "a,b", "a,b"], 2);
        let matches = find_pairs(&index, 2);
        assert_eq!(matches, vec![Match::new("a", "b", 3)]);
    }

    #[test]
    fn below_threshold_yields_nothing() {
        let index = index_of(&["a,b", "a,c"], 2);
        assert!(find_pairs(&index, 2).is_empty());
    }

    #[test]
    fn pairs_use_first_seen_order() {
        let index = index_of(&["zed,amy", "zed,amy"], 2);
        let matches = find_pairs(&index, 2);
        assert_eq!(matches[0].to_string(), "zed,amy");
    }

    #[test]
    fn survivors_can_still_miss_each_other() {
        // a and b each appear twice but never together
        let index = index_of(&["a", "a", "b", "b"], 2);
        assert_eq!(index.len(), 2);
        assert!(find_pairs(&index, 2).is_empty());
    }

    #[test]
    fn completeness_and_uniqueness() {
        let text = [
            "a,b,c,d", "a,b,c", "a,b", "b,c,d", "c,d,a", "d,a,b", "a,c", "b,d", "a,b,c,d,e", "e",
        ];
        for threshold in 1..=5 {
            let index = index_of(&text, threshold);
            let matches = find_pairs(&index, threshold);
            let names: Vec<&str> = index.names().collect();

            for m in &matches {
                assert_ne!(m.first, m.second);
                assert!(shared(&index, &m.first, &m.second) >= threshold);
                assert_eq!(m.shared_groups, shared(&index, &m.first, &m.second));
            }
            for (i, a) in names.iter().enumerate() {
                for b in &names[i + 1..] {
                    let hits = matches.iter().filter(|m| m.is_pair(a, b)).count();
                    let expected = usize::from(shared(&index, a, b) >= threshold);
                    assert_eq!(hits, expected, "pair {} {} at threshold {}", a, b, threshold);
                }
            }
        }
    }

    #[test]
    fn matching_is_repeatable() {
        let index = index_of(&["x,y,z", "x,y,z", "y,z", "x,z"], 2);
        let matcher = PairMatcher::with_threshold(2);
        assert_eq!(matcher.find_matches(&index), matcher.find_matches(&index));
    }

    #[test]
    fn parallel_strategy_matches_sequential() {
        let mut text = Vec::new();
        for i in 0..60 {
            let line = (0..12)
                .filter(|k| (i + k) % 3 != 0 || k % 4 == 0)
                .map(|k| format!("artist{}", k))
                .collect::<Vec<_>>()
                .join(",");
            text.push(line);
        }
        let text: Vec<&str> = text.iter().map(String::as_str).collect();
        let index = index_of(&text, 10);

        let sequential = PairMatcher::with_threshold(10).find_matches(&index);
        let matcher_config = MatcherConfig { threshold: 10, strategy: MatchStrategy::Parallel };
        let processor_config = ProcessorConfig { thread_count: 3, ..ProcessorConfig::default() };
        let matcher = PairMatcher::new(&matcher_config, &processor_config).unwrap();
        assert_eq!(matcher.threshold(), 10);
        assert_eq!(matcher.strategy(), MatchStrategy::Parallel);
        let parallel = matcher.find_matches(&index);

        assert!(!sequential.is_empty());
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn expired_deadline_aborts_matching() {
        let index = index_of(&["a,b", "a,b"], 1);
        let deadline = Deadline::new(Instant::now(), Some(std::time::Duration::ZERO));
        std::thread::sleep(std::time::Duration::from_millis(2));
        let result = PairMatcher::with_threshold(1).find_matches_within(&index, &deadline);
        assert!(result.is_err());
    }

    #[test]
    fn empty_index_has_no_pairs() {
        let index = index_of(&[], 1);
        assert!(PairMatcher::with_threshold(1).find_matches(&index).is_empty());
    }
}
