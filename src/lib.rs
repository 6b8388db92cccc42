//! cooccur finds pairs of items that appear together in at least a given
//! number of groups, e.g. artists that share many playlists.
//!
//! Groups are read into an inverted index (item to bit-set of group ids),
//! items that cannot reach the threshold are pruned, and the survivors are
//! compared pairwise by intersection size.

// Module declarations
pub mod error;
pub mod types;
pub mod config;
pub mod parser;
pub mod index;
pub mod matcher;
pub mod output;
pub mod run;
pub mod utils;

// Re-exports
pub use error::{Error, Result};
pub use types::{GroupId, Match};
pub use index::{IndexBuilder, ItemIndex, MembershipSet};
pub use matcher::{PairMatcher, MatchStrategy, find_pairs};
pub use parser::GroupReader;
pub use output::MatchSink;
pub use run::{CooccurrenceRun, RunReport};

// Re-export the config from config module
pub use config::CooccurConfig;
