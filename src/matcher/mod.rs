pub mod pairwise;
pub mod parallel;

// Re-export the main types
pub use self::pairwise::{PairMatcher, find_pairs};
pub use crate::config::subsystems::MatchStrategy;
pub use crate::types::Match;
