use serde::{Serialize, Deserialize};
use std::fmt;

/// Ordinal position of a group in the input (first line = 0).
pub type GroupId = usize;

/// An unordered pair of items that share at least `threshold` groups.
///
/// `first` is the item that was enumerated first; the pair is never
/// reported the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub first: String,
    pub second: String,
    pub shared_groups: usize,
}

impl Match {
    pub fn new<A: Into<String>, B: Into<String>>(first: A, second: B, shared_groups: usize) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            shared_groups,
        }
    }

    /// True if this match names `a` and `b`, in either order.
    pub fn is_pair(&self, a: &str, b: &str) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}

// Output line format: `itemA,itemB`
impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.first, self.second)
    }
}
