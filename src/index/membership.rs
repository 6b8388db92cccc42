use bit_vec::BitVec;

use crate::types::GroupId;

/// The set of groups an item appears in, one bit per group id.
///
/// Bits past `len()` are always zero, so sets of different lengths can be
/// intersected block by block without padding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipSet {
    bits: BitVec,
}

impl MembershipSet {
    pub fn new() -> Self {
        Self { bits: BitVec::new() }
    }

    /// Marks `group`; returns false if it was already present.
    pub fn insert(&mut self, group: GroupId) -> bool {
        if group >= self.bits.len() {
            self.bits.grow(group + 1 - self.bits.len(), false);
        }
        if self.bits[group] {
            return false;
        }
        self.bits.set(group, true);
        true
    }

    pub fn contains(&self, group: GroupId) -> bool {
        self.bits.get(group).unwrap_or(false)
    }

    /// Number of groups in the set (population count).
    pub fn cardinality(&self) -> usize {
        self.bits.blocks().map(|block| block.count_ones() as usize).sum()
    }

    /// `|self ∩ other|` via word-wise AND and popcount, without allocating.
    pub fn intersection_cardinality(&self, other: &MembershipSet) -> usize {
        self.bits
            .blocks()
            .zip(other.bits.blocks())
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    pub fn groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(group, present)| if present { Some(group) } else { None })
    }

    pub fn is_empty(&self) -> bool {
        self.bits.none()
    }
}

impl FromIterator<GroupId> for MembershipSet {
    fn from_iter<I: IntoIterator<Item = GroupId>>(iter: I) -> Self {
        let mut set = MembershipSet::new();
        for group in iter {
            set.insert(group);
        }
        set
    }
}
