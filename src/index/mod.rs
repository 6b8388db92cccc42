//! Inverted index from item name to the groups containing it.

pub mod membership;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use ahash::AHashMap;
use log::{debug, info, trace};

use crate::error::{Error, Result};
use crate::parser::GroupReader;
use crate::types::GroupId;

pub use self::membership::MembershipSet;

/// Pruned, read-only index. Every item has at least `threshold` groups and
/// items keep the order in which they were first seen in the input.
#[derive(Debug, Clone, Default)]
pub struct ItemIndex {
    names: Vec<String>,
    sets: Vec<MembershipSet>,
    positions: AHashMap<String, usize>,
    group_count: usize,
    threshold: usize,
}

impl ItemIndex {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of groups read while building, including pruned-away ones.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn name(&self, position: usize) -> &str {
        &self.names[position]
    }

    pub fn membership(&self, position: usize) -> &MembershipSet {
        &self.sets[position]
    }

    pub fn get(&self, name: &str) -> Option<&MembershipSet> {
        self.positions.get(name).map(|&position| &self.sets[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MembershipSet)> + '_ {
        self.names.iter().map(String::as_str).zip(self.sets.iter())
    }
}

/// Accumulates group membership, then prunes items below the threshold.
#[derive(Debug)]
pub struct IndexBuilder {
    threshold: usize,
    names: Vec<String>,
    sets: Vec<MembershipSet>,
    positions: AHashMap<String, usize>,
    group_count: usize,
}

impl IndexBuilder {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            names: Vec::new(),
            sets: Vec::new(),
            positions: AHashMap::new(),
            group_count: 0,
        }
    }

    /// Adds the next group; its id is the number of groups added before it.
    pub fn add_group<I, S>(&mut self, items: I) -> GroupId
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let group = self.group_count;
        for item in items {
            let item = item.as_ref();
            let position = match self.positions.get(item) {
                Some(&position) => position,
                None => {
                    let position = self.names.len();
                    self.positions.insert(item.to_string(), position);
                    self.names.push(item.to_string());
                    self.sets.push(MembershipSet::new());
                    position
                }
            };
            self.sets[position].insert(group);
        }
        self.group_count += 1;
        group
    }

    /// Removes items seen in fewer than `threshold` groups and freezes the index.
    pub fn finish(self) -> ItemIndex {
        let total = self.names.len();
        let threshold = self.threshold;

        let mut names = Vec::new();
        let mut sets = Vec::new();
        for (name, set) in self.names.into_iter().zip(self.sets) {
            if set.cardinality() >= threshold {
                names.push(name);
                sets.push(set);
            } else {
                trace!("Pruning item {:?} ({} groups)", name, set.cardinality());
            }
        }

        let mut positions = AHashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            positions.insert(name.clone(), position);
        }

        info!("Index: {} groups, {} items, {} kept at threshold {}",
              self.group_count, total, names.len(), threshold);

        ItemIndex {
            names,
            sets,
            positions,
            group_count: self.group_count,
            threshold,
        }
    }

    /// Builds a pruned index from in-memory groups.
    pub fn build<G, I, S>(groups: G, threshold: usize) -> ItemIndex
    where
        G: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::new(threshold);
        for group in groups {
            builder.add_group(group);
        }
        builder.finish()
    }

    /// Builds a pruned index from line-oriented text. A read failure at any
    /// point discards everything read so far.
    pub fn build_from_reader<R: BufRead>(
        reader: R,
        parser: &GroupReader,
        threshold: usize,
    ) -> std::io::Result<ItemIndex> {
        let mut builder = Self::new(threshold);
        parser.read_groups(reader, |_, items| {
            builder.add_group(items);
        })?;
        Ok(builder.finish())
    }

    pub fn build_from_path<P: AsRef<Path>>(
        path: P,
        parser: &GroupReader,
        threshold: usize,
    ) -> Result<ItemIndex> {
        let path = path.as_ref();
        let start = Instant::now();
        debug!("Reading groups from {:?} (delimiter {:?})", path, parser.delimiter());

        let file = File::open(path).map_err(|e| Error::input(path, e))?;
        let index = Self::build_from_reader(BufReader::new(file), parser, threshold)
            .map_err(|e| Error::input(path, e))?;

        debug!("Index built in {:?}", start.elapsed());
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    fn lines(input: &[&str]) -> Vec<Vec<String>> {
        let reader = GroupReader::default();
        input
            .iter()
            .map(|line| reader.split_line(line).into_iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn basic_membership() {
        let index = IndexBuilder::build(lines(&["a,b", "a,b", "a,b"]), 2);
        assert_eq!(index.len(), 2);
        assert_eq!(index.group_count(), 3);
        assert_eq!(index.threshold(), 2);
        let a = index.get("a").unwrap();
        assert_eq!(a.groups().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn items_below_threshold_are_absent() {
        let index = IndexBuilder::build(lines(&["a,b", "a,c"]), 2);
        assert!(index.contains("a"));
        assert!(!index.contains("b"));
        assert!(!index.contains("c"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn duplicate_in_group_counts_once() {
        let index = IndexBuilder::build(lines(&["a,a,b"]), 1);
        assert_eq!(index.get("a").unwrap().cardinality(), 1);

        let index = IndexBuilder::build(lines(&["a,a,a"]), 2);
        assert!(index.is_empty());
    }

    #[test]
    fn every_kept_item_meets_threshold() {
        let groups = lines(&["a,b,c", "a,b", "a", "c,d", "a,d", "b"]);
        for threshold in 1..=5 {
            let index = IndexBuilder::build(groups.clone(), threshold);
            for (_, set) in index.iter() {
                assert!(set.cardinality() >= threshold);
            }
        }
    }

    #[test]
    fn empty_input_gives_empty_index() {
        let index = IndexBuilder::build(Vec::<Vec<String>>::new(), 1);
        assert!(index.is_empty());
        assert_eq!(index.group_count(), 0);
    }

    #[test]
    fn empty_group_still_takes_an_id() {
        let index = IndexBuilder::build(lines(&["a", "", "a"]), 1);
        assert_eq!(index.group_count(), 3);
        assert_eq!(index.get("a").unwrap().groups().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn order_is_first_seen() {
        let index = IndexBuilder::build(lines(&["z,y", "x,z", "y,x"]), 1);
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["z", "y", "x"]);
    }

    #[test]
    fn blank_names_are_items() {
        let index = IndexBuilder::build(lines(&["a, ", "a, "]), 2);
        assert!(index.contains(" "));
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::Other, "disk went away"));
            }
            self.served = true;
            let data = b"a,b\na,b\n";
            buf[..data.len()].copy_from_slice(data);
            Ok(data.len())
        }
    }

    #[test]
    fn mid_stream_failure_is_fatal() {
        let reader = io::BufReader::new(FailingReader { served: false });
        let result = IndexBuilder::build_from_reader(reader, &GroupReader::default(), 1);
        assert!(result.is_err());
    }

    #[test]
    fn reader_and_memory_builds_agree() {
        let text = "a,b,c\nb,c\nc,a\n";
        let from_reader =
            IndexBuilder::build_from_reader(Cursor::new(text), &GroupReader::default(), 2).unwrap();
        let from_memory = IndexBuilder::build(lines(&["a,b,c", "b,c", "c,a"]), 2);
        assert_eq!(from_reader.names().collect::<Vec<_>>(), from_memory.names().collect::<Vec<_>>());
        for (name, set) in from_memory.iter() {
            assert_eq!(from_reader.get(name), Some(set));
        }
    }

    #[test]
    fn missing_file_is_input_unavailable() {
        let result = IndexBuilder::build_from_path(
            "/definitely/not/here.txt",
            &GroupReader::default(),
            1,
        );
        assert!(matches!(result, Err(Error::InputUnavailable { .. })));
    }
}
