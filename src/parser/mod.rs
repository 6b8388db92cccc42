//! Line-oriented group parsing.
//!
//! Every line of the input is one group; the line number (from 0) is the
//! group id. Item names are separated by a single delimiter character and
//! cannot contain it.

use std::io::{self, BufRead};
use log::trace;

use crate::config::subsystems::ParserConfig;
use crate::types::GroupId;

#[derive(Debug, Clone)]
pub struct GroupReader {
    settings: ParserConfig,
}

impl GroupReader {
    pub fn new(settings: ParserConfig) -> Self {
        Self { settings }
    }

    pub fn delimiter(&self) -> char {
        self.settings.delimiter
    }

    /// Splits one line into item names.
    ///
    /// An empty line has no items. Trailing empty fields are dropped, so
    /// `a,b,` yields `a` and `b`; interior empty fields are kept as the
    /// empty-string item unless `skip_empty_items` is set.
    pub fn split_line<'a>(&self, line: &'a str) -> Vec<&'a str> {
        if line.is_empty() {
            return Vec::new();
        }

        let mut items: Vec<&str> = line.split(self.settings.delimiter).collect();
        if self.settings.trim_items {
            for item in items.iter_mut() {
                *item = item.trim();
            }
        }

        // Trailing empties go after trimming, so `a,b, ` is still `{a,b}`
        while items.last().map_or(false, |item| item.is_empty()) {
            items.pop();
        }
        if self.settings.skip_empty_items {
            items.retain(|item| !item.is_empty());
        }
        items
    }

    /// Feeds every group in `reader` to `on_group`, in input order.
    ///
    /// Returns the number of groups read. Any read error, including invalid
    /// UTF-8, stops the scan and is returned to the caller.
    pub fn read_groups<R, F>(&self, mut reader: R, mut on_group: F) -> io::Result<usize>
    where
        R: BufRead,
        F: FnMut(GroupId, Vec<&str>),
    {
        let mut line = String::new();
        let mut group: GroupId = 0;

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }

            let content = strip_line_ending(&line);
            let items = self.split_line(content);
            trace!("Group {}: {} items", group, items.len());
            on_group(group, items);
            group += 1;
        }

        Ok(group)
    }
}

impl Default for GroupReader {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(reader: &GroupReader, input: &[u8]) -> io::Result<Vec<Vec<String>>> {
        let mut groups = Vec::new();
        reader.read_groups(Cursor::new(input), |_, items| {
            groups.push(items.into_iter().map(str::to_string).collect());
        })?;
        Ok(groups)
    }

    #[test]
    fn splits_on_delimiter_without_trimming() {
        let reader = GroupReader::default();
        assert_eq!(reader.split_line("a, b,c"), vec!["a", " b", "c"]);
    }

    #[test]
    fn empty_line_has_no_items() {
        let reader = GroupReader::default();
        assert!(reader.split_line("").is_empty());
    }

    #[test]
    fn trailing_empty_fields_are_dropped() {
        let reader = GroupReader::default();
        assert_eq!(reader.split_line("a,b,,"), vec!["a", "b"]);
        assert_eq!(reader.split_line("a,,b"), vec!["a", "", "b"]);
        assert!(reader.split_line(",,").is_empty());
    }

    #[test]
    fn whitespace_items_survive_by_default() {
        let reader = GroupReader::default();
        assert_eq!(reader.split_line("a,  ,b"), vec!["a", "  ", "b"]);
    }

    #[test]
    fn trim_and_skip_empty_settings() {
        let reader = GroupReader::new(ParserConfig {
            delimiter: ';',
            trim_items: true,
            skip_empty_items: true,
        });
        assert_eq!(reader.split_line(" a ;  ; b"), vec!["a", "b"]);
    }

    #[test]
    fn blank_trailing_field_is_dropped_when_trimming() {
        let reader = GroupReader::new(ParserConfig {
            trim_items: true,
            ..ParserConfig::default()
        });
        assert_eq!(reader.split_line("a,b, "), vec!["a", "b"]);
        assert_eq!(reader.split_line("a, ,b"), vec!["a", "", "b"]);
        assert!(reader.split_line("  ,  ").is_empty());
    }

    #[test]
    fn line_order_defines_group_ids() {
        let reader = GroupReader::default();
        let mut ids = Vec::new();
        let count = reader
            .read_groups(Cursor::new("x,y\n\nz\n"), |group, _| ids.push(group))
            .unwrap();
        assert_eq!(count, 3);
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn crlf_and_missing_final_newline() {
        let reader = GroupReader::default();
        let groups = collect(&reader, b"a,b\r\nc").unwrap();
        assert_eq!(groups, vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn trailing_newline_does_not_add_a_group() {
        let reader = GroupReader::default();
        let groups = collect(&reader, b"a\nb\n").unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let reader = GroupReader::default();
        let err = collect(&reader, b"a,b\n\xff\xfe\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
