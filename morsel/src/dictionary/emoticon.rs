//! Emoticon detection.

use std::io::BufRead;

use hashbrown::HashSet;
use regex::Regex;

use crate::chars;
use crate::dictionary::affix::AffixTree;
use crate::dictionary::{compile_pattern, read_entries};
use crate::errors::Result;

/// Parameterized emoticon shapes such as `:-)))` and `;---(`.
const SHAPE_PATTERN: &str = r"[!|;:#%]-*[()\[\]{}|<>]+";

/// Recognizes emoticons inside a whitespace-free chunk.
///
/// Lookup order: exact set membership over the lowercased chunk, the shape
/// regex anywhere in the chunk, then the longest emoticon prefix and the
/// longest emoticon suffix via two affix tries. The first hit wins.
pub struct Emoticon {
    exact: HashSet<String>,
    shape: Regex,
    prefix: AffixTree,
    suffix: AffixTree,
}

impl Emoticon {
    pub(crate) fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: BufRead,
    {
        let exact: HashSet<String> = read_entries("emoticons", reader, false)?
            .into_iter()
            .collect();
        let mut prefix = AffixTree::new(true);
        let mut suffix = AffixTree::new(false);
        for entry in &exact {
            prefix.insert(entry);
            suffix.insert(entry);
        }
        Ok(Self {
            exact,
            shape: compile_pattern(SHAPE_PATTERN)?,
            prefix,
            suffix,
        })
    }

    /// Returns the char range of the emoticon within `chunk`, or `None`.
    pub fn emoticon_range(&self, chunk: &str) -> Option<(usize, usize)> {
        let lower: String = chunk.chars().map(chars::to_lower_char).collect();
        let len_char = lower.chars().count();

        if self.exact.contains(lower.as_str()) {
            return Some((0, len_char));
        }
        if let Some(m) = self.shape.find(&lower) {
            let start = lower[..m.start()].chars().count();
            let end = start + lower[m.start()..m.end()].chars().count();
            return Some((start, end));
        }

        let lcs: Vec<char> = lower.chars().collect();
        if let Some(end) = self.prefix.longest_match(&lcs) {
            return Some((0, end));
        }
        if let Some(start) = self.suffix.longest_match(&lcs) {
            return Some((start, len_char));
        }
        None
    }

    /// Whether the whole chunk is an emoticon.
    pub fn is_emoticon(&self, chunk: &str) -> bool {
        match self.emoticon_range(chunk) {
            Some((start, end)) => start == 0 && end == chunk.chars().count(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emoticon() -> Emoticon {
        Emoticon::from_reader(":)\n:(\n:d\n^_^\n<3\n".as_bytes()).unwrap()
    }

    #[test]
    fn test_exact() {
        let e = emoticon();
        assert_eq!(e.emoticon_range(":)"), Some((0, 2)));
        assert_eq!(e.emoticon_range(":D"), Some((0, 2)));
        assert_eq!(e.emoticon_range("^_^"), Some((0, 3)));
        assert!(e.is_emoticon("<3"));
    }

    #[test]
    fn test_shape() {
        let e = emoticon();
        assert_eq!(e.emoticon_range(":-)))"), Some((0, 5)));
        assert_eq!(e.emoticon_range(":---("), Some((0, 5)));
        assert_eq!(e.emoticon_range("Hi:)."), Some((2, 4)));
        assert_eq!(e.emoticon_range("||"), Some((0, 2)));
    }

    #[test]
    fn test_affixes() {
        let e = emoticon();
        // suffix trie: the shape regex does not cover "^_^"
        assert_eq!(e.emoticon_range("bye^_^"), Some((3, 6)));
        // prefix trie
        assert_eq!(e.emoticon_range("<3you"), Some((0, 2)));
    }

    #[test]
    fn test_none() {
        let e = emoticon();
        assert_eq!(e.emoticon_range("hello"), None);
        assert_eq!(e.emoticon_range("1,234"), None);
    }
}
