//! English hyphen preservation.

use std::io::BufRead;

use hashbrown::HashSet;

use crate::chars;
use crate::dictionary::read_entries;
use crate::errors::Result;

/// Decides whether an interior hyphen must stay inside its token instead of
/// being isolated by the symbol pass.
///
/// A hyphen is preserved when the character after it is a letter (or the
/// hyphen ends the token) and any of the following holds: the lowercased
/// left context is a known prefix (`dis-able`), the lowercased right context
/// is a known suffix, or a single vowel sits between two hyphens on either
/// side (`art-o-torium`, `s-e-e`).
pub struct Hyphen {
    prefixes: HashSet<String>,
    suffixes: HashSet<String>,
}

impl Hyphen {
    pub(crate) fn from_readers<P, S>(prefix: P, suffix: S) -> Result<Self>
    where
        P: BufRead,
        S: BufRead,
    {
        let prefixes = read_entries("english-hyphen-prefix", prefix, true)?
            .into_iter()
            .collect();
        let suffixes = read_entries("english-hyphen-suffix", suffix, true)?
            .into_iter()
            .collect();
        Ok(Self { prefixes, suffixes })
    }

    pub fn is_prefix(&self, lower: &str) -> bool {
        self.prefixes.contains(lower)
    }

    pub fn is_suffix(&self, lower: &str) -> bool {
        self.suffixes.contains(lower)
    }

    pub fn preserve(&self, cs: &[char], index: usize) -> bool {
        let len = cs.len();
        if !chars::is_hyphen(cs[index]) {
            return false;
        }
        if index + 1 != len && !chars::is_alphabet(cs[index + 1]) {
            return false;
        }
        if index > 0 {
            let left: String = cs[..index].iter().map(|&c| chars::to_lower_char(c)).collect();
            if self.is_prefix(&left) {
                return true;
            }
        }
        if index + 1 < len {
            let right: String = cs[index + 1..]
                .iter()
                .map(|&c| chars::to_lower_char(c))
                .collect();
            if self.is_suffix(&right) {
                return true;
            }
        }
        if index + 2 < len && chars::is_vowel(cs[index + 1]) && chars::is_hyphen(cs[index + 2]) {
            return true;
        }
        if index >= 2 && chars::is_vowel(cs[index - 1]) && chars::is_hyphen(cs[index - 2]) {
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hyphen() -> Hyphen {
        Hyphen::from_readers("o\ndis\ncross\n".as_bytes(), "free\nlike\n".as_bytes()).unwrap()
    }

    fn preserve(h: &Hyphen, s: &str, index: usize) -> bool {
        let cs: Vec<char> = s.chars().collect();
        h.preserve(&cs, index)
    }

    #[test]
    fn test_prefix_suffix() {
        let h = hyphen();
        assert!(preserve(&h, "dis-able", 3));
        assert!(preserve(&h, "DIS-ABLE", 3));
        assert!(preserve(&h, "cross-validation", 5));
        assert!(preserve(&h, "o-kay", 1));
        assert!(preserve(&h, "care-free", 4));
        assert!(!preserve(&h, "art-work", 3));
    }

    #[test]
    fn test_vowel_heuristics() {
        let h = hyphen();
        assert!(preserve(&h, "art-o-torium", 3));
        assert!(preserve(&h, "art-o-torium", 5));
        assert!(preserve(&h, "s-e-e", 1));
        assert!(preserve(&h, "s-e-e", 3));
    }

    #[test]
    fn test_non_letter_right_context() {
        let h = hyphen();
        // digit after the hyphen is out of this oracle's scope
        assert!(!preserve(&h, "A-1", 1));
        // not a hyphen at all
        assert!(!preserve(&h, "a.b", 1));
    }
}
