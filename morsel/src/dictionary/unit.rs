//! Units of measure.

use std::io::BufRead;

use crate::chars;
use crate::dictionary::read_entries;
use crate::errors::Result;
use crate::matcher::MorphemeMatch;

/// Splits a known unit-of-measure suffix off a token when it is immediately
/// preceded by a digit, e.g. `"3kg"` into `3 | kg`.
pub struct Unit {
    /// Entries longest first so `"2mm"` prefers `mm` over `m`.
    entries: Vec<String>,
}

impl Unit {
    pub(crate) fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: BufRead,
    {
        let mut entries = read_entries("units", reader, true)?;
        entries.sort_unstable_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        entries.dedup();
        Ok(Self { entries })
    }

    pub fn is_unit(&self, lower: &str) -> bool {
        self.entries.iter().any(|e| e == lower)
    }
}

impl MorphemeMatch for Unit {
    fn split_points(&self, lower: &str, lcs: &[char]) -> Option<Vec<usize>> {
        let len = lcs.len();
        for entry in &self.entries {
            if lower.ends_with(entry.as_str()) {
                let i = len - entry.chars().count();
                if i >= 1 && chars::is_digit(lcs[i - 1]) {
                    return Some(vec![i]);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Unit {
        Unit::from_reader("m\nmm\nkg\noz\npm\n".as_bytes()).unwrap()
    }

    fn split(u: &Unit, s: &str) -> Option<Vec<usize>> {
        let lcs: Vec<char> = s.chars().map(chars::to_lower_char).collect();
        let lower: String = lcs.iter().collect();
        u.split_points(&lower, &lcs)
    }

    #[test]
    fn test_suffix() {
        let u = unit();
        assert_eq!(split(&u, "3kg"), Some(vec![1]));
        assert_eq!(split(&u, "2mm"), Some(vec![1]));
        assert_eq!(split(&u, "4:45pm"), Some(vec![4]));
        assert_eq!(split(&u, "1M"), Some(vec![1]));
    }

    #[test]
    fn test_no_digit() {
        let u = unit();
        assert_eq!(split(&u, "ham"), None);
        assert_eq!(split(&u, "m"), None);
    }
}
