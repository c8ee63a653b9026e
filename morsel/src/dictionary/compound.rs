//! Collapsed multiword expressions.

use std::io::BufRead;

use hashbrown::HashMap;

use crate::chars;
use crate::dictionary::read_raw_lines;
use crate::errors::Result;
use crate::matcher::MorphemeMatch;

/// Re-splits tokens that collapse a known multiword expression, e.g.
/// `"wanna"` into `wan | na` and `"i'mma"` into `i | 'm | ma`.
///
/// Each source line holds the expression's parts separated by spaces; the
/// map key is the lowercased concatenation and the value holds the interior
/// split offsets in characters.
pub struct Compound {
    map: HashMap<String, Vec<usize>>,
}

impl Compound {
    pub(crate) fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: BufRead,
    {
        let mut map = HashMap::new();
        for line in read_raw_lines("english-compounds", reader)? {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }
            let mut offsets = Vec::with_capacity(parts.len() - 1);
            let mut pos = 0;
            for part in &parts[..parts.len() - 1] {
                pos += part.chars().count();
                offsets.push(pos);
            }
            let joined: String = parts.concat();
            let key: String = joined.chars().map(chars::to_lower_char).collect();
            map.insert(key, offsets);
        }
        Ok(Self { map })
    }
}

impl MorphemeMatch for Compound {
    fn split_points(&self, lower: &str, _lcs: &[char]) -> Option<Vec<usize>> {
        self.map.get(lower).cloned()
    }
}
