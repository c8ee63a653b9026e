//! Abbreviations that keep a trailing period.

use std::io::BufRead;

use hashbrown::HashSet;

use crate::dictionary::read_entries;
use crate::errors::Result;

/// Exception list for the rightward period extension: a token whose
/// lowercase form is listed here absorbs the period that follows it
/// (`"Dr."` stays one token).
pub struct Abbreviation {
    period: HashSet<String>,
}

impl Abbreviation {
    pub(crate) fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: BufRead,
    {
        let period = read_entries("abbreviation-period", reader, true)?
            .into_iter()
            .collect();
        Ok(Self { period })
    }

    /// Entries are stored without the period: `"dr"`, `"ph.d"`, `"no"`.
    #[inline]
    pub fn ends_with_period(&self, lower: &str) -> bool {
        self.period.contains(lower)
    }
}
