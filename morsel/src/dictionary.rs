//! Dictionary data structures and loading.
//!
//! A [`Dictionary`] owns every lookup structure the pipeline consults. It is
//! built once at tokenizer construction, from the bundled word lists or from
//! caller-supplied sources, and is read-only afterwards, so one tokenizer
//! can serve concurrent calls without locking.
//!
//! Every source is a newline-delimited text file. Blank lines are ignored
//! and entries are trimmed; all lists except the emoticon and preserve lists
//! are lowercased at load. A source that is missing, unreadable, or empty
//! fails construction immediately, since the splitting rules assume their
//! dictionaries are populated.

pub(crate) mod affix;
pub mod abbreviation;
pub mod apostrophe;
pub mod compound;
pub mod currency;
pub mod emoticon;
pub mod html;
pub mod hyphen;
pub mod unit;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use hashbrown::HashSet;
use regex::Regex;

use crate::chars;
use crate::errors::{MorselError, Result};

pub use abbreviation::Abbreviation;
pub use apostrophe::Apostrophe;
pub use compound::Compound;
pub use currency::Currency;
pub use emoticon::Emoticon;
pub use html::Html;
pub use hyphen::Hyphen;
pub use unit::Unit;

/// File names of the bundled word lists, also looked up by
/// [`Dictionary::from_dir`].
pub mod files {
    pub const CURRENCY: &str = "currency.txt";
    pub const CURRENCY_DOLLAR: &str = "currency-dollar.txt";
    pub const UNITS: &str = "units.txt";
    pub const EMOTICONS: &str = "emoticons.txt";
    pub const ABBREVIATION_PERIOD: &str = "abbreviation-period.txt";
    pub const HYPHEN_PREFIX: &str = "english-hyphen-prefix.txt";
    pub const HYPHEN_SUFFIX: &str = "english-hyphen-suffix.txt";
    pub const COMPOUNDS: &str = "english-compounds.txt";
    pub const PRESERVE: &str = "preserve.txt";
    pub const HTML_TAGS: &str = "html-tags.txt";
}

/// Caller-supplied dictionary sources, one reader per word list.
pub struct DictionarySources<'a> {
    pub currency: Box<dyn BufRead + 'a>,
    pub currency_dollar: Box<dyn BufRead + 'a>,
    pub units: Box<dyn BufRead + 'a>,
    pub emoticons: Box<dyn BufRead + 'a>,
    pub abbreviation_period: Box<dyn BufRead + 'a>,
    pub hyphen_prefix: Box<dyn BufRead + 'a>,
    pub hyphen_suffix: Box<dyn BufRead + 'a>,
    pub compounds: Box<dyn BufRead + 'a>,
    pub preserve: Box<dyn BufRead + 'a>,
    pub html_tags: Box<dyn BufRead + 'a>,
}

/// The read-only lookup structures shared by all tokenize calls.
pub struct Dictionary {
    currency: Currency,
    unit: Unit,
    emoticon: Emoticon,
    abbreviation: Abbreviation,
    apostrophe: Apostrophe,
    hyphen: Hyphen,
    compound: Compound,
    html: Html,
    preserve: HashSet<String>,
}

impl Dictionary {
    /// Builds the dictionary from the word lists bundled with the crate.
    pub fn from_embedded() -> Result<Self> {
        Self::from_sources(DictionarySources {
            currency: Box::new(include_str!("../assets/currency.txt").as_bytes()),
            currency_dollar: Box::new(include_str!("../assets/currency-dollar.txt").as_bytes()),
            units: Box::new(include_str!("../assets/units.txt").as_bytes()),
            emoticons: Box::new(include_str!("../assets/emoticons.txt").as_bytes()),
            abbreviation_period: Box::new(
                include_str!("../assets/abbreviation-period.txt").as_bytes(),
            ),
            hyphen_prefix: Box::new(include_str!("../assets/english-hyphen-prefix.txt").as_bytes()),
            hyphen_suffix: Box::new(include_str!("../assets/english-hyphen-suffix.txt").as_bytes()),
            compounds: Box::new(include_str!("../assets/english-compounds.txt").as_bytes()),
            preserve: Box::new(include_str!("../assets/preserve.txt").as_bytes()),
            html_tags: Box::new(include_str!("../assets/html-tags.txt").as_bytes()),
        })
    }

    /// Builds the dictionary from caller-supplied sources.
    pub fn from_sources(src: DictionarySources<'_>) -> Result<Self> {
        Ok(Self {
            currency: Currency::from_readers(src.currency, src.currency_dollar)?,
            unit: Unit::from_reader(src.units)?,
            emoticon: Emoticon::from_reader(src.emoticons)?,
            abbreviation: Abbreviation::from_reader(src.abbreviation_period)?,
            apostrophe: Apostrophe,
            hyphen: Hyphen::from_readers(src.hyphen_prefix, src.hyphen_suffix)?,
            compound: Compound::from_reader(src.compounds)?,
            html: Html::from_reader(src.html_tags)?,
            preserve: read_raw_lines("preserve", src.preserve)?.into_iter().collect(),
        })
    }

    /// Builds the dictionary from a directory holding the well-known file
    /// names (see [`files`]).
    pub fn from_dir<P>(dir: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(MorselError::invalid_argument(
                "dir",
                format!("not a directory: {}", dir.display()),
            ));
        }
        Self::from_sources(DictionarySources {
            currency: open(dir, files::CURRENCY)?,
            currency_dollar: open(dir, files::CURRENCY_DOLLAR)?,
            units: open(dir, files::UNITS)?,
            emoticons: open(dir, files::EMOTICONS)?,
            abbreviation_period: open(dir, files::ABBREVIATION_PERIOD)?,
            hyphen_prefix: open(dir, files::HYPHEN_PREFIX)?,
            hyphen_suffix: open(dir, files::HYPHEN_SUFFIX)?,
            compounds: open(dir, files::COMPOUNDS)?,
            preserve: open(dir, files::PRESERVE)?,
            html_tags: open(dir, files::HTML_TAGS)?,
        })
    }

    #[inline(always)]
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    #[inline(always)]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    #[inline(always)]
    pub fn emoticon(&self) -> &Emoticon {
        &self.emoticon
    }

    #[inline(always)]
    pub fn abbreviation(&self) -> &Abbreviation {
        &self.abbreviation
    }

    #[inline(always)]
    pub fn apostrophe(&self) -> &Apostrophe {
        &self.apostrophe
    }

    #[inline(always)]
    pub fn hyphen(&self) -> &Hyphen {
        &self.hyphen
    }

    #[inline(always)]
    pub fn compound(&self) -> &Compound {
        &self.compound
    }

    #[inline(always)]
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Exact membership in the preserve list; matched against the raw chunk.
    #[inline(always)]
    pub fn is_preserved(&self, chunk: &str) -> bool {
        self.preserve.contains(chunk)
    }
}

fn open(dir: &Path, name: &'static str) -> Result<Box<dyn BufRead>> {
    let path = dir.join(name);
    let file = File::open(&path).map_err(|e| {
        MorselError::invalid_argument("dir", format!("{}: {e}", path.display()))
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Reads the trimmed, non-blank lines of one source, optionally lowercased.
/// An empty result is a configuration error.
pub(crate) fn read_entries<R>(name: &'static str, reader: R, decap: bool) -> Result<Vec<String>>
where
    R: BufRead,
{
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if decap {
            entries.push(line.chars().map(chars::to_lower_char).collect());
        } else {
            entries.push(line.to_string());
        }
    }
    if entries.is_empty() {
        return Err(MorselError::invalid_format(name, "no entries"));
    }
    Ok(entries)
}

/// Like [`read_entries`] but never lowercases.
pub(crate) fn read_raw_lines<R>(name: &'static str, reader: R) -> Result<Vec<String>>
where
    R: BufRead,
{
    read_entries(name, reader, false)
}

/// Compiles one of the fixed patterns, reporting failure as a configuration
/// error instead of panicking.
pub(crate) fn compile_pattern(pattern: &'static str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| MorselError::invalid_format("pattern", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded() {
        let dict = Dictionary::from_embedded().unwrap();
        assert!(dict.currency().is_currency_dollar("us"));
        assert!(dict.unit().is_unit("kg"));
        assert!(dict.abbreviation().ends_with_period("dr"));
        assert!(dict.hyphen().is_prefix("cross"));
        assert!(dict.emoticon().is_emoticon(":)"));
    }

    #[test]
    fn test_empty_source_fails() {
        let err = read_entries("units", "".as_bytes(), true).unwrap_err();
        assert!(err.to_string().contains("units"));

        let err = read_entries("units", "\n \n".as_bytes(), true).unwrap_err();
        assert!(err.to_string().contains("no entries"));
    }

    #[test]
    fn test_from_dir_missing() {
        let tmp = tempfile::tempdir().unwrap();
        // directory exists but the word lists do not
        assert!(Dictionary::from_dir(tmp.path()).is_err());
        assert!(Dictionary::from_dir(tmp.path().join("nope")).is_err());
    }

    #[test]
    fn test_from_dir() {
        use std::io::Write;

        let tmp = tempfile::tempdir().unwrap();
        let write = |name: &str, body: &str| {
            let mut f = File::create(tmp.path().join(name)).unwrap();
            f.write_all(body.as_bytes()).unwrap();
        };
        write(files::CURRENCY, "$\nusd\n");
        write(files::CURRENCY_DOLLAR, "us\n");
        write(files::UNITS, "kg\n");
        write(files::EMOTICONS, ":)\n");
        write(files::ABBREVIATION_PERIOD, "dr\n");
        write(files::HYPHEN_PREFIX, "cross\n");
        write(files::HYPHEN_SUFFIX, "free\n");
        write(files::COMPOUNDS, "wan na\n");
        write(files::PRESERVE, "C++\n");
        write(files::HTML_TAGS, "amp\t38\n");

        let dict = Dictionary::from_dir(tmp.path()).unwrap();
        assert!(dict.is_preserved("C++"));
        assert!(dict.unit().is_unit("kg"));
    }
}
