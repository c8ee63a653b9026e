//! HTML character entities.

use std::borrow::Cow;
use std::io::BufRead;

use hashbrown::HashMap;
use regex::Regex;

use crate::dictionary::{compile_pattern, read_raw_lines};
use crate::errors::{MorselError, Result};

const ENTITY_PATTERN: &str = r"&(#?[0-9A-Za-z]+);";

/// Replaces HTML character entities with their characters before
/// tokenization, e.g. `"AT&amp;T"` into `"AT&T"`.
///
/// Named entities come from a TAB-separated table (`name<TAB>codepoint`, one
/// per line); numeric escapes `&#NNN;` are decoded for codepoints in
/// `32..=917631`. Unknown entities are left untouched.
pub struct Html {
    tags: HashMap<String, char>,
    pattern: Regex,
}

impl Html {
    pub(crate) fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: BufRead,
    {
        let mut tags = HashMap::new();
        for line in read_raw_lines("html-tags", reader)? {
            let mut fields = line.split('\t');
            let (name, code) = match (fields.next(), fields.next()) {
                (Some(name), Some(code)) => (name, code),
                _ => {
                    return Err(MorselError::invalid_format(
                        "html-tags",
                        format!("expected <name>\\t<codepoint>: {line}"),
                    ))
                }
            };
            let code: u32 = code.trim().parse::<u32>()?;
            let ch = char::from_u32(code).ok_or_else(|| {
                MorselError::invalid_format("html-tags", format!("bad codepoint: {code}"))
            })?;
            tags.insert(name.trim().to_lowercase(), ch);
        }
        Ok(Self {
            tags,
            pattern: compile_pattern(ENTITY_PATTERN)?,
        })
    }

    /// Substitutes every known entity in `s`. Borrows when nothing matches.
    pub fn replace<'a>(&self, s: &'a str) -> Cow<'a, str> {
        if !self.pattern.is_match(s) {
            return Cow::Borrowed(s);
        }
        let mut out = String::with_capacity(s.len());
        let mut last = 0;
        for caps in self.pattern.captures_iter(s) {
            let m = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let key = &caps[1];
            out.push_str(&s[last..m.start()]);
            if let Some(&ch) = self.tags.get(key.to_lowercase().as_str()) {
                out.push(ch);
            } else if let Some(ch) = Self::numeric(key) {
                out.push(ch);
            } else {
                out.push_str(m.as_str());
            }
            last = m.end();
        }
        out.push_str(&s[last..]);
        Cow::Owned(out)
    }

    fn numeric(key: &str) -> Option<char> {
        let digits = key.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let code: u32 = digits.parse().ok()?;
        if (32..=917_631).contains(&code) {
            char::from_u32(code)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html() -> Html {
        Html::from_reader("amp\t38\nlt\t60\ngt\t62\nquot\t34\n".as_bytes()).unwrap()
    }

    #[test]
    fn test_named() {
        let h = html();
        assert_eq!(h.replace("AT&amp;T"), "AT&T");
        assert_eq!(h.replace("&lt;b&gt;"), "<b>");
        assert_eq!(h.replace("&AMP;"), "&");
    }

    #[test]
    fn test_numeric() {
        let h = html();
        assert_eq!(h.replace("&#65;BC"), "ABC");
        // below the printable floor
        assert_eq!(h.replace("&#1;"), "&#1;");
    }

    #[test]
    fn test_untouched() {
        let h = html();
        assert!(matches!(h.replace("plain text"), Cow::Borrowed(_)));
        assert_eq!(h.replace("&unknown;"), "&unknown;");
        assert_eq!(h.replace("a & b"), "a & b");
    }

    #[test]
    fn test_bad_table() {
        assert!(Html::from_reader("amp 38\n".as_bytes()).is_err());
        assert!(Html::from_reader("amp\tnotanumber\n".as_bytes()).is_err());
    }
}
