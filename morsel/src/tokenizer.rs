//! The segmentation engine.
//!
//! A [`Tokenizer`] owns its dictionaries and language profile; construction
//! is the only mutation point. Tokenizing is synchronous, never fails, and
//! shares no mutable state across calls, so one instance can serve many
//! threads.
//!
//! # Examples
//!
//! ```
//! use morsel::Tokenizer;
//!
//! # fn main() -> Result<(), morsel::errors::MorselError> {
//! let tokenizer = Tokenizer::english()?;
//! let tokens = tokenizer.tokenize("You paid US$170,000?!");
//!
//! let forms: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(forms, ["You", "paid", "US$", "170,000", "?!"]);
//!
//! // every token is anchored to its exact source range
//! for t in &tokens {
//!     assert_eq!(&"You paid US$170,000?!"[t.range()], t.text);
//! }
//! # Ok(())
//! # }
//! ```

pub(crate) mod pipeline;

use std::io::BufRead;
use std::path::Path;

use regex::Regex;

use crate::chars;
use crate::dictionary::{compile_pattern, Dictionary, DictionarySources};
use crate::errors::Result;
use crate::language::{English, LanguageProfile};
use crate::sentence::Sentence;
use crate::token::Token;

/// Anchored two-digit year shapes: `90`, `90s`, `90's`.
const YEAR_PATTERN: &str = r"^\d\d['’]?[sS]?$";

/// Anchored abbreviation shapes: alphanumerics joined by `.`, `|`, or `-`,
/// such as `w.r.t`, `1.2`, `A-1`.
const ABBREVIATION_PATTERN: &str = r"^[0-9A-Za-z]([.|-][0-9A-Za-z])*$";

/// Hyperlink shapes: optional protocol and user info, an IPv4 address or a
/// dotted host name with a TLD, an optional port and resource path.
const HYPERLINK_PATTERN: &str = r"(?:[A-Za-z]{3,9}://)?(?:[0-9A-Za-z_]+(?::\S*)?@)?(?:\d{3}(?:\.\d{1,3}){3}|\w+(?:-\w+)*(?:\.\w+(?:-\w+)*)*\.[A-Za-z]{2,})(?::\d{2,5})?(?:/\S*)?";

/// The rule-based lexical segmenter.
///
/// Construction loads the dictionaries and compiles the fixed patterns;
/// both are read-only afterwards. [`tokenize`](Self::tokenize) converts a
/// string into an ordered sequence of tokens whose text always equals the
/// source slice at the recorded offsets.
pub struct Tokenizer {
    pub(crate) dict: Dictionary,
    pub(crate) profile: Box<dyn LanguageProfile>,
    pub(crate) year: Regex,
    pub(crate) abbreviation: Regex,
    pub(crate) hyperlink: Regex,
}

impl Tokenizer {
    /// Creates an English tokenizer backed by the bundled word lists.
    pub fn english() -> Result<Self> {
        Self::with_profile(Dictionary::from_embedded()?, Box::new(English::new()))
    }

    /// Creates an English tokenizer from caller-supplied dictionary sources.
    pub fn from_sources(sources: DictionarySources<'_>) -> Result<Self> {
        Self::with_profile(Dictionary::from_sources(sources)?, Box::new(English::new()))
    }

    /// Creates an English tokenizer from a dictionary directory holding the
    /// well-known file names.
    pub fn from_dir<P>(dir: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::with_profile(Dictionary::from_dir(dir)?, Box::new(English::new()))
    }

    /// Creates a tokenizer from an explicit dictionary and language profile.
    pub fn with_profile(dict: Dictionary, profile: Box<dyn LanguageProfile>) -> Result<Self> {
        Ok(Self {
            dict,
            profile,
            year: compile_pattern(YEAR_PATTERN)?,
            abbreviation: compile_pattern(ABBREVIATION_PATTERN)?,
            hyperlink: compile_pattern(HYPERLINK_PATTERN)?,
        })
    }

    /// The dictionaries backing this tokenizer.
    #[inline(always)]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Tokenizes a string.
    ///
    /// Embedded newlines count as whitespace. Token offsets are byte offsets
    /// into `text`; the concatenation of token ranges and skipped whitespace
    /// ranges partitions the input exactly.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let sent = Sentence::new(text, 0);
        let mut tokens = Vec::new();
        self.tokenize_sentence(&sent, &mut tokens);
        if !tokens.is_empty() {
            self.finalize(&sent, &mut tokens);
        }
        tokens
    }

    /// Tokenizes a reader line by line.
    ///
    /// Each line is tokenized and finalized on its own; offsets continue
    /// across lines by the exact separator bytes consumed, so they index
    /// into the concatenated stream.
    pub fn tokenize_lines<R>(&self, mut reader: R) -> Result<Vec<Token>>
    where
        R: BufRead,
    {
        let mut tokens = Vec::new();
        let mut base = 0usize;
        let mut buf = String::new();
        loop {
            buf.clear();
            let read = reader.read_line(&mut buf)?;
            if read == 0 {
                break;
            }
            let line = buf.trim_end_matches(['\n', '\r']);
            let sent = Sentence::new(line, base);
            let mut line_tokens = Vec::new();
            self.tokenize_sentence(&sent, &mut line_tokens);
            if !line_tokens.is_empty() {
                self.finalize(&sent, &mut line_tokens);
            }
            tokens.extend(line_tokens);
            base += read;
        }
        Ok(tokens)
    }

    /// Finalization pass over the token list of one line.
    fn finalize(&self, sent: &Sentence, tokens: &mut Vec<Token>) {
        let mut i = 0;
        while i < tokens.len() {
            let lower: String = tokens[i].text.chars().map(chars::to_lower_char).collect();
            if split_abbreviated_no(tokens, &lower, i) {
                // skip the period just inserted
                i += 1;
            } else {
                merge_parenthesis(sent, tokens, i);
            }
            i += 1;
        }
        if tokens.len() == 1 {
            split_last_period(tokens);
        }
    }
}

/// Splits `"No."` into `No | .` unless the next token starts with a digit,
/// which marks a numbering use such as `"No. 5"`.
fn split_abbreviated_no(tokens: &mut Vec<Token>, lower: &str, index: usize) -> bool {
    if lower != "no." {
        return false;
    }
    let next_starts_with_digit = tokens
        .get(index + 1)
        .and_then(|t| t.text.chars().next())
        .is_some_and(chars::is_digit);
    if next_starts_with_digit {
        return false;
    }
    let curr = tokens[index].clone();
    tokens[index] = Token {
        start: curr.start,
        end: curr.end - 1,
        text: curr.text[..curr.text.len() - 1].to_string(),
    };
    tokens.insert(
        index + 1,
        Token {
            start: curr.end - 1,
            end: curr.end,
            text: ".".to_string(),
        },
    );
    true
}

/// Merges a single-character token between `"("` and `")"` into one token
/// spanning the combined offsets. The merged text comes from the source, so
/// it may contain interior whitespace.
fn merge_parenthesis(sent: &Sentence, tokens: &mut Vec<Token>, index: usize) -> bool {
    if index == 0 || index + 1 >= tokens.len() {
        return false;
    }
    if tokens[index].text.chars().count() != 1 {
        return false;
    }
    if tokens[index - 1].text != "(" || tokens[index + 1].text != ")" {
        return false;
    }
    let start = tokens[index - 1].start;
    let end = tokens[index + 1].end;
    tokens[index - 1] = Token {
        start,
        end,
        text: sent.text_abs(start, end).to_string(),
    };
    tokens.remove(index);
    tokens.remove(index);
    true
}

/// Splits the trailing period off a lone token unless another final mark
/// precedes it (`"etc."` alone becomes `etc | .`, `"T.."` stays).
fn split_last_period(tokens: &mut Vec<Token>) {
    let last = match tokens.last() {
        Some(t) => t.clone(),
        None => return,
    };
    let cs: Vec<char> = last.text.chars().collect();
    let n = cs.len();
    if n > 1 && cs[n - 1] == '.' && !chars::is_final_mark(cs[n - 2]) {
        let index = tokens.len() - 1;
        tokens[index] = Token {
            start: last.start,
            end: last.end - 1,
            text: last.text[..last.text.len() - 1].to_string(),
        };
        tokens.push(Token {
            start: last.end - 1,
            end: last.end,
            text: ".".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forms(tokens: &[Token]) -> Vec<String> {
        tokens.iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn test_empty_input() {
        let t = Tokenizer::english().unwrap();
        assert!(t.tokenize("").is_empty());
        assert!(t.tokenize(" \n\t\n\r\u{000C}").is_empty());
    }

    #[test]
    fn test_whitespace_offsets() {
        let t = Tokenizer::english().unwrap();
        let tokens = t.tokenize(" A B  C\n D \t\nE\r\u{000C} ");
        assert_eq!(forms(&tokens), ["A", "B", "C", "D", "E"]);
        let spans: Vec<(usize, usize)> = tokens.iter().map(|t| (t.start, t.end)).collect();
        assert_eq!(spans, [(1, 2), (3, 4), (6, 7), (9, 10), (13, 14)]);
    }

    #[test]
    fn test_tokenize_lines_offsets() {
        let t = Tokenizer::english().unwrap();
        let input = "No. 5 No.\nhe's we'd\n";
        let tokens = t.tokenize_lines(input.as_bytes()).unwrap();
        assert_eq!(
            forms(&tokens),
            ["No.", "5", "No", ".", "he", "'s", "we", "'d"]
        );
        for token in &tokens {
            assert_eq!(&input[token.range()], token.text);
        }
    }

    #[test]
    fn test_tokenize_lines_crlf() {
        let t = Tokenizer::english().unwrap();
        let input = "ab\r\ncd\r\n";
        let tokens = t.tokenize_lines(input.as_bytes()).unwrap();
        assert_eq!(forms(&tokens), ["ab", "cd"]);
        assert_eq!(tokens[1].start, 4);
        for token in &tokens {
            assert_eq!(&input[token.range()], token.text);
        }
    }

    #[test]
    fn test_tokenize_lines_finalizes_per_line() {
        let t = Tokenizer::english().unwrap();
        // a lone "etc." line splits its trailing period
        let tokens = t.tokenize_lines("etc.\n".as_bytes()).unwrap();
        assert_eq!(forms(&tokens), ["etc", "."]);
    }

    #[test]
    fn test_tokenize_lines_from_file() {
        use std::io::{BufReader, Seek, SeekFrom, Write};

        let t = Tokenizer::english().unwrap();
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(b"$1 US$170,000?!\nAT&T\n").unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();
        let tokens = t.tokenize_lines(BufReader::new(file)).unwrap();
        assert_eq!(
            forms(&tokens),
            ["$", "1", "US$", "170,000", "?!", "AT&T"]
        );
    }

    #[test]
    fn test_finalize_no() {
        let t = Tokenizer::english().unwrap();
        assert_eq!(forms(&t.tokenize("No. 5 No.")), ["No.", "5", "No", "."]);
        let tokens = t.tokenize("No. 5 No.");
        let spans: Vec<(usize, usize)> = tokens.iter().map(|t| (t.start, t.end)).collect();
        assert_eq!(spans, [(0, 3), (4, 5), (6, 8), (8, 9)]);
    }

    #[test]
    fn test_finalize_parenthesis() {
        let t = Tokenizer::english().unwrap();
        let input = "He loves Acne (! ) disgusting";
        let tokens = t.tokenize(input);
        assert_eq!(forms(&tokens), ["He", "loves", "Acne", "(! )", "disgusting"]);
        let spans: Vec<(usize, usize)> = tokens.iter().map(|t| (t.start, t.end)).collect();
        assert_eq!(spans, [(0, 2), (3, 8), (9, 13), (14, 18), (19, 29)]);
        for token in &tokens {
            assert_eq!(&input[token.range()], token.text);
        }
    }

    #[test]
    fn test_finalize_last_period() {
        let t = Tokenizer::english().unwrap();
        assert_eq!(forms(&t.tokenize("etc.")), ["etc", "."]);
        // a final mark before the period blocks the split
        assert_eq!(forms(&t.tokenize("T..")), ["T", ".."]);
    }
}
