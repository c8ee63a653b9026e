//! The staged segmentation pipeline.
//!
//! One chunk (a maximal whitespace-free run) flows through meta-span
//! detection, symbol-run isolation with boundary extension, and morpheme
//! matching. All indices here are character coordinates into the current
//! [`Sentence`]; token emission maps them back to byte offsets.
//!
//! Rule evaluation is strictly left to right and first-applicable-rule-wins:
//! at each interior index the preservation predicates run before the
//! isolation tests, and an isolated run advances the scan past itself.

use crate::chars;
use crate::matcher::run_matcher;
use crate::sentence::Sentence;
use crate::token::Token;
use crate::tokenizer::Tokenizer;

const PROTOCOLS: [&str; 4] = ["http://", "https://", "ftp://", "sftp://"];

/// Symbols isolated from their neighbors when they appear between
/// non-symbol spans.
#[inline(always)]
fn is_symbol_in_between(c: char) -> bool {
    chars::is_bracket(c)
        || chars::is_arrow(c)
        || chars::is_double_quotation_mark(c)
        || chars::is_hyphen(c)
        || matches!(c, ';' | ',' | '~' | '=' | '+' | '&' | '|' | '/')
}

/// A symbol for the purposes of leading/trailing run detection.
#[inline(always)]
fn is_symbol(c: char) -> bool {
    chars::is_punctuation(c)
        || chars::is_general_punctuation(c)
        || chars::is_currency_symbol(c)
        || chars::is_arrow(c)
}

/// A final mark followed by another final, separator, or quotation mark
/// starts an ellipsis-like run.
#[inline(always)]
fn is_ellipsis(cs: &[char], index: usize) -> bool {
    if chars::is_final_mark(cs[index]) && index + 1 < cs.len() {
        let c = cs[index + 1];
        return chars::is_final_mark(c)
            || chars::is_separator_mark(c)
            || chars::is_quotation_mark(c);
    }
    false
}

/// A hyphen between an alphanumeric and a digit, a slash between digits, or
/// a comma grouping exactly three digits stays inside a numeric literal.
fn preserve_symbol_in_digits(cs: &[char], index: usize) -> bool {
    let c = cs[index];
    if chars::is_hyphen(c) {
        index >= 1
            && index + 1 < cs.len()
            && chars::is_alnum(cs[index - 1])
            && chars::is_digit(cs[index + 1])
    } else if c == '/' {
        index >= 1
            && index + 1 < cs.len()
            && chars::is_digit(cs[index - 1])
            && chars::is_digit(cs[index + 1])
    } else if c == ',' {
        index >= 1
            && index + 3 < cs.len()
            && (index + 4 == cs.len() || !chars::is_digit(cs[index + 4]))
            && chars::is_digit(cs[index - 1])
            && chars::is_digit(cs[index + 1])
            && chars::is_digit(cs[index + 2])
            && chars::is_digit(cs[index + 3])
    } else {
        false
    }
}

/// An ampersand between two letters stays inside the token ("AT&T").
fn preserve_symbol_in_alphabets(cs: &[char], index: usize) -> bool {
    cs[index] == '&'
        && index >= 1
        && index + 1 < cs.len()
        && chars::is_alphabet(cs[index - 1])
        && chars::is_alphabet(cs[index + 1])
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SymbolFlag {
    /// Grouped with neighboring identical characters only.
    None,
    /// Grouped with any neighboring final mark.
    Final,
    /// Always emitted as its own (same-character) run.
    Grouped,
}

#[inline(always)]
fn symbol_flag(c: char) -> SymbolFlag {
    if chars::is_final_mark(c) {
        SymbolFlag::Final
    } else if chars::is_bracket(c)
        || chars::is_separator_mark(c)
        || chars::is_quotation_mark(c)
        || c == '`'
    {
        SymbolFlag::Grouped
    } else {
        SymbolFlag::None
    }
}

/// Exclusive end of the run starting at `index`: identical characters, or
/// any final marks when `final_mark` is set.
fn span_index(cs: &[char], index: usize, right_bound: usize, final_mark: bool) -> usize {
    let c = cs[index];
    let mut i = index + 1;
    while i < right_bound {
        let consecutive = if final_mark {
            chars::is_final_mark(cs[i])
        } else {
            cs[i] == c
        };
        if !consecutive {
            return i;
        }
        i += 1;
    }
    i
}

fn first_non_symbol_index(cs: &[char]) -> usize {
    cs.iter().position(|&c| !is_symbol(c)).unwrap_or(cs.len())
}

fn last_symbol_sequence_index(cs: &[char]) -> usize {
    cs.iter()
        .rposition(|&c| !is_symbol(c))
        .map_or(0, |i| i + 1)
}

fn starts_with_network_protocol(chunk: &str) -> bool {
    let lower: String = chunk.chars().map(chars::to_lower_char).collect();
    PROTOCOLS.iter().any(|p| lower.starts_with(p))
}

impl Tokenizer {
    /// Stage A: split the line on whitespace and feed each chunk to meta
    /// detection.
    pub(crate) fn tokenize_sentence(&self, sent: &Sentence, out: &mut Vec<Token>) {
        let cs = sent.chars();
        let mut begin = 0;
        for i in 0..sent.len_char() {
            if chars::is_whitespace(cs[i]) {
                if begin < i {
                    self.tokenize_meta(sent, begin, i, out);
                }
                begin = i + 1;
            }
        }
        if begin < sent.len_char() {
            self.tokenize_meta(sent, begin, sent.len_char(), out);
        }
    }

    /// Stage B: emit a detected meta-span (preserved chunk, emoticon, or
    /// hyperlink) atomically; residues feed the symbol pass directly.
    fn tokenize_meta(&self, sent: &Sentence, start: usize, end: usize, out: &mut Vec<Token>) {
        match self.meta_range(sent, start, end) {
            Some((mb, me)) => {
                if start < mb {
                    self.tokenize_symbols(sent, start, mb, out);
                }
                out.push(sent.token(mb, me));
                if me < end {
                    self.tokenize_symbols(sent, me, end, out);
                }
            }
            None => self.tokenize_symbols(sent, start, end, out),
        }
    }

    fn meta_range(&self, sent: &Sentence, start: usize, end: usize) -> Option<(usize, usize)> {
        let chunk = sent.text(start..end);
        if starts_with_network_protocol(chunk) || self.dict.is_preserved(chunk) {
            return Some((start, end));
        }
        if let Some((b, e)) = self.dict.emoticon().emoticon_range(chunk) {
            return Some((start + b, start + e));
        }
        if let Some(m) = self.hyperlink.find(chunk) {
            let b = chunk[..m.start()].chars().count();
            let e = b + chunk[m.start()..m.end()].chars().count();
            return Some((start + b, start + e));
        }
        None
    }

    /// Stage C driver: isolate symbol runs, extend boundaries, then emit
    /// symbol tokens and hand the residual spans to morpheme matching.
    fn tokenize_symbols(&self, sent: &Sentence, start: usize, end: usize, out: &mut Vec<Token>) {
        let cs = &sent.chars()[start..end];
        let len = cs.len();

        let first = first_non_symbol_index(cs);
        if first == len {
            self.add_symbols(sent, start, end, out);
            return;
        }
        let last = last_symbol_sequence_index(cs);

        let mut spans: Vec<(usize, usize)> = Vec::new();
        spans.push((0, first));
        self.isolate_interior(cs, first + 1, last - 1, &mut spans);
        spans.push((last, len));

        self.emit_spans(sent, start, cs, spans, out);
    }

    /// Scans the interior for positions that must become their own token,
    /// honoring the preservation rules first.
    fn isolate_interior(
        &self,
        cs: &[char],
        from: usize,
        to: usize,
        spans: &mut Vec<(usize, usize)>,
    ) {
        let mut i = from;
        while i < to {
            if self.profile.preserve_in_between(&self.dict, cs, i)
                || preserve_symbol_in_digits(cs, i)
                || preserve_symbol_in_alphabets(cs, i)
            {
                i += 1;
                continue;
            }
            if is_ellipsis(cs, i)
                || is_symbol_in_between(cs[i])
                || (i + 1 < to && is_symbol_in_between(cs[i + 1]) && chars::is_final_mark(cs[i]))
            {
                let j = span_index(cs, i, to, false);
                spans.push((i, j));
                i = j;
            } else {
                i += 1;
            }
        }
    }

    /// Boundary extension and emission over the isolated spans.
    ///
    /// `spans` holds the leading run, the isolated interior runs, and the
    /// trailing run, in order; the gaps between them are the non-symbol
    /// spans. A boundary is only extended where its symbol run is thin
    /// enough to move: the outer runs whenever they are non-empty, interior
    /// runs only when they are a single character.
    fn emit_spans(
        &self,
        sent: &Sentence,
        base: usize,
        cs: &[char],
        mut spans: Vec<(usize, usize)>,
        out: &mut Vec<Token>,
    ) {
        let size = spans.len() - 1;

        for i in 0..size {
            let (p0, p1) = spans[i];
            let (n0, n1) = spans[i + 1];
            let (b, e) = (p1, n0);
            if b < e {
                let gap: String = cs[b..e].iter().collect();
                let pg = p1 - p0;
                let ng = n1 - n0;
                let pb = if i == 0 { pg > 0 } else { pg == 1 };
                let nb = if i + 1 == size { ng > 0 } else { ng == 1 };
                if pb {
                    spans[i].1 = self.adjust_first_non_symbol(cs, b, &gap);
                }
                if nb {
                    spans[i + 1].0 = self.adjust_last_symbol_sequence(cs, e, &gap);
                }
            }
        }

        for i in 0..size {
            let (p0, p1) = spans[i];
            if p0 < p1 {
                if i == 0 {
                    self.add_symbols(sent, base + p0, base + p1, out);
                } else {
                    out.push(sent.token(base + p0, base + p1));
                }
            }
            let (n0, _) = spans[i + 1];
            if p1 < n0 {
                self.add_morphemes(sent, base + p1, base + n0, out);
            }
        }

        let (l0, l1) = spans[size];
        if l0 < l1 {
            self.add_symbols(sent, base + l0, base + l1, out);
        }
    }

    /// Leftward boundary extension: absorb a sign or decimal point before a
    /// digit, `@`/`#` before a letter, or an apostrophe before a two-digit
    /// year shape.
    fn adjust_first_non_symbol(&self, cs: &[char], begin: usize, gap: &str) -> usize {
        let sym = cs[begin - 1];
        let curr = cs[begin];
        let extended = self.profile.first_gap(&self.dict, cs, begin, gap);
        if extended > 0 {
            return begin - extended;
        }
        if chars::is_pre_digit_symbol(sym) {
            if chars::is_digit(curr) {
                return begin - 1; // -1, .1, +1
            }
        } else if sym == '@' || sym == '#' {
            if chars::is_alphabet(curr) {
                return begin - 1; // @A, #A
            }
        } else if chars::is_apostrophe(sym) && self.year.is_match(gap) {
            return begin - 1;
        }
        begin
    }

    /// Rightward boundary extension: absorb a `$` completing a dollar
    /// alias, or a period the abbreviation heuristics sanction.
    fn adjust_last_symbol_sequence(&self, cs: &[char], end: usize, gap: &str) -> usize {
        let sym = cs[end];
        let extended = self.profile.last_gap(&self.dict, cs, end, gap);
        if extended > 0 {
            return end + extended;
        }
        if sym == '$' {
            let lower: String = gap.chars().map(chars::to_lower_char).collect();
            if self.dict.currency().is_currency_dollar(&lower) {
                return end + 1;
            }
        } else if sym == '.' && self.preserve_period(cs, end, gap) {
            return end + 1;
        }
        end
    }

    /// Whether the period at `end` belongs to the span before it: kept
    /// before a separator mark, dropped before another final mark or a
    /// quote, otherwise kept for abbreviation shapes and short all-consonant
    /// spans.
    fn preserve_period(&self, cs: &[char], end: usize, gap: &str) -> bool {
        if end + 1 < cs.len() {
            let c = cs[end + 1];
            if chars::is_separator_mark(c) {
                return true;
            }
            if chars::is_final_mark(c) || chars::is_quotation_mark(c) {
                return false;
            }
        }
        if self.abbreviation.is_match(gap) {
            return true;
        }
        let len = gap.chars().count();
        (2..=5).contains(&len) && chars::contains_only_consonants(gap)
    }

    /// Decomposes a symbol-only span: identical characters group, final
    /// marks group with each other, and bracket, separator, quote, and
    /// backquote characters always close their own run.
    fn add_symbols(&self, sent: &Sentence, start: usize, end: usize, out: &mut Vec<Token>) {
        if end - start == 1 {
            out.push(sent.token(start, end));
            return;
        }
        let cs = &sent.chars()[start..end];
        let len = cs.len();
        let mut begin = 0;
        let mut i = 0;
        while i < len {
            let flag = symbol_flag(cs[i]);
            let j = span_index(cs, i, len, flag == SymbolFlag::Final);
            if flag != SymbolFlag::None || i + 1 < j {
                if begin < i {
                    out.push(sent.token(start + begin, start + i));
                }
                out.push(sent.token(start + i, start + j));
                begin = j;
            }
            i = j;
        }
        if begin < len {
            out.push(sent.token(start + begin, start + len));
        }
    }

    /// Stage D: run the matcher chain over a residual span; the first
    /// non-declining matcher decides the split.
    fn add_morphemes(&self, sent: &Sentence, start: usize, end: usize, out: &mut Vec<Token>) {
        if end - start == 1 {
            out.push(sent.token(start, end));
            return;
        }
        let mut lcs: Vec<char> = sent.chars()[start..end].to_vec();
        chars::to_lower(&mut lcs);
        let lower: String = lcs.iter().collect();

        for &kind in self.profile.matcher_order() {
            if let Some(points) = run_matcher(kind, &self.dict, &lower, &lcs) {
                let mut prev = 0;
                for p in points {
                    out.push(sent.token(start + prev, start + p));
                    prev = p;
                }
                out.push(sent.token(start + prev, end));
                return;
            }
        }
        out.push(sent.token(start, end));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_classes() {
        assert!(is_symbol('$'));
        assert!(is_symbol('\u{2019}'));
        assert!(!is_symbol('a'));
        assert!(!is_symbol('0'));

        assert!(is_symbol_in_between(','));
        assert!(is_symbol_in_between('-'));
        assert!(is_symbol_in_between('"'));
        assert!(!is_symbol_in_between('.'));
        assert!(!is_symbol_in_between('\''));
        assert!(!is_symbol_in_between(':'));
    }

    #[test]
    fn test_run_boundaries() {
        let cs: Vec<char> = "--ab!?".chars().collect();
        assert_eq!(first_non_symbol_index(&cs), 2);
        assert_eq!(last_symbol_sequence_index(&cs), 4);

        let cs: Vec<char> = "---".chars().collect();
        assert_eq!(first_non_symbol_index(&cs), 3);
        assert_eq!(last_symbol_sequence_index(&cs), 0);

        let cs: Vec<char> = "ab".chars().collect();
        assert_eq!(first_non_symbol_index(&cs), 0);
        assert_eq!(last_symbol_sequence_index(&cs), 2);
    }

    #[test]
    fn test_span_index() {
        let cs: Vec<char> = ".?!=a".chars().collect();
        // same-character grouping stops at the next character
        assert_eq!(span_index(&cs, 0, cs.len(), false), 1);
        // final-mark grouping runs through the final marks
        assert_eq!(span_index(&cs, 0, cs.len(), true), 3);
    }

    #[test]
    fn test_digit_preservation() {
        let cs: Vec<char> = "+82-2-000-0000".chars().collect();
        assert!(preserve_symbol_in_digits(&cs, 3));
        assert!(preserve_symbol_in_digits(&cs, 5));

        let cs: Vec<char> = "4,567".chars().collect();
        assert!(preserve_symbol_in_digits(&cs, 1));
        // four digits after the comma break the grouping shape
        let cs: Vec<char> = "4,5678".chars().collect();
        assert!(!preserve_symbol_in_digits(&cs, 1));

        let cs: Vec<char> = "12/25/2014".chars().collect();
        assert!(preserve_symbol_in_digits(&cs, 2));
        let cs: Vec<char> = "a/2".chars().collect();
        assert!(!preserve_symbol_in_digits(&cs, 1));
    }

    #[test]
    fn test_alphabet_preservation() {
        let cs: Vec<char> = "AT&T".chars().collect();
        assert!(preserve_symbol_in_alphabets(&cs, 2));
        let cs: Vec<char> = "A&1".chars().collect();
        assert!(!preserve_symbol_in_alphabets(&cs, 1));
    }

    #[test]
    fn test_ellipsis() {
        let cs: Vec<char> = "a..b".chars().collect();
        assert!(is_ellipsis(&cs, 1));
        let cs: Vec<char> = "a.b".chars().collect();
        assert!(!is_ellipsis(&cs, 1));
        let cs: Vec<char> = "a.,b".chars().collect();
        assert!(is_ellipsis(&cs, 1));
    }

    #[test]
    fn test_protocol() {
        assert!(starts_with_network_protocol("http://x.y"));
        assert!(starts_with_network_protocol("HTTPS://x.y"));
        assert!(starts_with_network_protocol("sftp://x"));
        assert!(!starts_with_network_protocol("mailto:a@b.com"));
    }
}
