//! # Morsel
//!
//! A rule-based lexical segmentation engine for natural-language text. It
//! converts a raw character stream into an ordered sequence of tokens, each
//! anchored to its exact offset range in the source, through a layered
//! pipeline of character classification, dictionary lookups, and
//! language-specific morphological rules.
//!
//! ## Overview
//!
//! Tokenization runs in five stages per input line: whitespace splitting,
//! meta-span detection (hyperlinks and emoticons stay atomic), symbol-run
//! isolation with boundary-extension heuristics, dictionary-driven morpheme
//! splitting (currency, units, contractions, compounds), and a finalization
//! pass. Dictionaries are loaded once at construction and are read-only
//! afterwards, so a single [`Tokenizer`] can serve concurrent calls.
//!
//! The engine guarantees that for every emitted token,
//! `text == source[start..end]`, and that token ranges plus skipped
//! whitespace exactly partition the input. Tokenizing never fails; input
//! that matches no specific rule degrades to plain tokens.
//!
//! ## Examples
//!
//! ```
//! use morsel::Tokenizer;
//!
//! # fn main() -> Result<(), morsel::errors::MorselError> {
//! let tokenizer = Tokenizer::english()?;
//!
//! let tokens = tokenizer.tokenize("he's we'd");
//! let forms: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(forms, ["he", "'s", "we", "'d"]);
//!
//! let tokens = tokenizer.tokenize("$1 US$170,000?!");
//! let forms: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(forms, ["$", "1", "US$", "170,000", "?!"]);
//! # Ok(())
//! # }
//! ```

/// Character classification predicates.
pub mod chars;

/// Dictionary data structures and loading.
pub mod dictionary;

/// Error type definitions.
pub mod errors;

/// Language profiles.
pub mod language;

/// The morpheme matcher interface.
pub mod matcher;

/// Internal representation of one input line.
mod sentence;

/// The token type.
pub mod token;

/// The segmentation engine.
pub mod tokenizer;

#[cfg(test)]
mod tests;

// Re-exports
pub use dictionary::{Dictionary, DictionarySources};
pub use errors::{MorselError, Result};
pub use language::{English, LanguageProfile};
pub use token::Token;
pub use tokenizer::Tokenizer;

/// Version number of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
