#![forbid(unsafe_code)]

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::stopwords::StopWords;

/// Maximal runs of letters, numbers and underscore.
///
/// Narrower than the regex crate's Unicode `\w`: combining marks, joiners
/// and connector punctuation other than `_` split tokens, while numbers such
/// as `²` and `½` are kept.
pub const WORD_PATTERN: &str = r"[\p{L}\p{N}_]+";

/// Splits raw text into a sequence of tokens.
///
/// Implementations are total: every input string, including the empty
/// string, yields a (possibly empty) token sequence.
pub trait Tokenize {
    /// Tokenize `text`.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Splits on whitespace only. No case folding, punctuation stays attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceTokenizer;

impl Tokenize for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

#[allow(clippy::expect_used)]
fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(WORD_PATTERN).expect("WORD_PATTERN is a valid regex"))
}

/// Lowercases, extracts [`WORD_PATTERN`] runs and drops stop words.
#[derive(Clone, Debug)]
pub struct StopWordTokenizer {
    pattern: &'static Regex,
    stop_words: StopWords,
}

impl StopWordTokenizer {
    /// Create a tokenizer that removes the given stop words.
    pub fn new(stop_words: StopWords) -> Self {
        Self { pattern: word_pattern(), stop_words }
    }

    /// Tokenizer using the built-in English stop-word list.
    pub fn english() -> Self {
        Self::new(StopWords::english())
    }
}

impl Tokenize for StopWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(t))
            .map(str::to_string)
            .collect()
    }
}

/// Which tokenizer variant a pipeline uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenizerKind {
    /// [`WhitespaceTokenizer`], the variant used by the drills.
    #[default]
    Simple,
    /// [`StopWordTokenizer`].
    StopWord,
}

impl TokenizerKind {
    /// Construct the selected tokenizer. `stop_words` is ignored by `Simple`.
    pub fn build(self, stop_words: StopWords) -> Box<dyn Tokenize + Send + Sync> {
        match self {
            TokenizerKind::Simple => Box::new(WhitespaceTokenizer),
            TokenizerKind::StopWord => Box::new(StopWordTokenizer::new(stop_words)),
        }
    }
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerKind::Simple => f.write_str("simple"),
            TokenizerKind::StopWord => f.write_str("stop-word"),
        }
    }
}

/// Whitespace split of `text`.
pub fn tokenize_simple(text: &str) -> Vec<String> {
    WhitespaceTokenizer.tokenize(text)
}

/// Stop-word-aware tokenization with the English list.
pub fn tokenize_stopword_aware(text: &str) -> Vec<String> {
    static ENGLISH: OnceLock<StopWordTokenizer> = OnceLock::new();
    ENGLISH.get_or_init(StopWordTokenizer::english).tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> StopWordTokenizer {
        StopWordTokenizer::english()
    }

    #[test]
    fn empty_string_yields_no_tokens() {
        assert!(english().tokenize("").is_empty());
        assert!(tokenize_simple("").is_empty());
        assert!(tokenize_stopword_aware("").is_empty());
    }

    #[test]
    fn single_and_multiple_words() {
        assert_eq!(english().tokenize("hello"), vec!["hello"]);
        assert_eq!(english().tokenize("hello world"), vec!["hello", "world"]);
    }

    #[test]
    fn punctuation_is_dropped() {
        assert_eq!(english().tokenize("hello, world!"), vec!["hello", "world"]);
        assert_eq!(tokenize_stopword_aware("hello, world!"), vec!["hello", "world"]);
    }

    #[test]
    fn stop_words_are_removed() {
        assert_eq!(
            english().tokenize("the quick brown fox"),
            vec!["quick", "brown", "fox"]
        );
        assert_eq!(
            tokenize_stopword_aware("the quick brown fox"),
            vec!["quick", "brown", "fox"]
        );
        assert!(english().tokenize("The and OF a").is_empty());
    }

    #[test]
    fn case_is_folded_only_by_stop_word_variant() {
        assert_eq!(english().tokenize("Rust RUST rust"), vec!["rust", "rust", "rust"]);
        assert_eq!(tokenize_simple("Rust RUST rust"), vec!["Rust", "RUST", "rust"]);
    }

    #[test]
    fn simple_keeps_punctuation_attached() {
        assert_eq!(
            tokenize_simple("  hello,   world!\n\tbye.  "),
            vec!["hello,", "world!", "bye."]
        );
    }

    #[test]
    fn digits_underscores_and_unicode_are_word_characters() {
        assert_eq!(
            english().tokenize("snake_case v2 Übermut café"),
            vec!["snake_case", "v2", "übermut", "café"]
        );
    }

    #[test]
    fn marks_joiners_and_connectors_split_words() {
        assert_eq!(english().tokenize("a\u{200d}b"), vec!["a", "b"]);
        assert_eq!(english().tokenize("cafe\u{301}"), vec!["cafe"]);
        assert_eq!(english().tokenize("a\u{203f}b"), vec!["a", "b"]);
    }

    #[test]
    fn other_numbers_are_kept() {
        assert_eq!(english().tokenize("x² ½"), vec!["x²", "½"]);
    }

    #[test]
    fn apostrophes_split_words() {
        // "don't" never survives as one token; "t" is itself a stop word.
        assert_eq!(english().tokenize("Don't panic"), vec!["panic"]);
    }

    #[test]
    fn custom_stop_words_are_injected() {
        let tok = StopWordTokenizer::new(StopWords::from_words(["fox"]));
        assert_eq!(tok.tokenize("the quick brown fox"), vec!["the", "quick", "brown"]);
    }

    #[test]
    fn kind_parses_and_builds() {
        let kind: TokenizerKind = serde_json::from_str(r#""stop-word""#).unwrap();
        assert_eq!(kind, TokenizerKind::StopWord);
        assert_eq!(kind.to_string(), "stop-word");
        assert!(serde_json::from_str::<TokenizerKind>(r#""stopword""#).is_err());

        let tok = TokenizerKind::StopWord.build(StopWords::english());
        assert_eq!(tok.tokenize("The End."), vec!["end"]);
        let tok = TokenizerKind::Simple.build(StopWords::english());
        assert_eq!(tok.tokenize("The End."), vec!["The", "End."]);
    }

    #[test]
    fn long_passage() {
        let text = "It was the best of times, it was the worst of times; 1813_edition!";
        assert_eq!(
            tokenize_stopword_aware(text),
            vec!["best", "times", "worst", "times", "1813_edition"]
        );
    }
}
