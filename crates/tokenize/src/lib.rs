#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
#![deny(missing_docs, unused_must_use)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Word-level tokenization and a frequency-ranked vocabulary codec.
//!
//! Pipeline: raw text -> [`Tokenize`] -> tokens -> [`VocabularyBuilder`] ->
//! [`Vocabulary`] -> [`encode`] -> codes -> [`decode`] -> tokens.
//!
//! Contract: every stage is a deterministic, pure transformation. Encoding
//! and decoding never fail; tokens and codes outside the vocabulary are
//! replaced by [`UNKNOWN_CODE`] and [`UNKNOWN_TOKEN`]. Code 0 is reserved for
//! unknowns, so real entries are numbered from 1.
//!
//! ```
//! use tokenize::{build, decode, encode, tokenize_simple};
//!
//! let tokens = tokenize_simple("to be or not to be");
//! let vocab = build(&tokens, 2);
//! let codes = encode(&tokens, &vocab);
//! assert_eq!(codes, vec![1, 2, 0, 0, 1, 2]);
//! assert_eq!(decode(&codes, &vocab), vec!["to", "be", "<UNK>", "<UNK>", "to", "be"]);
//! ```

/// Error type and result alias.
pub mod error;
/// Stop-word sets injected into the stop-word tokenizer.
pub mod stopwords;
/// Whitespace and stop-word-aware tokenizers.
pub mod tokenizer;
/// Vocabulary type, builder and inverse mapping.
pub mod vocab;
/// Token sequence -> code sequence.
pub mod encode;
/// Code sequence -> token sequence.
pub mod decode;
/// JSON and plain-text file helpers for each pipeline stage.
pub mod persist;
/// Pipeline configuration.
pub mod config;

pub use config::PipelineConfig;
pub use decode::{compare, decode, decode_with, Comparison};
pub use encode::{encode, encode_text};
pub use error::{Result, TokenizeError};
pub use stopwords::StopWords;
pub use tokenizer::{
    tokenize_simple, tokenize_stopword_aware, StopWordTokenizer, Tokenize, TokenizerKind,
    WhitespaceTokenizer,
};
pub use vocab::{
    build, Code, InverseVocabulary, Vocabulary, VocabularyBuilder, UNKNOWN_CODE, UNKNOWN_TOKEN,
};
