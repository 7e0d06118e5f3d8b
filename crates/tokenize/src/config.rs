#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenizeError};
use crate::persist;
use crate::stopwords::StopWords;
use crate::tokenizer::{Tokenize, TokenizerKind};
use crate::vocab::{Vocabulary, VocabularyBuilder, UNKNOWN_TOKEN};

/// Vocabulary bound used when none is configured.
pub const DEFAULT_MAX_VOCAB_SIZE: i64 = 100;

/// Pipeline settings, loadable from a JSON file. Missing fields take defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// maximum number of vocabulary entries; negative values are rejected
    /// when the builder is created
    pub max_vocab_size: i64,
    /// placeholder written for codes absent from the vocabulary
    pub unknown_token: String,
    /// tokenizer variant
    pub tokenizer: TokenizerKind,
    /// optional stop-word file (one word per line); the English list otherwise
    pub stop_words: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_vocab_size: DEFAULT_MAX_VOCAB_SIZE,
            unknown_token: UNKNOWN_TOKEN.to_string(),
            tokenizer: TokenizerKind::default(),
            stop_words: None,
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let cfg: Self = persist::read_json(path)?;
        log::debug!("loaded config from {}: {:?}", path.display(), cfg);
        Ok(cfg)
    }

    /// Vocabulary builder for `max_vocab_size`.
    pub fn builder(&self) -> Result<VocabularyBuilder> {
        VocabularyBuilder::try_from_signed(self.max_vocab_size)
    }

    /// Reject a placeholder that is also a real entry of `vocabulary`, since
    /// decoded output could then not tell unknowns from that token.
    pub fn check_placeholder(&self, vocabulary: &Vocabulary) -> Result<()> {
        match vocabulary.get(&self.unknown_token) {
            Some(code) => Err(TokenizeError::InvalidVocabulary(format!(
                "placeholder {:?} is also the real entry for code {code}",
                self.unknown_token
            ))),
            None => Ok(()),
        }
    }

    /// The configured stop words, read from disk when a file is set.
    pub fn load_stop_words(&self) -> Result<StopWords> {
        match &self.stop_words {
            Some(path) => {
                let words = StopWords::parse(&persist::read_text(path)?);
                log::debug!("loaded {} stop words from {}", words.len(), path.display());
                Ok(words)
            }
            None => Ok(StopWords::english()),
        }
    }

    /// The configured tokenizer.
    pub fn tokenizer(&self) -> Result<Box<dyn Tokenize + Send + Sync>> {
        let stop_words = match self.tokenizer {
            TokenizerKind::Simple => StopWords::none(),
            TokenizerKind::StopWord => self.load_stop_words()?,
        };
        Ok(self.tokenizer.build(stop_words))
    }
}
