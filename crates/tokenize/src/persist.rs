#![forbid(unsafe_code)]

//! File helpers for the pipeline stages. Vocabularies are stored as a JSON
//! object `{"token": code}`, encoded sequences as a JSON array of integers,
//! and token lists as one token per line.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, TokenizeError};
use crate::vocab::{Code, Vocabulary};

/// Read a UTF-8 text file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| TokenizeError::io(path, e))
}

/// Write `text` to `path`, replacing any existing file.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|e| TokenizeError::io(path, e))
}

/// Read a token list, splitting on any whitespace.
pub fn read_tokens(path: &Path) -> Result<Vec<String>> {
    let text = read_text(path)?;
    Ok(text.split_whitespace().map(str::to_string).collect())
}

/// Write tokens one per line.
pub fn write_tokens<S: AsRef<str>>(path: &Path, tokens: &[S]) -> Result<()> {
    let joined = tokens.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n");
    write_text(path, &joined)?;
    log::info!("wrote {} tokens to {}", tokens.len(), path.display());
    Ok(())
}

/// Deserialize a JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| TokenizeError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `value` as compact JSON to `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string(value).map_err(|source| TokenizeError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_text(path, &text)
}

/// Load a vocabulary mapping.
pub fn read_vocabulary(path: &Path) -> Result<Vocabulary> {
    let vocab: Vocabulary = read_json(path)?;
    log::info!("loaded vocabulary of {} entries from {}", vocab.len(), path.display());
    Ok(vocab)
}

/// Store a vocabulary mapping in insertion order.
pub fn write_vocabulary(path: &Path, vocabulary: &Vocabulary) -> Result<()> {
    write_json(path, vocabulary)?;
    log::info!("wrote vocabulary of {} entries to {}", vocabulary.len(), path.display());
    Ok(())
}

/// Load an encoded sequence.
pub fn read_codes(path: &Path) -> Result<Vec<Code>> {
    read_json(path)
}

/// Store an encoded sequence.
pub fn write_codes(path: &Path, codes: &[Code]) -> Result<()> {
    write_json(path, codes)?;
    log::info!("wrote {} codes to {}", codes.len(), path.display());
    Ok(())
}
