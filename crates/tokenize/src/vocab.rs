#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, TokenizeError};

/// Integer identifier of a token within a [`Vocabulary`].
pub type Code = u32;

/// Code substituted for tokens absent from the vocabulary.
///
/// Never assigned to a real entry: built vocabularies number their entries
/// from 1, and loaded ones are rejected if they use it.
pub const UNKNOWN_CODE: Code = 0;

/// Token substituted for codes absent from the vocabulary.
pub const UNKNOWN_TOKEN: &str = "<UNK>";

/// Bounded, frequency-ranked mapping from token to code.
///
/// Iteration order is insertion order: most frequent first for built
/// vocabularies, ascending code for loaded ones. Immutable once constructed.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    entries: Vec<(String, Code)>,
    index: HashMap<String, Code>,
    // occurrence counts parallel to `entries`; empty when loaded from a mapping
    counts: Vec<usize>,
}

impl Vocabulary {
    /// Build from explicit `(token, code)` pairs, e.g. a loaded mapping.
    ///
    /// Entries are reordered by ascending code. Fails on duplicate tokens,
    /// duplicate codes, or use of [`UNKNOWN_CODE`].
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Code)>,
    {
        let mut entries: Vec<(String, Code)> = entries.into_iter().collect();
        entries.sort_by_key(|(_, code)| *code);

        let mut index = HashMap::with_capacity(entries.len());
        let mut prev: Option<Code> = None;
        for (token, code) in &entries {
            if *code == UNKNOWN_CODE {
                return Err(TokenizeError::InvalidVocabulary(format!(
                    "token {token:?} uses reserved code {UNKNOWN_CODE}"
                )));
            }
            if prev == Some(*code) {
                return Err(TokenizeError::InvalidVocabulary(format!(
                    "code {code} is assigned more than once"
                )));
            }
            prev = Some(*code);
            if index.insert(token.clone(), *code).is_some() {
                return Err(TokenizeError::InvalidVocabulary(format!(
                    "token {token:?} appears more than once"
                )));
            }
        }
        Ok(Self { entries, index, counts: Vec::new() })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a vocabulary with no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Code for `token`, if present.
    pub fn get(&self, token: &str) -> Option<Code> {
        self.index.get(token).copied()
    }

    /// Whether `token` has an entry.
    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Code)> + '_ {
        self.entries.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// Tokens in insertion order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    /// `(token, occurrences)` in rank order. Empty for loaded vocabularies,
    /// since the mapping format does not carry counts.
    pub fn frequencies(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries
            .iter()
            .zip(self.counts.iter())
            .map(|((t, _), n)| (t.as_str(), *n))
    }

    /// Occurrences of `token` in the corpus the vocabulary was built from.
    pub fn count(&self, token: &str) -> Option<usize> {
        // built entries sit at position `code - 1`
        let code = self.get(token)?;
        let pos = usize::try_from(code.checked_sub(1)?).ok()?;
        self.counts.get(pos).copied()
    }

    /// Derive the code → token mapping. Recomputed on every call.
    pub fn inverse(&self) -> InverseVocabulary<'_> {
        InverseVocabulary {
            tokens: self.iter().map(|(t, c)| (c, t)).collect(),
        }
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Vocabulary {}

/// Code → token view borrowed from a [`Vocabulary`].
#[derive(Clone, Debug)]
pub struct InverseVocabulary<'a> {
    tokens: HashMap<Code, &'a str>,
}

impl<'a> InverseVocabulary<'a> {
    /// Token for `code`, if present.
    pub fn get(&self, code: Code) -> Option<&'a str> {
        self.tokens.get(&code).copied()
    }

    /// Number of codes.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the source vocabulary was empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Counts token frequencies and keeps the `max_size` most frequent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VocabularyBuilder {
    max_size: usize,
}

impl VocabularyBuilder {
    /// Builder keeping at most `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    /// Builder from a signed size, as read from config or the command line.
    ///
    /// Returns `InvalidArgument` when `max_size` is negative.
    pub fn try_from_signed(max_size: i64) -> Result<Self> {
        usize::try_from(max_size).map(Self::new).map_err(|_| {
            TokenizeError::InvalidArgument(format!(
                "max vocabulary size must be non-negative, got {max_size}"
            ))
        })
    }

    /// Upper bound on the number of entries.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Rank tokens by descending count, ties by first occurrence, and
    /// assign codes 1, 2, ... to the first `max_size` of them.
    pub fn build<S: AsRef<str>>(&self, tokens: &[S]) -> Vocabulary {
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut counted: Vec<(&str, usize)> = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            if let Some(&pos) = position.get(token) {
                if let Some(entry) = counted.get_mut(pos) {
                    entry.1 += 1;
                }
            } else {
                position.insert(token, counted.len());
                counted.push((token, 1));
            }
        }
        let distinct = counted.len();
        // stable: equal counts keep first-seen order
        counted.sort_by(|a, b| b.1.cmp(&a.1));

        let mut entries = Vec::with_capacity(self.max_size.min(distinct));
        let mut index = HashMap::with_capacity(entries.capacity());
        let mut counts = Vec::with_capacity(entries.capacity());
        for ((token, n), code) in counted
            .into_iter()
            .take(self.max_size)
            .zip((UNKNOWN_CODE + 1)..=Code::MAX)
        {
            entries.push((token.to_string(), code));
            index.insert(token.to_string(), code);
            counts.push(n);
        }

        log::debug!(
            "built vocabulary: {} entries from {} tokens ({} distinct, max_size={})",
            entries.len(),
            tokens.len(),
            distinct,
            self.max_size
        );
        Vocabulary { entries, index, counts }
    }
}

/// Build a vocabulary of at most `max_size` entries from `tokens`.
pub fn build<S: AsRef<str>>(tokens: &[S], max_size: usize) -> Vocabulary {
    VocabularyBuilder::new(max_size).build(tokens)
}

impl Serialize for Vocabulary {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (token, code) in &self.entries {
            map.serialize_entry(token, code)?;
        }
        map.end()
    }
}

struct VocabularyVisitor;

impl<'de> Visitor<'de> for VocabularyVisitor {
    type Value = Vocabulary;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from token to non-negative integer code")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Vocabulary, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((token, code)) = access.next_entry::<String, Code>()? {
            entries.push((token, code));
        }
        Vocabulary::from_entries(entries).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Vocabulary {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(VocabularyVisitor)
    }
}
