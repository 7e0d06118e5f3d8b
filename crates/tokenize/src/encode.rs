#![forbid(unsafe_code)]

use crate::tokenizer::Tokenize;
use crate::vocab::{Code, Vocabulary, UNKNOWN_CODE};

/// Map each token to its code, substituting [`UNKNOWN_CODE`] for tokens
/// missing from `vocabulary`. Output length equals input length.
pub fn encode<S: AsRef<str>>(tokens: &[S], vocabulary: &Vocabulary) -> Vec<Code> {
    let codes: Vec<Code> = tokens
        .iter()
        .map(|t| vocabulary.get(t.as_ref()).unwrap_or(UNKNOWN_CODE))
        .collect();
    log::debug!(
        "encoded {} tokens, {} unknown",
        codes.len(),
        codes.iter().filter(|&&c| c == UNKNOWN_CODE).count()
    );
    codes
}

/// Tokenize `text` and encode the result.
pub fn encode_text(text: &str, tokenizer: &dyn Tokenize, vocabulary: &Vocabulary) -> Vec<Code> {
    encode(&tokenizer.tokenize(text), vocabulary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{StopWordTokenizer, WhitespaceTokenizer};
    use crate::vocab::build;

    #[test]
    fn known_tokens_get_their_codes() {
        let v = build(&["a", "b", "a"], 10);
        assert_eq!(encode(&["b", "a", "a"], &v), vec![2, 1, 1]);
    }

    #[test]
    fn unknown_tokens_become_zero() {
        let v = build(&["a", "b"], 1);
        assert_eq!(encode(&["a", "b", "zzz"], &v), vec![1, UNKNOWN_CODE, UNKNOWN_CODE]);
        assert_eq!(encode(&["a"], &Vocabulary::default()), vec![UNKNOWN_CODE]);
    }

    #[test]
    fn empty_sequence_encodes_to_empty() {
        let v = build(&["a"], 1);
        assert!(encode::<&str>(&[], &v).is_empty());
    }

    #[test]
    fn encode_text_uses_the_given_tokenizer() {
        let v = build(&["quick", "fox", "The"], 10);
        assert_eq!(encode_text("The quick fox", &WhitespaceTokenizer, &v), vec![3, 1, 2]);
        assert_eq!(encode_text("The quick fox", &StopWordTokenizer::english(), &v), vec![1, 2]);
    }
}
