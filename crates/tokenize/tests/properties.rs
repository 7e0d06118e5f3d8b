//! Property tests for the tokenize -> build -> encode -> decode pipeline.

use std::collections::HashSet;

use proptest::prelude::*;
use regex::Regex;
use tokenize::{
    build, decode, encode, tokenize_simple, tokenize_stopword_aware, StopWordTokenizer, StopWords,
    Tokenize, UNKNOWN_CODE, UNKNOWN_TOKEN,
};

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,4}"
}

fn corpus() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word(), 0..60)
}

proptest! {
    #[test]
    fn simple_token_count_matches_whitespace_split(text in any::<String>()) {
        prop_assert_eq!(tokenize_simple(&text).len(), text.split_whitespace().count());
    }

    #[test]
    fn stopword_output_is_clean(text in any::<String>()) {
        let stop_words = StopWords::english();
        let word_only = Regex::new(r"^[\p{L}\p{N}_]+$").unwrap();
        for token in tokenize_stopword_aware(&text) {
            prop_assert!(!stop_words.contains(&token), "stop word {:?} survived", token);
            prop_assert!(word_only.is_match(&token), "{:?} is not a word token", token);
        }
    }

    #[test]
    fn word_characters_are_neither_lost_nor_merged(text in any::<String>()) {
        let tokenizer = StopWordTokenizer::new(StopWords::none());
        let separators = Regex::new(r"[^\p{L}\p{N}_]+").unwrap();
        let lowered = text.to_lowercase();
        let tokens = tokenizer.tokenize(&text);
        prop_assert_eq!(tokens.concat(), separators.replace_all(&lowered, "").into_owned());
        let runs = separators.split(&lowered).filter(|r| !r.is_empty()).count();
        prop_assert_eq!(tokens.len(), runs);
    }

    #[test]
    fn stopword_output_on_prose_is_lowercase(text in "[A-Za-z ,.!?']{0,80}") {
        for token in tokenize_stopword_aware(&text) {
            prop_assert_eq!(token.to_lowercase(), token);
        }
    }

    #[test]
    fn vocabulary_size_is_bounded(tokens in corpus(), n in 0usize..40) {
        let distinct = tokens.iter().collect::<HashSet<_>>().len();
        prop_assert_eq!(build(&tokens, n).len(), n.min(distinct));
    }

    #[test]
    fn codes_are_dense_from_one(tokens in corpus(), n in 0usize..40) {
        let v = build(&tokens, n);
        let codes: Vec<u32> = v.iter().map(|(_, c)| c).collect();
        let expected: Vec<u32> = (1..=v.len() as u32).collect();
        prop_assert_eq!(codes, expected);
    }

    #[test]
    fn ranking_is_by_descending_count(tokens in corpus()) {
        let v = build(&tokens, usize::MAX);
        let counts: Vec<usize> = v.frequencies().map(|(_, n)| n).collect();
        prop_assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        for (token, n) in v.frequencies() {
            prop_assert_eq!(tokens.iter().filter(|t| t.as_str() == token).count(), n);
        }
    }

    #[test]
    fn encode_decode_preserve_length(corpus in corpus(), text in corpus(), n in 0usize..20) {
        let v = build(&corpus, n);
        let codes = encode(&text, &v);
        prop_assert_eq!(codes.len(), text.len());
        prop_assert_eq!(decode(&codes, &v).len(), text.len());
    }

    #[test]
    fn round_trip_restores_known_tokens(corpus in corpus(), text in corpus(), n in 0usize..20) {
        let v = build(&corpus, n);
        let decoded = decode(&encode(&text, &v), &v);
        for (original, back) in text.iter().zip(&decoded) {
            if v.contains(original) {
                prop_assert_eq!(original, back);
            } else {
                prop_assert_eq!(back.as_str(), UNKNOWN_TOKEN);
            }
        }
    }

    #[test]
    fn absent_tokens_encode_to_zero(corpus in corpus(), n in 0usize..20) {
        let v = build(&corpus, n);
        // uppercase never occurs in the generated corpus
        prop_assert_eq!(encode(&["ABSENT"], &v), vec![UNKNOWN_CODE]);
        prop_assert_eq!(decode(&[UNKNOWN_CODE], &v), vec![UNKNOWN_TOKEN.to_string()]);
    }
}

#[test]
fn fixed_examples() {
    assert!(tokenize_stopword_aware("").is_empty());
    assert!(tokenize_simple("").is_empty());
    assert_eq!(tokenize_stopword_aware("hello, world!"), vec!["hello", "world"]);
    assert_eq!(
        tokenize_stopword_aware("the quick brown fox"),
        vec!["quick", "brown", "fox"]
    );
}
