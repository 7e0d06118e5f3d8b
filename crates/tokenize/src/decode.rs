#![forbid(unsafe_code)]

use crate::vocab::{Code, Vocabulary, UNKNOWN_TOKEN};

/// Map each code back to its token, substituting [`UNKNOWN_TOKEN`] for
/// codes missing from `vocabulary`.
///
/// Lossy for tokens that were outside the vocabulary when encoding: they
/// come back as the placeholder.
pub fn decode(codes: &[Code], vocabulary: &Vocabulary) -> Vec<String> {
    decode_with(codes, vocabulary, UNKNOWN_TOKEN)
}

/// Like [`decode`] with a caller-chosen placeholder.
pub fn decode_with(codes: &[Code], vocabulary: &Vocabulary, placeholder: &str) -> Vec<String> {
    let inverse = vocabulary.inverse();
    codes
        .iter()
        .map(|&c| inverse.get(c).unwrap_or(placeholder).to_string())
        .collect()
}

/// Position-wise agreement between an original token sequence and its
/// decoded form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comparison {
    /// positions compared (the shorter of the two lengths)
    pub compared: usize,
    /// positions where both sides hold the same token
    pub matched: usize,
    /// positions where the decoded side holds the placeholder
    pub unknown: usize,
    /// positions that differ for another reason
    pub mismatched: usize,
}

impl Comparison {
    /// Share of compared positions that matched, 0.0 when nothing was compared.
    pub fn match_ratio(&self) -> f64 {
        if self.compared == 0 {
            0.0
        } else {
            self.matched as f64 / self.compared as f64
        }
    }
}

/// Compare `original` with `decoded`, treating `placeholder` as an unknown
/// substitution rather than a mismatch.
pub fn compare<A, B>(original: &[A], decoded: &[B], placeholder: &str) -> Comparison
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut cmp = Comparison::default();
    for (o, d) in original.iter().zip(decoded) {
        let (o, d) = (o.as_ref(), d.as_ref());
        cmp.compared += 1;
        if o == d {
            cmp.matched += 1;
        } else if d == placeholder {
            cmp.unknown += 1;
        } else {
            cmp.mismatched += 1;
        }
    }
    cmp
}
