// ============================================================
// Layer 4 — Word/Punctuation Tokenizer Adapter
// ============================================================
// Wraps the `tokenizers` crate's Whitespace pre-tokenizer, which
// splits on the pattern `\w+|[^\w\s]+`: runs of word characters
// and runs of punctuation, whitespace dropped.
//
//   "okay, uh-huh."  →  ["okay", ",", "uh", "-", "huh", "."]
//
// Nothing else in the crate touches tokenizer library types.
//
// Reference: tokenizers crate documentation (pre_tokenizers)

use tokenizers::pre_tokenizers::whitespace::Whitespace;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

use crate::domain::traits::WordTokenizer;
use crate::error::{CorpusError, Result};

#[derive(Debug, Clone, Default)]
pub struct WordPunctTokenizer {
    inner: Whitespace,
}

impl WordPunctTokenizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordTokenizer for WordPunctTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let mut pretokenized = PreTokenizedString::from(text);
        self.inner
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| CorpusError::Tokenizer(e.to_string()))?;

        Ok(pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .map(|(piece, _, _)| piece.to_string())
            .collect())
    }
}
