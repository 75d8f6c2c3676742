// ============================================================
// Layer 3 — Vocabularies
// ============================================================
// A Vocabulary is an ordered token list where the position IS
// the id, paired with the reverse token -> id map. The two are
// kept consistent at construction time:
//
//   rev[tokens[i]] == i   for every i
//   tokens are unique
//
// A VocabularySet bundles the three vocabularies the corpus
// uses (words, topics, dialog acts) with the unknown-word id,
// which is always derived from the word vocabulary and never
// stored on its own.
//
// Reference: Rust Book §8 (Vectors, Hash Maps)

use std::collections::HashMap;

use crate::domain::dialogue::BOD_TOKEN;
use crate::error::{CorpusError, Result};

/// Padding token, always id 0 in a word vocabulary
pub const PAD_TOKEN: &str = "<pad>";

/// Out-of-vocabulary token, always id 1 in a word vocabulary
pub const UNK_TOKEN: &str = "<unk>";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: Vec<String>,
    rev:    HashMap<String, u32>,
}

impl Vocabulary {
    /// Build from tokens already known to be unique, such as the
    /// keys of a frequency table.
    pub(crate) fn from_unique(tokens: Vec<String>) -> Self {
        let rev = tokens
            .iter()
            .enumerate()
            .map(|(idx, t)| (t.clone(), idx as u32))
            .collect();
        Self { tokens, rev }
    }

    /// Build from an ordered list and a reverse map that must agree
    /// with it. Returns a description of the first inconsistency.
    pub fn from_parts(
        tokens: Vec<String>,
        rev:    HashMap<String, u32>,
    ) -> std::result::Result<Self, String> {
        if tokens.len() != rev.len() {
            return Err(format!(
                "{} tokens but {} reverse entries",
                tokens.len(),
                rev.len()
            ));
        }
        for (idx, token) in tokens.iter().enumerate() {
            match rev.get(token) {
                Some(&id) if id as usize == idx => {}
                Some(&id) => {
                    return Err(format!("token `{token}` at {idx} maps back to {id}"));
                }
                None => return Err(format!("token `{token}` has no reverse entry")),
            }
        }
        Ok(Self { tokens, rev })
    }

    pub fn id(&self, token: &str) -> Option<u32> {
        self.rev.get(token).copied()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn rev(&self) -> &HashMap<String, u32> {
        &self.rev
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Word, topic and dialog-act vocabularies built from one
/// training partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularySet {
    pub words:       Vocabulary,
    pub topics:      Vocabulary,
    pub dialog_acts: Vocabulary,
    unk_id:          u32,
}

impl VocabularySet {
    /// Bundle three vocabularies, deriving the unknown-word id from
    /// the word vocabulary. Fails if `<unk>` is absent.
    pub fn new(words: Vocabulary, topics: Vocabulary, dialog_acts: Vocabulary) -> Result<Self> {
        let unk_id = words.id(UNK_TOKEN).ok_or_else(|| CorpusError::Lookup {
            token: UNK_TOKEN.to_string(),
        })?;
        Ok(Self { words, topics, dialog_acts, unk_id })
    }

    pub fn unk_id(&self) -> u32 {
        self.unk_id
    }

    /// Id of the beginning-of-dialogue marker `<d>`
    pub fn bod_id(&self) -> Result<u32> {
        self.words.id(BOD_TOKEN).ok_or_else(|| CorpusError::Lookup {
            token: BOD_TOKEN.to_string(),
        })
    }

    /// Emit the `<d>` index, or a warning when truncation dropped it
    pub(crate) fn log_reserved(&self) {
        match self.words.id(BOD_TOKEN) {
            Some(id) => tracing::info!("{} index {}", BOD_TOKEN, id),
            None => tracing::warn!("{} is not in the word vocabulary", BOD_TOKEN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vocabulary {
        Vocabulary::from_unique(list.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_reverse_map_matches_positions() {
        let v = words(&["<pad>", "<unk>", "hello"]);
        for (idx, token) in v.tokens().iter().enumerate() {
            assert_eq!(v.id(token), Some(idx as u32));
        }
        assert_eq!(v.id("missing"), None);
    }

    #[test]
    fn test_from_parts_rejects_inconsistent_maps() {
        let tokens = vec!["a".to_string(), "b".to_string()];

        let mut swapped = HashMap::new();
        swapped.insert("a".to_string(), 1);
        swapped.insert("b".to_string(), 0);
        assert!(Vocabulary::from_parts(tokens.clone(), swapped).is_err());

        let mut short = HashMap::new();
        short.insert("a".to_string(), 0);
        assert!(Vocabulary::from_parts(tokens.clone(), short).is_err());

        let good = words(&["a", "b"]);
        let rebuilt = Vocabulary::from_parts(tokens, good.rev().clone()).unwrap();
        assert_eq!(rebuilt, good);
    }

    #[test]
    fn test_duplicate_tokens_fail_from_parts() {
        let tokens = vec!["a".to_string(), "a".to_string()];
        let mut rev = HashMap::new();
        rev.insert("a".to_string(), 0);
        assert!(Vocabulary::from_parts(tokens, rev).is_err());
    }

    #[test]
    fn test_set_derives_unk_id() {
        let set = VocabularySet::new(
            words(&["<pad>", "<unk>", "<d>"]),
            words(&["PETS"]),
            words(&["sd"]),
        )
        .unwrap();
        assert_eq!(set.unk_id(), 1);
        assert_eq!(set.bod_id().unwrap(), 2);
    }

    #[test]
    fn test_set_without_unk_is_a_lookup_error() {
        let err = VocabularySet::new(words(&["<pad>"]), words(&[]), words(&[])).unwrap_err();
        assert!(matches!(err, CorpusError::Lookup { ref token } if token == "<unk>"));
    }

    #[test]
    fn test_missing_bod_is_a_lookup_error() {
        let set = VocabularySet::new(words(&["<pad>", "<unk>"]), words(&[]), words(&[])).unwrap();
        assert!(matches!(set.bod_id(), Err(CorpusError::Lookup { .. })));
    }
}
