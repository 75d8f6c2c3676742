// ============================================================
// Layer 4 — Corpus Encoder
// ============================================================
// Replaces tokens and labels with integer ids using one shared
// VocabularySet (built from train, applied to every partition).
//
//   word tokens   → word id, or unk id when unseen
//   dialog act    → dialog-act id, UnknownLabel when unseen
//   topic         → topic id, UnknownLabel when unseen
//   floor         → unchanged
//   sentiment/liwc → unchanged
//
// Words are open-world, labels are closed-world. Encoding never
// touches the vocabularies.
//
// Reference: Rust Book §13 (Iterators: collect into Result)

use crate::domain::corpus::Corpus;
use crate::domain::dialogue::{
    Dialogue, EncodedDialogue, EncodedMetadata, EncodedTurn, Feature, Metadata,
    NormalizedPartition, Turn,
};
use crate::domain::vocabulary::VocabularySet;
use crate::error::{CorpusError, Result};

pub struct CorpusEncoder<'a> {
    vocabs: &'a VocabularySet,
}

impl<'a> CorpusEncoder<'a> {
    pub fn new(vocabs: &'a VocabularySet) -> Self {
        Self { vocabs }
    }

    pub fn encode_turn(&self, turn: &Turn) -> Result<EncodedTurn> {
        let unk_id = self.vocabs.unk_id();
        let tokens = turn
            .tokens
            .iter()
            .map(|t| self.vocabs.words.id(t).unwrap_or(unk_id))
            .collect();

        let feature = match &turn.feature {
            Some(f) => Some(Feature {
                dialog_act: self.dialog_act_id(&f.dialog_act)?,
                sentiment:  f.sentiment.clone(),
                liwc:       f.liwc.clone(),
            }),
            None => None,
        };

        Ok(Turn { tokens, floor: turn.floor, feature })
    }

    pub fn encode_dialogue(&self, dialogue: &Dialogue) -> Result<EncodedDialogue> {
        dialogue.iter().map(|turn| self.encode_turn(turn)).collect()
    }

    pub fn encode_dialogues(&self, dialogues: &[Dialogue]) -> Result<Vec<EncodedDialogue>> {
        dialogues.iter().map(|d| self.encode_dialogue(d)).collect()
    }

    pub fn encode_metadata(&self, meta: &Metadata) -> Result<EncodedMetadata> {
        let topic = self.vocabs.topics.id(&meta.topic).ok_or_else(|| {
            CorpusError::UnknownLabel { kind: "topic", label: meta.topic.clone() }
        })?;
        Ok(Metadata { speaker_a: meta.speaker_a, speaker_b: meta.speaker_b, topic })
    }

    /// Encode the dialogues of all three partitions.
    pub fn encode_corpus(
        &self,
        corpus: &Corpus<NormalizedPartition>,
    ) -> Result<Corpus<Vec<EncodedDialogue>>> {
        corpus.try_map(|partition, data| {
            let encoded = self.encode_dialogues(&data.dialogues)?;
            tracing::debug!("Encoded {} {} dialogues", encoded.len(), partition);
            Ok(encoded)
        })
    }

    fn dialog_act_id(&self, act: &str) -> Result<u32> {
        self.vocabs
            .dialog_acts
            .id(act)
            .ok_or_else(|| CorpusError::UnknownLabel { kind: "dialog act", label: act.to_string() })
    }
}
