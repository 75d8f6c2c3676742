// ============================================================
// Layer 4 — Dialogue Normalizer
// ============================================================
// Turns raw records into the in-memory shape every later stage
// consumes. Per record:
//
//   1. Lowercase and tokenize each utterance, wrap in <s> ... </s>
//   2. Build both speaker vectors [age/100, edu/3, male, female]
//   3. Prepend the synthetic <s> <d> </s> turn (floor 0, no feature)
//   4. Floor of every real turn is 1 for speaker B, else 0
//   5. Push every turn's tokens (synthetic one too) onto the flat
//      utterance pool
//
// A record missing a required field aborts the whole partition
// with MissingField; partial records are never kept.
//
// Why lowercase before tokenizing?
//   "Okay" and "okay" would otherwise be two vocabulary entries
//   splitting the same word's counts, pushing real words below
//   the max_vocab_cnt cut.
//
// Reference: Rust Book §8 (Strings in Rust)

use crate::domain::dialogue::{
    Dialogue, Metadata, NormalizedPartition, Turn, OTHER_FLOOR, OWN_FLOOR, UTT_END, UTT_START,
};
use crate::domain::record::{RawRecord, RawSpeaker, Speaker};
use crate::domain::traits::WordTokenizer;
use crate::error::{CorpusError, Result};

const FEMALE: &str = "FEMALE";

pub struct DialogueNormalizer<T> {
    tokenizer: T,
}

impl<T: WordTokenizer> DialogueNormalizer<T> {
    pub fn new(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    /// Normalize one partition's worth of raw records.
    pub fn normalize(&self, records: &[RawRecord]) -> Result<NormalizedPartition> {
        let mut partition = NormalizedPartition::default();
        let mut lengths   = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let (dialogue, meta) = self.normalize_record(index, record)?;

            lengths.extend(dialogue.iter().skip(1).map(|turn| turn.tokens.len()));
            partition
                .utterances
                .extend(dialogue.iter().map(|turn| turn.tokens.clone()));
            partition.dialogues.push(dialogue);
            partition.metadata.push(meta);
        }

        if let Some((max, mean)) = length_stats(&lengths) {
            tracing::info!("Max utt len {}, mean utt len {:.2}", max, mean);
        }
        Ok(partition)
    }

    fn normalize_record(&self, index: usize, record: &RawRecord) -> Result<(Dialogue, Metadata)> {
        let utts = record.utts.as_ref().ok_or_else(|| missing(index, "utts"))?;

        let speaker_a = speaker_vector(index, "A", record.a.as_ref())?;
        let speaker_b = speaker_vector(index, "B", record.b.as_ref())?;
        let topic     = record.topic.clone().ok_or_else(|| missing(index, "topic"))?;

        let mut dialogue = Vec::with_capacity(utts.len() + 1);
        dialogue.push(Turn::beginning_of_dialogue());

        for (speaker, text, feature) in utts {
            let mut tokens = vec![UTT_START.to_string()];
            tokens.extend(self.tokenizer.tokenize(&text.to_lowercase())?);
            tokens.push(UTT_END.to_string());

            let floor = if *speaker == Speaker::B { OTHER_FLOOR } else { OWN_FLOOR };
            dialogue.push(Turn { tokens, floor, feature: feature.clone() });
        }

        Ok((dialogue, Metadata { speaker_a, speaker_b, topic }))
    }
}

/// `[age / 100, education / 3]` followed by a sex one-hot,
/// `[0, 1]` for FEMALE and `[1, 0]` otherwise.
fn speaker_vector(index: usize, side: &str, speaker: Option<&RawSpeaker>) -> Result<[f64; 4]> {
    let speaker   = speaker.ok_or_else(|| missing(index, side))?;
    let age       = speaker.age.ok_or_else(|| missing(index, &format!("{side}.age")))?;
    let education = speaker
        .education
        .ok_or_else(|| missing(index, &format!("{side}.education")))?;
    let sex = speaker
        .sex
        .as_deref()
        .ok_or_else(|| missing(index, &format!("{side}.sex")))?;

    let (male, female) = if sex == FEMALE { (0.0, 1.0) } else { (1.0, 0.0) };
    Ok([age / 100.0, education / 3.0, male, female])
}

fn missing(record: usize, field: &str) -> CorpusError {
    CorpusError::MissingField { record, field: field.to_string() }
}

/// Max and mean of a list of utterance lengths, `None` when empty
pub fn length_stats(lengths: &[usize]) -> Option<(usize, f64)> {
    let max = *lengths.iter().max()?;
    let mean = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    Some((max, mean))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tokenizer::WordPunctTokenizer;
    use crate::domain::dialogue::Feature;
    use serde_json::{json, Value};

    fn speaker(age: f64, education: f64, sex: &str) -> RawSpeaker {
        RawSpeaker { age: Some(age), education: Some(education), sex: Some(sex.into()) }
    }

    fn feature(act: &str) -> Option<Feature<String>> {
        Some(Feature { dialog_act: act.into(), sentiment: json!([0.2]), liwc: Value::Null })
    }

    fn record(utts: Vec<(Speaker, &str, Option<Feature<String>>)>) -> RawRecord {
        RawRecord {
            utts:  Some(utts.into_iter().map(|(s, t, f)| (s, t.to_string(), f)).collect()),
            a:     Some(speaker(50.0, 3.0, "FEMALE")),
            b:     Some(speaker(25.0, 1.5, "MALE")),
            topic: Some("PETS".into()),
        }
    }

    fn normalizer() -> DialogueNormalizer<WordPunctTokenizer> {
        DialogueNormalizer::new(WordPunctTokenizer::new())
    }

    #[test]
    fn test_tokens_are_lowercased_and_wrapped() {
        let rec = record(vec![(Speaker::A, "Hello, World", feature("sd"))]);
        let out = normalizer().normalize(&[rec]).unwrap();

        let turn = &out.dialogues[0][1];
        assert_eq!(turn.tokens, vec!["<s>", "hello", ",", "world", "</s>"]);
        assert_eq!(turn.feature, feature("sd"));
    }

    #[test]
    fn test_floor_assignment_follows_speaker() {
        let rec = record(vec![
            (Speaker::A, "one", None),
            (Speaker::B, "two", None),
            (Speaker::A, "three", None),
        ]);
        let out = normalizer().normalize(&[rec]).unwrap();

        let floors: Vec<u8> = out.dialogues[0].iter().map(|t| t.floor).collect();
        assert_eq!(floors, vec![0, 0, 1, 0]);
        assert_eq!(out.dialogues[0][0], Turn::beginning_of_dialogue());
    }

    #[test]
    fn test_metadata_vectors() {
        let out = normalizer().normalize(&[record(vec![])]).unwrap();
        let meta = &out.metadata[0];

        assert_eq!(meta.speaker_a, [0.5, 1.0, 0.0, 1.0]);
        assert_eq!(meta.speaker_b, [0.25, 0.5, 1.0, 0.0]);
        assert_eq!(meta.topic, "PETS");
    }

    #[test]
    fn test_flat_pool_includes_synthetic_turns() {
        let recs = vec![
            record(vec![(Speaker::A, "a", None), (Speaker::B, "b", None)]),
            record(vec![(Speaker::B, "c", None)]),
        ];
        let out = normalizer().normalize(&recs).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out.metadata.len(), 2);
        assert_eq!(out.utterances.len(), 5);
        assert_eq!(out.utterances[0], vec!["<s>", "<d>", "</s>"]);
        assert_eq!(out.utterances[3], vec!["<s>", "<d>", "</s>"]);
        assert_eq!(out.utterances[4], vec!["<s>", "c", "</s>"]);
    }

    #[test]
    fn test_missing_fields_are_named() {
        let mut no_topic = record(vec![]);
        no_topic.topic = None;

        let mut no_b_sex = record(vec![]);
        no_b_sex.b.as_mut().unwrap().sex = None;

        let mut no_a = record(vec![]);
        no_a.a = None;

        let mut no_utts = record(vec![]);
        no_utts.utts = None;

        let cases = [
            (no_topic, "topic"),
            (no_b_sex, "B.sex"),
            (no_a, "A"),
            (no_utts, "utts"),
        ];
        for (rec, expected) in cases {
            let err = normalizer().normalize(&[record(vec![]), rec]).unwrap_err();
            match err {
                CorpusError::MissingField { record, field } => {
                    assert_eq!(record, 1);
                    assert_eq!(field, expected);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_length_stats() {
        assert_eq!(length_stats(&[]), None);
        assert_eq!(length_stats(&[3, 5, 4]), Some((5, 4.0)));
    }
}
