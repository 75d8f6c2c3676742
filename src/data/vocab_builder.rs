// ============================================================
// Layer 4 — Vocabulary Builder
// ============================================================
// Builds the word, topic and dialog-act vocabularies from the
// TRAINING partition only. Validation and test data never
// influence vocabulary content.
//
// Ranking rule (all three vocabularies):
//   sort by count descending; equal counts keep the order in
//   which the items were first seen while walking the partition
//   (dialogues in order, turns in order, tokens in order).
//
// Word vocabulary:
//   ["<pad>", "<unk>"] + top `max_vocab_cnt` ranked tokens
//   Everything past the cut is discarded and counted towards the
//   OOV rate = discarded tokens / all tokens.
//
// Topic and dialog-act vocabularies are never truncated and
// carry no reserved ids.
//
// Why an explicit tie-break?
//   HashMap iteration order changes between runs. Without a rule
//   for equal counts, two builds of the same data could assign
//   different ids, and a saved model would read garbage.
//
// Reference: Rust Book §8 (Hash Maps)
//            std slice::sort_by (stable sort)

use std::collections::HashMap;

use crate::domain::dialogue::NormalizedPartition;
use crate::domain::vocabulary::{Vocabulary, VocabularySet, PAD_TOKEN, UNK_TOKEN};
use crate::error::Result;

/// Statistics gathered while building the vocabularies
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub total_tokens:     usize,
    pub discarded_tokens: usize,
    pub raw_vocab_size:   usize,
    /// Word vocabulary size including the two reserved tokens
    pub vocab_size:       usize,
    pub oov_rate:         f64,
    /// Count of the lowest-ranked kept word, `None` if none kept
    pub cutoff_freq:      Option<usize>,
    pub topic_count:      usize,
    pub dialog_act_count: usize,
}

pub struct VocabularyBuilder {
    max_vocab_cnt: usize,
}

impl VocabularyBuilder {
    pub fn new(max_vocab_cnt: usize) -> Self {
        Self { max_vocab_cnt }
    }

    pub fn build(&self, train: &NormalizedPartition) -> Result<(VocabularySet, BuildReport)> {
        // ── Words ─────────────────────────────────────────────────────────────
        // Reserved tokens keep their fixed ids, so they never compete for rank
        let ranked = rank_by_frequency(
            train
                .utterances
                .iter()
                .flatten()
                .map(String::as_str)
                .filter(|t| *t != PAD_TOKEN && *t != UNK_TOKEN),
        );

        let total_tokens: usize = ranked.iter().map(|(_, c)| c).sum();
        let keep = self.max_vocab_cnt.min(ranked.len());
        let (kept, dropped) = ranked.split_at(keep);
        let discarded_tokens: usize = dropped.iter().map(|(_, c)| c).sum();
        let oov_rate = if total_tokens == 0 {
            0.0
        } else {
            discarded_tokens as f64 / total_tokens as f64
        };

        let mut word_list = vec![PAD_TOKEN.to_string(), UNK_TOKEN.to_string()];
        word_list.extend(kept.iter().map(|(t, _)| t.to_string()));
        let words = Vocabulary::from_unique(word_list);

        // ── Topics ────────────────────────────────────────────────────────────
        let topics = ranked_vocabulary(train.metadata.iter().map(|m| m.topic.as_str()));

        // ── Dialog acts ───────────────────────────────────────────────────────
        // Turns without a feature (the synthetic opener) are skipped
        let dialog_acts = ranked_vocabulary(
            train
                .dialogues
                .iter()
                .flatten()
                .filter_map(|turn| turn.feature.as_ref())
                .map(|f| f.dialog_act.as_str()),
        );

        let report = BuildReport {
            total_tokens,
            discarded_tokens,
            raw_vocab_size: ranked.len(),
            vocab_size: words.len(),
            oov_rate,
            cutoff_freq: kept.last().map(|(_, c)| *c),
            topic_count: topics.len(),
            dialog_act_count: dialog_acts.len(),
        };

        tracing::info!(
            "Built vocab from {} train dialogues: raw vocab size {}, vocab size {} at cut_off {}, OOV rate {:.6}",
            train.len(),
            report.raw_vocab_size,
            report.vocab_size,
            report.cutoff_freq.map_or_else(|| "-".to_string(), |c| c.to_string()),
            report.oov_rate
        );
        tracing::info!("{} topics in train data", report.topic_count);
        tracing::debug!("Dialog acts: {:?}", dialog_acts.tokens());
        tracing::info!("{} dialog acts in train data", report.dialog_act_count);

        let set = VocabularySet::new(words, topics, dialog_acts)?;
        set.log_reserved();
        Ok((set, report))
    }
}

/// Distinct items with their counts, most frequent first.
/// Ties keep first-seen order (the sort is stable over an
/// insertion-ordered list).
pub fn rank_by_frequency<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut slot:   HashMap<&str, usize>  = HashMap::new();
    let mut counts: Vec<(&str, usize)>    = Vec::new();

    for item in items {
        match slot.get(item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(item, counts.len());
                counts.push((item, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn ranked_vocabulary<'a>(items: impl IntoIterator<Item = &'a str>) -> Vocabulary {
    Vocabulary::from_unique(
        rank_by_frequency(items)
            .into_iter()
            .map(|(t, _)| t.to_string())
            .collect(),
    )
}
