// ============================================================
// Layer 3 — Raw Dialogue Records
// ============================================================
// The shape a transcript has before normalization:
//
//   {
//     "utts":  [["A", "okay so", ["sd", [0.1, 0.8, 0.1], {...}]], ...],
//     "A":     {"age": 52, "education": 2, "sex": "FEMALE"},
//     "B":     {"age": 33, "education": 3, "sex": "MALE"},
//     "topic": "CHILD CARE"
//   }
//
// Every required field is an Option at the serde level so that
// a malformed record still deserializes. The normalizer is the
// one that rejects it, naming the dotted path of the missing
// field (e.g. `B.education`).
//
// Reference: serde documentation (Option fields default to None)

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::Feature;

/// Which side of the conversation produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    A,
    B,
}

/// One raw utterance: `[speaker, text, feature | null]`
pub type RawUtterance = (Speaker, String, Option<Feature<String>>);

/// Demographics of one caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSpeaker {
    pub age:       Option<f64>,
    pub education: Option<f64>,
    pub sex:       Option<String>,
}

/// A raw transcript with per-speaker demographics and a topic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub utts: Option<Vec<RawUtterance>>,

    #[serde(rename = "A")]
    pub a: Option<RawSpeaker>,

    #[serde(rename = "B")]
    pub b: Option<RawSpeaker>,

    pub topic: Option<String>,
}
