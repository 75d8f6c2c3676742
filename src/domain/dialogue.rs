// ============================================================
// Layer 3 — Turns, Dialogues and Metadata
// ============================================================
// The same Turn type is used before and after encoding:
//
//   Turn<String, String>  normalized: word tokens, act label
//   Turn<u32, u32>        encoded:    word ids,    act id
//
// Only the token list and the dialog-act component change during
// encoding. The floor and the opaque sentiment/LIWC payloads
// pass through untouched.
//
// Why one generic Turn instead of two structs?
//   Encoding changes the element types, not the shape. Keeping
//   a single type makes "the encoded corpus has the same shape
//   as the normalized one" something the compiler checks.
//
// Reference: Rust Book §10 (Generic Data Types)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marks the start of every utterance
pub const UTT_START: &str = "<s>";

/// Marks the end of every utterance
pub const UTT_END: &str = "</s>";

/// Beginning-of-dialogue marker carried by the synthetic first turn
pub const BOD_TOKEN: &str = "<d>";

/// Floor of a turn spoken by the reference side (speaker A)
pub const OWN_FLOOR: u8 = 0;

/// Floor of a turn spoken by the other side (speaker B)
pub const OTHER_FLOOR: u8 = 1;

/// Per-turn annotation: a dialog act plus opaque sentiment and
/// LIWC payloads. Deserializes from either an object or a
/// `[act, sentiment, liwc]` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature<A> {
    pub dialog_act: A,
    pub sentiment:  Value,
    pub liwc:       Value,
}

/// One turn of a dialogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn<T = String, A = String> {
    pub tokens:  Vec<T>,
    pub floor:   u8,
    pub feature: Option<Feature<A>>,
}

impl Turn {
    /// The synthetic `<s> <d> </s>` turn that opens every dialogue.
    /// It belongs to the reference speaker and carries no feature.
    pub fn beginning_of_dialogue() -> Self {
        Self {
            tokens:  vec![UTT_START.into(), BOD_TOKEN.into(), UTT_END.into()],
            floor:   OWN_FLOOR,
            feature: None,
        }
    }
}

pub type Dialogue = Vec<Turn>;

pub type EncodedTurn = Turn<u32, u32>;

pub type EncodedDialogue = Vec<EncodedTurn>;

/// Speaker demographics and the conversation topic.
///
/// Each speaker vector is `[age / 100, education / 3, male, female]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata<T = String> {
    pub speaker_a: [f64; 4],
    pub speaker_b: [f64; 4],
    pub topic:     T,
}

pub type EncodedMetadata = Metadata<u32>;

/// One normalized partition. The three vectors are parallel for
/// `dialogues` and `metadata`; `utterances` is the flat pool of
/// every turn's tokens (synthetic turns included) used for
/// vocabulary statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedPartition {
    pub dialogues:  Vec<Dialogue>,
    pub metadata:   Vec<Metadata>,
    pub utterances: Vec<Vec<String>>,
}

impl NormalizedPartition {
    pub fn len(&self) -> usize {
        self.dialogues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialogues.is_empty()
    }
}
