// ============================================================
// Layer 3 — Corpus Container
// ============================================================
// A train/valid/test triple of anything: raw records,
// normalized partitions, or encoded dialogue lists. Serializes
// as `{"train": ..., "valid": ..., "test": ...}`, which is also
// the layout of the encoded corpus handed to model code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which split a piece of data belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Train,
    Valid,
    Test,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Partition::Train => "train",
            Partition::Valid => "valid",
            Partition::Test  => "test",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus<T> {
    pub train: T,
    pub valid: T,
    pub test:  T,
}

impl<T> Corpus<T> {
    /// Apply a fallible transformation to every partition, in
    /// train, valid, test order, stopping at the first error.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(Partition, &T) -> Result<U, E>,
    ) -> Result<Corpus<U>, E> {
        Ok(Corpus {
            train: f(Partition::Train, &self.train)?,
            valid: f(Partition::Valid, &self.valid)?,
            test:  f(Partition::Test,  &self.test)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_map_visits_in_order_and_stops_on_error() {
        let corpus = Corpus { train: 1, valid: 2, test: 3 };
        let mut seen = Vec::new();

        let doubled: Result<Corpus<i32>, ()> = corpus.try_map(|p, v| {
            seen.push(p);
            Ok(v * 2)
        });
        assert_eq!(doubled.unwrap(), Corpus { train: 2, valid: 4, test: 6 });
        assert_eq!(seen, vec![Partition::Train, Partition::Valid, Partition::Test]);

        let failed: Result<Corpus<i32>, Partition> =
            corpus.try_map(|p, v| if p == Partition::Valid { Err(p) } else { Ok(*v) });
        assert_eq!(failed.unwrap_err(), Partition::Valid);
    }

    #[test]
    fn test_serializes_with_partition_keys() {
        let corpus = Corpus { train: vec![1], valid: vec![], test: vec![2, 3] };
        let json = serde_json::to_value(&corpus).unwrap();
        assert_eq!(json["train"], serde_json::json!([1]));
        assert_eq!(json["test"], serde_json::json!([2, 3]));
    }
}
