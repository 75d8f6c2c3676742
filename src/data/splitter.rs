// ============================================================
// Layer 4 — Train / Valid / Test Splitter
// ============================================================
// Shuffles a flat pool of records and cuts it into the three
// partitions. The shuffle is seeded, so the same pool and seed
// always give the same split; vocabularies built from the
// training side are then reproducible across runs.
//
// Uses Fisher-Yates via rand::seq::SliceRandom.
//
// Why shuffle before splitting?
//   Transcripts are usually stored in collection order (by
//   topic, by date). Without a shuffle, validation and test
//   would only see the last few topics of the collection.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation (SeedableRng)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::corpus::Corpus;

/// Shuffle `samples` with `seed` and split into (train, valid, test).
///
/// `valid_fraction` and `test_fraction` are rounded to whole
/// samples; validation is taken first, test is clamped to what
/// remains, and train gets the rest.
pub fn split_partitions<T>(
    mut samples:    Vec<T>,
    valid_fraction: f64,
    test_fraction:  f64,
    seed:           u64,
) -> Corpus<Vec<T>> {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total   = samples.len();
    let n_valid = ((total as f64) * valid_fraction).round() as usize;
    let n_valid = n_valid.min(total);
    let n_test  = ((total as f64) * test_fraction).round() as usize;
    let n_test  = n_test.min(total - n_valid);

    // split_off(n) leaves [0..n) behind and returns [n..)
    let test  = samples.split_off(total - n_test);
    let valid = samples.split_off(samples.len() - n_valid);

    tracing::debug!(
        "Dataset split: {} train, {} valid, {} test",
        samples.len(),
        valid.len(),
        test.len()
    );

    Corpus { train: samples, valid, test }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let c = split_partitions(items, 0.1, 0.2, 42);
        assert_eq!(c.train.len(), 70);
        assert_eq!(c.valid.len(), 10);
        assert_eq!(c.test.len(),  20);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let c = split_partitions(items, 0.15, 0.15, 1);

        let mut all: Vec<usize> = c.train.iter().chain(&c.valid).chain(&c.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_partitions((0..30).collect::<Vec<u32>>(), 0.2, 0.2, 9);
        let b = split_partitions((0..30).collect::<Vec<u32>>(), 0.2, 0.2, 9);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_dataset() {
        let c = split_partitions(Vec::<usize>::new(), 0.1, 0.1, 0);
        assert!(c.train.is_empty());
        assert!(c.valid.is_empty());
        assert!(c.test.is_empty());
    }

    #[test]
    fn test_oversized_fractions_are_clamped() {
        let c = split_partitions((0..10).collect::<Vec<u8>>(), 0.8, 0.8, 3);
        assert!(c.train.is_empty());
        assert_eq!(c.valid.len(), 8);
        assert_eq!(c.test.len(),  2);
    }
}
