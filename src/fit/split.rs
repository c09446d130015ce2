//! Seeded shuffle and train/test split.
//!
//! The permutation comes from an explicitly seeded generator, so the same
//! dataset and seed always give the same partitions (and therefore the same
//! fitted weights).

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Number of records that go to the training partition.
///
/// `floor(n × train_ratio)`, but never zero when there is at least one record:
/// a single-record dataset trains on that record and has an empty test set.
pub fn split_index(n: usize, train_ratio: f64) -> usize {
    if n == 0 {
        return 0;
    }
    let split = (n as f64 * train_ratio).floor() as usize;
    split.clamp(1, n)
}

/// Shuffle a copy of `items` with `seed` and cut it at [`split_index`].
///
/// Returns `(train, test)`.
pub fn shuffle_split<T: Clone>(items: &[T], seed: u64, train_ratio: f64) -> (Vec<T>, Vec<T>) {
    let mut shuffled = items.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let split = split_index(shuffled.len(), train_ratio);
    let test = shuffled.split_off(split);
    (shuffled, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_index_floors() {
        assert_eq!(split_index(10, 0.8), 8);
        assert_eq!(split_index(5, 0.8), 4);
        assert_eq!(split_index(7, 0.8), 5);
        assert_eq!(split_index(3, 1.0), 3);
    }

    #[test]
    fn split_index_small_inputs() {
        assert_eq!(split_index(0, 0.8), 0);
        assert_eq!(split_index(1, 0.8), 1);
        assert_eq!(split_index(2, 0.8), 1);
    }

    #[test]
    fn same_seed_same_partitions() {
        let items: Vec<u32> = (0..25).collect();
        let a = shuffle_split(&items, 42, 0.8);
        let b = shuffle_split(&items, 42, 0.8);
        assert_eq!(a, b);
        assert_eq!(a.0.len(), 20);
        assert_eq!(a.1.len(), 5);
    }

    #[test]
    fn partitions_cover_every_item_once() {
        let items: Vec<u32> = (0..25).collect();
        let (train, test) = shuffle_split(&items, 7, 0.8);
        let mut all: Vec<u32> = train.into_iter().chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, items);
    }

    #[test]
    fn different_seed_shuffles_differently() {
        let items: Vec<u32> = (0..25).collect();
        assert_ne!(shuffle_split(&items, 1, 0.8).0, shuffle_split(&items, 2, 0.8).0);
    }

    #[test]
    fn single_item_goes_to_training() {
        let (train, test) = shuffle_split(&["only"], 42, 0.8);
        assert_eq!(train, ["only"]);
        assert!(test.is_empty());
    }
}
