use rand::Rng;
use rand::seq::SliceRandom;

/// Return `items` in a uniformly random order.
///
/// `SliceRandom::shuffle` is the Fisher–Yates walk from the last index down to
/// 1, swapping each slot with a uniformly chosen index at or before it.
pub fn shuffled<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn result_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut out = shuffled((0..50).collect::<Vec<_>>(), &mut rng);
        out.sort_unstable();
        assert_eq!(out, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn short_inputs_are_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffled(Vec::<u8>::new(), &mut rng).is_empty());
        assert_eq!(shuffled(vec![9], &mut rng), vec![9]);
    }

    #[test]
    fn every_ordering_of_three_is_about_equally_likely() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<Vec<u8>, u32> = HashMap::new();
        for _ in 0..6000 {
            *counts.entry(shuffled(vec![1, 2, 3], &mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (perm, n) in counts {
            assert!((850..=1150).contains(&n), "{perm:?} drawn {n} times");
        }
    }
}
