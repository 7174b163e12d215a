use crate::stream::{Batch, TopK, Value};

/// Reduce `batch` to its `k` largest values, largest first.
///
/// The batch is consumed and its buffer reused for the result. When `k` is at least the
/// batch length the whole batch comes back sorted. Equal values are ordered arbitrarily.
pub fn top_k(batch: Batch, k: usize) -> TopK {
    let mut values = batch.into_inner();
    let descending = |a: &Value, b: &Value| b.cmp(a);
    if k == 0 {
        values.clear();
    } else if k < values.len() {
        // partition so the first k slots hold the k largest
        values.select_nth_unstable_by(k - 1, descending);
        values.truncate(k);
    }
    values.sort_unstable_by(descending);
    TopK::from_sorted(values)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use crate::executor::top_k;
    use crate::stream::{Batch, Value};

    fn known_batch() -> Batch {
        Batch::new(vec![42, 7, 99, 3, 56, 81, 12, 30, 65, 20])
    }

    #[test]
    fn test_known_batch() {
        let top = top_k(known_batch(), 3);
        assert_eq!(top.values(), &[99, 81, 65]);
        assert_eq!(top.sum(), 245);
    }

    #[test]
    fn test_k_larger_than_batch() {
        let top = top_k(Batch::new(vec![3, 9, 1]), 5);
        assert_eq!(top.values(), &[9, 3, 1]);
    }

    #[test]
    fn test_k_equals_batch() {
        let top = top_k(known_batch(), 10);
        assert_eq!(top.values(), &[99, 81, 65, 56, 42, 30, 20, 12, 7, 3]);
    }

    #[test]
    fn test_duplicates() {
        let top = top_k(Batch::new(vec![5, 9, 9, 1, 9, 5]), 4);
        assert_eq!(top.values(), &[9, 9, 9, 5]);
    }

    #[test]
    fn test_empty_and_zero() {
        assert!(top_k(Batch::default(), 3).is_empty());
        assert!(top_k(known_batch(), 0).is_empty());
    }

    #[test]
    fn test_matches_full_sort() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let len = rng.gen_range(0..40);
            let k = rng.gen_range(1..50);
            let values: Vec<Value> = (0..len).map(|_| rng.gen_range(0..100)).collect();

            let mut expected = values.clone();
            expected.sort_unstable_by(|a, b| b.cmp(a));
            expected.truncate(k);

            let top = top_k(Batch::new(values), k);
            assert_eq!(top.len(), k.min(len));
            assert_eq!(top.values(), expected.as_slice());
        }
    }
}
